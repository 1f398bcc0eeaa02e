//! Drag-session and track-geometry state for the range bar.

use trimbar_core::{InputSurface, ListenerKind, SurfaceGuard, TouchId};

use crate::mapping;

/// Measured track geometry, recomputed on layout and resize.
///
/// Written only by the layout/resize path; every other component reads
/// it. Initialization is two-phase: the first measurement immediately
/// establishes the travel width and arms a confirmation pass, which the
/// owning widget collects once the surrounding layout has settled to
/// place the out-marker at the container's far edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackGeometry {
    left: f32,
    container_width: f32,
    travel: f32,
    measured: bool,
    confirmation_pending: bool,
}

impl Default for TrackGeometry {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackGeometry {
    /// Create an unmeasured geometry. All reads yield zero until the
    /// first [`measure`](Self::measure).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            left: 0.0,
            container_width: 0.0,
            travel: 0.0,
            measured: false,
            confirmation_pending: false,
        }
    }

    /// Recompute from a measured container edge and width.
    ///
    /// The single recompute entry point: the initial measurement and
    /// every later resize both funnel through here.
    pub fn measure(&mut self, left: f32, width: f32) {
        self.left = left;
        self.container_width = width;
        self.travel = mapping::travel_width(width);
        if !self.measured {
            self.measured = true;
            self.confirmation_pending = true;
        }
    }

    /// Recompute for a resize that reports only a new width.
    pub fn resize(&mut self, width: f32) {
        self.measure(self.left, width);
    }

    /// Collect the pending post-mount confirmation, if armed.
    ///
    /// Returns the settled container width exactly once after the first
    /// measurement; the caller uses it to seat the out-marker at the
    /// far edge.
    pub fn take_confirmation(&mut self) -> Option<f32> {
        if self.confirmation_pending {
            self.confirmation_pending = false;
            Some(self.container_width)
        } else {
            None
        }
    }

    /// Whether the container has been measured at least once.
    #[must_use]
    pub const fn is_measured(&self) -> bool {
        self.measured
    }

    /// Screen x of the container's left edge.
    #[must_use]
    pub const fn left(&self) -> f32 {
        self.left
    }

    /// Measured container width in pixels.
    #[must_use]
    pub const fn container_width(&self) -> f32 {
        self.container_width
    }

    /// Effective travel width (container width minus handle width).
    #[must_use]
    pub const fn travel(&self) -> f32 {
        self.travel
    }
}

/// Which draggable element a session is tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// The primary value handle.
    Handle,
    /// The in (left) trim marker.
    MarkerIn,
    /// The out (right) trim marker.
    MarkerOut,
}

impl DragKind {
    /// The global move-listener kind this drag registers.
    #[must_use]
    pub const fn move_listener(self) -> ListenerKind {
        match self {
            Self::Handle => ListenerKind::HandleMove,
            Self::MarkerIn => ListenerKind::MarkerInMove,
            Self::MarkerOut => ListenerKind::MarkerOutMove,
        }
    }
}

/// An open drag session: press received, release not yet seen.
///
/// Holds the surface registrations through a guard, so dropping the
/// session (on release or on teardown of the owning widget) releases
/// every listener kind.
#[derive(Debug)]
pub struct DragSession {
    kind: DragKind,
    start_fill_width: f32,
    touch: Option<TouchId>,
    _guard: SurfaceGuard,
}

impl DragSession {
    /// Open a session: registers the kind's move listener plus the
    /// shared release listener on the surface.
    #[must_use]
    pub fn open(
        kind: DragKind,
        surface: &InputSurface,
        start_fill_width: f32,
        touch: Option<TouchId>,
    ) -> Self {
        let guard = surface.acquire(&[kind.move_listener(), ListenerKind::Release]);
        Self {
            kind,
            start_fill_width,
            touch,
            _guard: guard,
        }
    }

    /// Which element this session is dragging.
    #[must_use]
    pub const fn kind(&self) -> DragKind {
        self.kind
    }

    /// Fill width captured when the session opened, the baseline for
    /// marker-drag width deltas.
    #[must_use]
    pub const fn start_fill_width(&self) -> f32 {
        self.start_fill_width
    }

    /// Whether this session was opened by a touch.
    #[must_use]
    pub const fn is_touch(&self) -> bool {
        self.touch.is_some()
    }

    /// Whether an event from the given touch belongs to this session.
    /// Mouse sessions ignore all touches.
    #[must_use]
    pub fn tracks_touch(&self, id: TouchId) -> bool {
        self.touch == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_starts_unmeasured() {
        let mut geometry = TrackGeometry::new();
        assert!(!geometry.is_measured());
        assert!(geometry.travel().abs() < f32::EPSILON);
        assert!(geometry.take_confirmation().is_none());
    }

    #[test]
    fn test_first_measure_arms_confirmation_once() {
        let mut geometry = TrackGeometry::new();
        geometry.measure(10.0, 200.0);

        assert!(geometry.is_measured());
        assert!((geometry.travel() - 180.0).abs() < f32::EPSILON);
        assert_eq!(geometry.take_confirmation(), Some(200.0));
        assert!(geometry.take_confirmation().is_none());
    }

    #[test]
    fn test_resize_recomputes_travel_without_rearming() {
        let mut geometry = TrackGeometry::new();
        geometry.measure(0.0, 200.0);
        let _ = geometry.take_confirmation();

        geometry.resize(300.0);
        assert!((geometry.travel() - 280.0).abs() < f32::EPSILON);
        assert!((geometry.container_width() - 300.0).abs() < f32::EPSILON);
        assert!(geometry.take_confirmation().is_none());
    }

    #[test]
    fn test_session_registers_move_and_release() {
        let surface = InputSurface::new();
        let session = DragSession::open(DragKind::MarkerIn, &surface, 40.0, None);

        assert!(surface.is_registered(ListenerKind::MarkerInMove));
        assert!(surface.is_registered(ListenerKind::Release));
        assert_eq!(surface.registered_count(), 2);
        assert!((session.start_fill_width() - 40.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_dropping_session_releases_all_listeners() {
        let surface = InputSurface::new();
        {
            let _session = DragSession::open(DragKind::Handle, &surface, 0.0, None);
            assert!(surface.has_any());
        }
        assert!(!surface.has_any());
    }

    #[test]
    fn test_touch_session_tracks_only_its_touch() {
        let surface = InputSurface::new();
        let session = DragSession::open(DragKind::Handle, &surface, 0.0, Some(TouchId::new(3)));

        assert!(session.is_touch());
        assert!(session.tracks_touch(TouchId::new(3)));
        assert!(!session.tracks_touch(TouchId::new(4)));
    }

    #[test]
    fn test_mouse_session_ignores_touches() {
        let surface = InputSurface::new();
        let session = DragSession::open(DragKind::Handle, &surface, 0.0, None);
        assert!(!session.tracks_touch(TouchId::new(0)));
    }
}
