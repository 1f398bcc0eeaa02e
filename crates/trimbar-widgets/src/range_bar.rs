//! Range-selection widget: a draggable value handle plus optional
//! in/out trim markers bounding a sub-range, with a fill indicator.
//!
//! The handle reports a whole-number value in [0, 100]. Markers are
//! tracked in pixels against the rendered container width, so the two
//! units deliberately differ. Boundary violations freeze the dragged
//! element at its last valid position instead of clamping, so motion
//! resumes only once the pointer re-enters the valid range.

use serde::{Deserialize, Serialize};
use std::any::Any;
use trimbar_core::{
    widget::LayoutResult, Canvas, Color, Constraints, Event, InputSurface, MouseButton, Point,
    Rect, Size, TouchId, TypeId, Widget,
};

use crate::mapping;
use crate::session::{DragKind, DragSession, TrackGeometry};

/// Which trim-marker controls the bar renders and hit-tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MarkerConfig {
    /// No markers; the bar is a plain value slider.
    #[default]
    None,
    /// Only the in (left) marker.
    InOnly,
    /// Only the out (right) marker.
    OutOnly,
    /// Both markers.
    Both,
}

impl MarkerConfig {
    /// Whether the in-marker control exists.
    #[must_use]
    pub const fn has_in(self) -> bool {
        matches!(self, Self::InOnly | Self::Both)
    }

    /// Whether the out-marker control exists.
    #[must_use]
    pub const fn has_out(self) -> bool {
        matches!(self, Self::OutOnly | Self::Both)
    }
}

/// Which draggable element produced a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    /// The primary value handle.
    Handle,
    /// The in trim marker.
    MarkerIn,
    /// The out trim marker.
    MarkerOut,
}

/// Message emitted by [`RangeBar::event`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeEvent {
    /// A handle-drag session opened. `value` is `Some` when the press
    /// landed on the track and jumped the handle in the same gesture.
    DragStarted {
        /// Value of the accepted jump move, if any.
        value: Option<f32>,
    },
    /// An accepted move changed the value.
    Changed {
        /// The new whole-number value in [0, 100].
        value: f32,
        /// Which element was dragged.
        source: DragSource,
    },
    /// Double-tap on a marker reset both markers to full range.
    Reset {
        /// The reported value (always 0).
        value: f32,
    },
    /// The active drag session closed.
    DragEnded,
}

/// Rendered positions projected from state and geometry.
///
/// Written by the drag handlers and the external value sync; read only
/// by `paint`. Owns no state of its own.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RangeVisual {
    /// Left edge of the fill, relative to the track.
    pub fill_left: f32,
    /// Width of the fill rectangle.
    pub fill_width: f32,
    /// Left edge of the handle, relative to the track.
    pub handle_x: f32,
}

/// Range-selection widget.
#[derive(Serialize, Deserialize)]
pub struct RangeBar {
    /// Current value (externally owned, overridden during drags)
    value: f32,
    /// Whether drags report and update; false = display-only
    interactive: bool,
    /// Which marker controls exist
    markers: MarkerConfig,
    /// Track background color
    track_color: Color,
    /// Fill indicator color
    fill_color: Color,
    /// Handle color
    handle_color: Color,
    /// Marker color
    marker_color: Color,
    /// Test ID
    test_id_value: Option<String>,
    /// Cached bounds
    #[serde(skip)]
    bounds: Rect,
    /// Measured track geometry
    #[serde(skip)]
    geometry: TrackGeometry,
    /// In-marker pixel offset
    #[serde(skip)]
    marker_in: f32,
    /// Out-marker pixel offset
    #[serde(skip)]
    marker_out: f32,
    /// Rendered positions
    #[serde(skip)]
    visual: RangeVisual,
    /// Shared pointer-listener registry
    #[serde(skip)]
    surface: InputSurface,
    /// Active drag session, if any
    #[serde(skip)]
    session: Option<DragSession>,
}

impl Default for RangeBar {
    fn default() -> Self {
        Self::new()
    }
}

impl RangeBar {
    /// Create a new display-only range bar at value 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            value: 0.0,
            interactive: false,
            markers: MarkerConfig::None,
            track_color: Color::new(0.15, 0.15, 0.17, 1.0),
            fill_color: Color::new(0.2, 0.6, 1.0, 1.0),
            handle_color: Color::WHITE,
            marker_color: Color::new(0.792, 0.835, 0.859, 1.0),
            test_id_value: None,
            bounds: Rect::default(),
            geometry: TrackGeometry::new(),
            marker_in: 0.0,
            marker_out: 0.0,
            visual: RangeVisual::default(),
            surface: InputSurface::new(),
            session: None,
        }
    }

    /// Set the initial value.
    #[must_use]
    pub fn value(mut self, value: f32) -> Self {
        self.value = value.clamp(0.0, 100.0).round();
        self
    }

    /// Enable or disable interaction. A non-interactive bar ignores
    /// every gesture and acts as a read-only indicator.
    #[must_use]
    pub const fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Choose which trim markers the bar carries.
    #[must_use]
    pub const fn markers(mut self, markers: MarkerConfig) -> Self {
        self.markers = markers;
        self
    }

    /// Set track background color.
    #[must_use]
    pub const fn track_color(mut self, color: Color) -> Self {
        self.track_color = color;
        self
    }

    /// Set fill indicator color.
    #[must_use]
    pub const fn fill_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    /// Set handle color.
    #[must_use]
    pub const fn handle_color(mut self, color: Color) -> Self {
        self.handle_color = color;
        self
    }

    /// Set marker color.
    #[must_use]
    pub const fn marker_color(mut self, color: Color) -> Self {
        self.marker_color = color;
        self
    }

    /// Register drag listeners on an externally owned surface, so the
    /// owner can observe registrations and verify release on teardown.
    #[must_use]
    pub fn with_surface(mut self, surface: InputSurface) -> Self {
        self.surface = surface;
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Get the current value.
    #[must_use]
    pub const fn get_value(&self) -> f32 {
        self.value
    }

    /// Get the in-marker pixel offset.
    #[must_use]
    pub const fn marker_in_offset(&self) -> f32 {
        self.marker_in
    }

    /// Get the out-marker pixel offset.
    #[must_use]
    pub const fn marker_out_offset(&self) -> f32 {
        self.marker_out
    }

    /// Get the currently rendered positions.
    #[must_use]
    pub const fn visual(&self) -> RangeVisual {
        self.visual
    }

    /// Whether a drag session is open.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Apply an externally supplied value change (seek/reset).
    ///
    /// Triggers only on an actual change; setting the same value twice
    /// is a no-op. The computed handle offset is checked against the
    /// marker bounds (with a small forgiving margin past the out
    /// marker); an out-of-bounds seek records the value but leaves the
    /// rendered positions at their last valid state.
    pub fn set_value(&mut self, value: f32) {
        if (value - self.value).abs() < f32::EPSILON {
            return;
        }
        self.value = value;

        if !self.interactive || !self.geometry.is_measured() {
            return;
        }

        let width = self.geometry.container_width();
        let offset = mapping::offset_from_value(value, width, mapping::MARKER_MEDIAN);
        if offset < self.marker_in || offset > self.marker_out + mapping::SYNC_MARGIN {
            return;
        }

        self.visual.fill_width = if self.marker_in > 0.0 {
            offset - self.marker_in
        } else {
            offset
        };
        self.visual.handle_x = offset.max(mapping::MARKER_MEDIAN);
    }

    /// Fill width under the markers' invariant: from the in-marker to
    /// the far edge of the out-marker.
    fn marker_fill_width(&self) -> f32 {
        (self.marker_out + mapping::MARKER_WIDTH) - self.marker_in
    }

    /// Collect the deferred geometry confirmation, seating the
    /// out-marker at the settled container's far edge.
    fn settle_geometry(&mut self) {
        if let Some(width) = self.geometry.take_confirmation() {
            self.marker_out = width;
        }
    }

    fn handle_rect(&self) -> Rect {
        Rect::new(
            self.bounds.x + self.visual.handle_x,
            self.bounds.y,
            mapping::HANDLE_WIDTH,
            self.bounds.height,
        )
    }

    fn marker_in_rect(&self) -> Rect {
        Rect::new(
            self.bounds.x + self.marker_in,
            self.bounds.y,
            mapping::MARKER_WIDTH,
            self.bounds.height,
        )
    }

    fn marker_out_rect(&self) -> Rect {
        // The out offset can sit at the full container width (its
        // initial seat); the control itself renders inside the track.
        let max_x = self.geometry.container_width() - mapping::MARKER_WIDTH;
        Rect::new(
            self.bounds.x + self.marker_out.min(max_x),
            self.bounds.y,
            mapping::MARKER_WIDTH,
            self.bounds.height,
        )
    }

    fn hits_a_marker(&self, position: &Point) -> bool {
        (self.markers.has_in() && self.marker_in_rect().contains_point(position))
            || (self.markers.has_out() && self.marker_out_rect().contains_point(position))
    }

    /// Open a session for a press at `position`, emitting the opening
    /// message if any. Presses while a session is already open are
    /// ignored.
    fn press(&mut self, position: &Point, touch: Option<TouchId>) -> Option<RangeEvent> {
        if self.session.is_some() {
            return None;
        }

        if self.markers.has_in() && self.marker_in_rect().contains_point(position) {
            self.session = Some(DragSession::open(
                DragKind::MarkerIn,
                &self.surface,
                self.visual.fill_width,
                touch,
            ));
            return None;
        }

        if self.markers.has_out() && self.marker_out_rect().contains_point(position) {
            self.session = Some(DragSession::open(
                DragKind::MarkerOut,
                &self.surface,
                self.visual.fill_width,
                touch,
            ));
            return None;
        }

        if self.handle_rect().contains_point(position) {
            self.session = Some(DragSession::open(
                DragKind::Handle,
                &self.surface,
                self.visual.fill_width,
                touch,
            ));
            return Some(RangeEvent::DragStarted { value: None });
        }

        if self.bounds.contains_point(position) {
            // Track press: jump the handle with an immediate move. A
            // rejected jump opens no session at all.
            let value = self.handle_move(position)?;
            self.session = Some(DragSession::open(
                DragKind::Handle,
                &self.surface,
                self.visual.fill_width,
                touch,
            ));
            return Some(RangeEvent::DragStarted { value: Some(value) });
        }

        None
    }

    /// Process a handle move. Returns the new value on accept, `None`
    /// when the offset falls at or beyond either marker bound.
    fn handle_move(&mut self, position: &Point) -> Option<f32> {
        let offset = mapping::pointer_offset(position.x, self.geometry.left());
        if offset <= self.marker_in || offset >= self.marker_out {
            return None;
        }

        let value = mapping::value_from_offset(offset, self.geometry.travel());
        self.value = value;
        self.visual.fill_left = self.marker_in;
        self.visual.fill_width = offset - self.marker_in;
        self.visual.handle_x = offset;
        Some(value)
    }

    /// Process an in-marker move. The new offset is scaled against the
    /// `(width - marker_width)` path and rejected when it would come
    /// within one marker width of the out-marker.
    fn marker_in_move(&mut self, position: &Point) -> Option<f32> {
        let offset = mapping::pointer_offset(position.x, self.geometry.left());
        let value = mapping::value_from_offset(offset, self.geometry.travel());
        let left =
            mapping::offset_from_value(value, self.geometry.container_width(), mapping::MARKER_WIDTH);

        if left >= self.marker_out - mapping::MARKER_WIDTH {
            return None;
        }

        self.marker_in = left;
        // The fill restarts at the new in-edge; it grows again only
        // from subsequent handle drags.
        self.visual.fill_left = left;
        self.visual.fill_width = 0.0;
        Some(value)
    }

    /// Process an out-marker move, symmetric to the in-marker.
    fn marker_out_move(&mut self, position: &Point) -> Option<f32> {
        let offset = mapping::pointer_offset(position.x, self.geometry.left());
        let value = mapping::value_from_offset(offset, self.geometry.travel());
        let new_out =
            mapping::offset_from_value(value, self.geometry.container_width(), mapping::MARKER_WIDTH);

        if new_out < self.marker_in + mapping::MARKER_WIDTH {
            return None;
        }

        self.marker_out = new_out;
        self.visual.fill_width = self.marker_fill_width();
        Some(value)
    }

    /// Dispatch a move to the active session's handler.
    fn session_move(&mut self, position: &Point) -> Option<RangeEvent> {
        let kind = self.session.as_ref().map(DragSession::kind)?;
        if !self.surface.is_registered(kind.move_listener()) {
            return None;
        }

        match kind {
            DragKind::Handle => self.handle_move(position).map(|value| RangeEvent::Changed {
                value,
                source: DragSource::Handle,
            }),
            DragKind::MarkerIn => {
                self.marker_in_move(position)
                    .map(|value| RangeEvent::Changed {
                        value,
                        source: DragSource::MarkerIn,
                    })
            }
            DragKind::MarkerOut => {
                self.marker_out_move(position)
                    .map(|value| RangeEvent::Changed {
                        value,
                        source: DragSource::MarkerOut,
                    })
            }
        }
    }

    /// Close the active session. Dropping it releases its surface
    /// registrations; the extra unregister covers listeners left by a
    /// session other than the expected one.
    fn release(&mut self) -> Option<RangeEvent> {
        self.session.take()?;
        self.surface.unregister_all();
        Some(RangeEvent::DragEnded)
    }

    /// Reset both markers to the full range and report value 0. Valid
    /// from any state, including mid-drag.
    fn reset_markers(&mut self) -> RangeEvent {
        self.session = None;
        self.surface.unregister_all();
        self.marker_in = 0.0;
        self.marker_out = self.geometry.container_width();
        self.value = 0.0;
        self.visual.fill_left = 0.0;
        self.visual.fill_width = 0.0;
        RangeEvent::Reset { value: 0.0 }
    }

    fn boxed(event: RangeEvent) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(event))
    }
}

impl Widget for RangeBar {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let preferred = Size::new(200.0, mapping::HANDLE_WIDTH);
        constraints.constrain(preferred)
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        // Collect a confirmation armed by a previous pass before
        // re-measuring, so the out-marker seats on settled geometry.
        self.settle_geometry();
        self.bounds = bounds;
        self.geometry.measure(bounds.x, bounds.width);
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.bounds, self.track_color);

        let fill = Rect::new(
            self.bounds.x + self.visual.fill_left,
            self.bounds.y,
            self.visual.fill_width.max(0.0),
            self.bounds.height,
        );
        canvas.fill_rect(fill, self.fill_color);

        if self.markers.has_in() {
            canvas.fill_rect(self.marker_in_rect(), self.marker_color);
        }
        if self.markers.has_out() {
            canvas.fill_rect(self.marker_out_rect(), self.marker_color);
        }

        canvas.fill_rect(self.handle_rect(), self.handle_color);
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if let Event::Resize { width, .. } = event {
            self.geometry.resize(*width);
            return None;
        }

        self.settle_geometry();

        if !self.interactive {
            return None;
        }

        match event {
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => self.press(position, None).and_then(Self::boxed),
            Event::TouchStart { id, position } => {
                self.press(position, Some(*id)).and_then(Self::boxed)
            }
            Event::MouseMove { position } => {
                if self.session.as_ref().is_some_and(DragSession::is_touch) {
                    return None;
                }
                self.session_move(position).and_then(Self::boxed)
            }
            Event::TouchMove { id, position } => {
                if !self
                    .session
                    .as_ref()
                    .is_some_and(|session| session.tracks_touch(*id))
                {
                    return None;
                }
                self.session_move(position).and_then(Self::boxed)
            }
            Event::MouseUp { .. } => {
                if self.session.as_ref().is_some_and(DragSession::is_touch) {
                    return None;
                }
                self.release().and_then(Self::boxed)
            }
            Event::TouchEnd { id, .. } => {
                if !self
                    .session
                    .as_ref()
                    .is_some_and(|session| session.tracks_touch(*id))
                {
                    return None;
                }
                self.release().and_then(Self::boxed)
            }
            Event::Tap { position, count: 2 } => {
                if self.hits_a_marker(position) {
                    let reset = self.reset_markers();
                    Self::boxed(reset)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut []
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
