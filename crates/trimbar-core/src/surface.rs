//! Shared pointer-input subscription surface.
//!
//! Drag gestures outlive the widget bounds they start in: once a drag is
//! open, move and release events must keep arriving even when the pointer
//! leaves the widget. That requires registering listeners on a surface
//! that is global to the widget, and releasing them deterministically on
//! every exit path, including teardown of a widget mid-drag.
//!
//! The surface is a registration table, not a callback bus: a widget
//! records which listener kinds it currently holds, and its event handler
//! consults the table to decide whether a global move/release event is
//! addressed to it.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Kinds of global listener a drag session may register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Pointer-move listener for a handle drag.
    HandleMove,
    /// Pointer-move listener for an in-marker drag.
    MarkerInMove,
    /// Pointer-move listener for an out-marker drag.
    MarkerOutMove,
    /// Pointer-release listener (shared by all drag kinds).
    Release,
}

impl ListenerKind {
    /// All listener kinds, in registration-table order.
    pub const ALL: [Self; 4] = [
        Self::HandleMove,
        Self::MarkerInMove,
        Self::MarkerOutMove,
        Self::Release,
    ];
}

/// Shared listener registration table.
///
/// Cloning yields another handle onto the same table, so a widget and
/// its owner can both observe (and release) the registrations.
#[derive(Debug, Clone, Default)]
pub struct InputSurface {
    inner: Arc<Mutex<HashSet<ListenerKind>>>,
}

impl InputSurface {
    /// Create a new surface with no registrations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener kind.
    pub fn register(&self, kind: ListenerKind) {
        if let Ok(mut set) = self.inner.lock() {
            set.insert(kind);
        }
    }

    /// Unregister a single listener kind.
    pub fn unregister(&self, kind: ListenerKind) {
        if let Ok(mut set) = self.inner.lock() {
            set.remove(&kind);
        }
    }

    /// Unregister every listener kind.
    ///
    /// Release handlers call this rather than removing only the active
    /// session's listeners, so a session that is not the expected one
    /// cannot orphan its registrations.
    pub fn unregister_all(&self) {
        if let Ok(mut set) = self.inner.lock() {
            set.clear();
        }
    }

    /// Check whether a listener kind is registered.
    #[must_use]
    pub fn is_registered(&self, kind: ListenerKind) -> bool {
        self.inner.lock().map_or(false, |set| set.contains(&kind))
    }

    /// Number of currently registered listener kinds.
    #[must_use]
    pub fn registered_count(&self) -> usize {
        self.inner.lock().map_or(0, |set| set.len())
    }

    /// Check whether any listener is registered.
    #[must_use]
    pub fn has_any(&self) -> bool {
        self.registered_count() > 0
    }

    /// Register the given kinds and return a guard that releases the
    /// whole table when dropped.
    #[must_use]
    pub fn acquire(&self, kinds: &[ListenerKind]) -> SurfaceGuard {
        for kind in kinds {
            self.register(*kind);
        }
        SurfaceGuard {
            surface: self.clone(),
        }
    }
}

/// Scoped handle over a set of surface registrations.
///
/// Dropping the guard unregisters every listener kind, so teardown of
/// the owning widget mid-drag cannot leave dangling registrations.
#[derive(Debug)]
#[must_use = "dropping the guard releases the registrations"]
pub struct SurfaceGuard {
    surface: InputSurface,
}

impl SurfaceGuard {
    /// The surface this guard releases on drop.
    #[must_use]
    pub fn surface(&self) -> &InputSurface {
        &self.surface
    }
}

impl Drop for SurfaceGuard {
    fn drop(&mut self) {
        self.surface.unregister_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_surface_has_no_registrations() {
        let surface = InputSurface::new();
        assert!(!surface.has_any());
        assert_eq!(surface.registered_count(), 0);
    }

    #[test]
    fn test_register_and_unregister() {
        let surface = InputSurface::new();
        surface.register(ListenerKind::HandleMove);
        surface.register(ListenerKind::Release);

        assert!(surface.is_registered(ListenerKind::HandleMove));
        assert!(surface.is_registered(ListenerKind::Release));
        assert!(!surface.is_registered(ListenerKind::MarkerInMove));

        surface.unregister(ListenerKind::HandleMove);
        assert!(!surface.is_registered(ListenerKind::HandleMove));
        assert_eq!(surface.registered_count(), 1);
    }

    #[test]
    fn test_register_is_idempotent() {
        let surface = InputSurface::new();
        surface.register(ListenerKind::MarkerInMove);
        surface.register(ListenerKind::MarkerInMove);
        assert_eq!(surface.registered_count(), 1);
    }

    #[test]
    fn test_unregister_all_clears_every_kind() {
        let surface = InputSurface::new();
        for kind in ListenerKind::ALL {
            surface.register(kind);
        }
        assert_eq!(surface.registered_count(), 4);

        surface.unregister_all();
        assert!(!surface.has_any());
    }

    #[test]
    fn test_clones_share_the_table() {
        let surface = InputSurface::new();
        let other = surface.clone();

        surface.register(ListenerKind::MarkerOutMove);
        assert!(other.is_registered(ListenerKind::MarkerOutMove));

        other.unregister_all();
        assert!(!surface.has_any());
    }

    #[test]
    fn test_guard_registers_on_acquire() {
        let surface = InputSurface::new();
        let guard = surface.acquire(&[ListenerKind::HandleMove, ListenerKind::Release]);
        assert!(guard.surface().is_registered(ListenerKind::HandleMove));
        assert_eq!(surface.registered_count(), 2);
    }

    #[test]
    fn test_guard_drop_releases_everything() {
        let surface = InputSurface::new();
        {
            let _guard = surface.acquire(&[ListenerKind::MarkerInMove, ListenerKind::Release]);
            assert!(surface.has_any());
        }
        assert!(!surface.has_any());
    }
}
