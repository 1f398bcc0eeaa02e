//! Input events for widgets.
//!
//! The event model covers what an interactive track widget needs:
//! mouse buttons and movement, single-touch tracking, tap gestures
//! (for double-activation) and container resize notifications.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Input event types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Mouse moved to position
    MouseMove {
        /// New position
        position: Point,
    },
    /// Mouse button pressed
    MouseDown {
        /// Position of click
        position: Point,
        /// Button pressed
        button: MouseButton,
    },
    /// Mouse button released
    MouseUp {
        /// Position of release
        position: Point,
        /// Button released
        button: MouseButton,
    },
    /// Mouse entered widget bounds
    MouseEnter,
    /// Mouse left widget bounds
    MouseLeave,
    /// Touch started
    TouchStart {
        /// Touch identifier
        id: TouchId,
        /// Touch position
        position: Point,
    },
    /// Touch moved
    TouchMove {
        /// Touch identifier
        id: TouchId,
        /// New position
        position: Point,
    },
    /// Touch ended
    TouchEnd {
        /// Touch identifier
        id: TouchId,
        /// Final position
        position: Point,
    },
    /// Tap gesture (count = 1 single, 2 double)
    Tap {
        /// Position
        position: Point,
        /// Number of taps
        count: u8,
    },
    /// Container resized
    Resize {
        /// New width
        width: f32,
        /// New height
        height: f32,
    },
}

/// Touch identifier for tracking a single active touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct TouchId(pub u32);

impl TouchId {
    /// Create a new touch ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button (wheel click)
    Middle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tap_counts() {
        let single = Event::Tap {
            position: Point::ORIGIN,
            count: 1,
        };
        let double = Event::Tap {
            position: Point::ORIGIN,
            count: 2,
        };
        assert_ne!(single, double);
    }

    #[test]
    fn test_mouse_button_equality() {
        assert_eq!(MouseButton::Left, MouseButton::Left);
        assert_ne!(MouseButton::Left, MouseButton::Right);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let events = vec![
            Event::MouseMove {
                position: Point::new(1.0, 2.0),
            },
            Event::MouseDown {
                position: Point::new(1.0, 2.0),
                button: MouseButton::Left,
            },
            Event::MouseUp {
                position: Point::new(1.0, 2.0),
                button: MouseButton::Right,
            },
            Event::TouchStart {
                id: TouchId(1),
                position: Point::new(10.0, 20.0),
            },
            Event::TouchEnd {
                id: TouchId(1),
                position: Point::new(20.0, 30.0),
            },
            Event::Tap {
                position: Point::new(50.0, 50.0),
                count: 2,
            },
            Event::Resize {
                width: 800.0,
                height: 600.0,
            },
        ];

        for event in events {
            let json = serde_json::to_string(&event).unwrap();
            let deserialized: Event = serde_json::from_str(&json).unwrap();
            assert_eq!(event, deserialized);
        }
    }
}
