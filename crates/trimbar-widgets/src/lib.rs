//! Widget implementations for the Trimbar toolkit.
//!
//! The centerpiece is [`RangeBar`]: a value handle plus optional trim
//! markers over a shared track, driven by a single-session pointer
//! state machine. The coordinate math lives in [`mapping`] as pure
//! functions; drag-session and geometry state live in [`session`].

pub mod mapping;
pub mod range_bar;
pub mod session;

pub use range_bar::{DragSource, MarkerConfig, RangeBar, RangeEvent, RangeVisual};
pub use session::{DragKind, DragSession, TrackGeometry};
