//! Core types and traits for the Trimbar widget toolkit.
//!
//! This crate provides the foundations the widget crate builds on:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`] with hex parsing
//! - Layout constraints: [`Constraints`]
//! - Input events: [`Event`], [`MouseButton`], [`TouchId`]
//! - The [`Widget`] and [`Canvas`] traits, plus [`RecordingCanvas`]
//!   for asserting on paint output in tests
//! - The [`InputSurface`] pointer-listener registry drags register on

mod canvas;
mod color;
mod constraints;
mod draw;
mod event;
mod geometry;
mod surface;
pub mod widget;

pub use canvas::RecordingCanvas;
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use draw::{BoxStyle, DrawCommand, LineCap, LineJoin, StrokeStyle};
pub use event::{Event, MouseButton, TouchId};
pub use geometry::{Point, Rect, Size};
pub use surface::{InputSurface, ListenerKind, SurfaceGuard};
pub use widget::{Canvas, LayoutResult, TypeId, Widget};
