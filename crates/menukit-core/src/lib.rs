//! Core types and traits for menukit.
//!
//! This crate provides foundational types used throughout menukit:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Input: [`Event`], [`ClickEvent`]
//! - Identity and the [`Widget`] trait
//! - The bubbling signal protocol: [`Signal`], [`Envelope`], [`Listener`],
//!   [`Directive`], [`Receiver`]
//! - Construction errors: [`ConfigError`]

mod error;
mod event;
mod geometry;
pub mod signal;
pub mod widget;

pub use error::ConfigError;
pub use event::{ClickEvent, Event, Key, MouseButton};
pub use geometry::{Point, Rect, Size};
pub use signal::{
    broadcast, bubble, deliver, Delivery, Directive, Envelope, Listener, Receiver, Signal,
    SignalKind, SignalLog,
};
pub use widget::{AccessibleRole, LayoutResult, Widget, WidgetId};
