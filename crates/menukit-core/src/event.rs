//! Input events for menu components.

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
    /// Key pressed
    KeyDown {
        /// Key pressed
        key: Key,
    },
    /// Widget lost focus
    FocusOut,
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

/// Keyboard keys menus react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Enter / Return
    Enter,
    /// Space bar
    Space,
    /// Escape
    Escape,
    /// Arrow up
    Up,
    /// Arrow down
    Down,
    /// Tab
    Tab,
}

/// A click delivered to a single component.
///
/// Carries the browser-style propagation flags: a component that swallows
/// the click marks it with [`ClickEvent::stop_propagation`] and
/// [`ClickEvent::prevent_default`], and the host honours both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickEvent {
    /// Pointer position, if the click came from a pointer
    pub position: Option<Point>,
    /// Button used (keyboard activation reports `Left`)
    pub button: MouseButton,
    propagation_stopped: bool,
    default_prevented: bool,
}

impl ClickEvent {
    /// Click from a pointer at `position`.
    #[must_use]
    pub const fn at(position: Point, button: MouseButton) -> Self {
        Self {
            position: Some(position),
            button,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    /// Synthetic click from keyboard activation.
    #[must_use]
    pub const fn keyboard() -> Self {
        Self {
            position: None,
            button: MouseButton::Left,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    /// Stop the click from reaching ancestor handlers.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Suppress the host's default action for this click.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether propagation was stopped.
    #[must_use]
    pub const fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Whether the default action was prevented.
    #[must_use]
    pub const fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

impl Default for ClickEvent {
    fn default() -> Self {
        Self::keyboard()
    }
}
