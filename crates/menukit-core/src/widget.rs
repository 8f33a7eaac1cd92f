//! Widget identity and the shared `Widget` trait.
//!
//! Menus and menu items never hold references to one another. Everything
//! that crosses a component boundary names its origin with a [`WidgetId`].
//!
//! # Examples
//!
//! ```
//! use menukit_core::WidgetId;
//!
//! let id = WidgetId::new(42);
//! assert_eq!(id.0, 42);
//!
//! let a = WidgetId::next();
//! let b = WidgetId::next();
//! assert_ne!(a, b);
//! ```

use crate::geometry::Rect;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WidgetId(pub u64);

impl WidgetId {
    /// Create a widget ID from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Allocate a fresh, process-unique ID.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Result of laying out a widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutResult {
    /// Computed size after layout
    pub size: crate::Size,
}

/// Accessible roles reported by menu components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccessibleRole {
    /// Generic element
    #[default]
    Generic,
    /// Menu container
    Menu,
    /// Plain menu item (command or submenu trigger)
    MenuItem,
    /// Checkable menu item
    MenuItemCheckbox,
    /// Radio menu item
    MenuItemRadio,
    /// Selectable option
    Option,
}

/// Behaviour shared by every menu component.
pub trait Widget: Send + Sync {
    /// Identity used as the origin of emitted signals.
    fn id(&self) -> WidgetId;

    /// Position self (and children) within allocated bounds.
    fn layout(&mut self, bounds: Rect) -> LayoutResult;

    /// Get the current bounds of this widget.
    fn bounds(&self) -> Rect;

    /// Check if this widget is interactive (can receive clicks).
    fn is_interactive(&self) -> bool {
        false
    }

    /// Get the accessible role.
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Generic
    }

    /// Get the test ID for this widget (if any).
    fn test_id(&self) -> Option<&str> {
        None
    }
}
