//! Data model of a single menu entry and its pure derivations.

use menukit_core::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Values a menu item can carry: comparable, cloneable, shareable.
pub trait ItemValue: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {}

impl<T> ItemValue for T where T: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {}

/// Interaction mode of a menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemMode {
    /// Fires a click and closes the menu
    #[default]
    Command,
    /// Toggles membership of its value in a shared set
    Checkbox,
    /// Checks its value, unchecking the rest of the group
    Radio,
    /// Selects itself, deselecting the rest of the group
    Option,
    /// Opens and closes a submenu
    Expander,
}

impl ItemMode {
    /// Mode name as used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Option => "option",
            Self::Expander => "expander",
        }
    }

    /// Checkbox and radio items draw a check glyph in the left slot.
    #[must_use]
    pub const fn is_checkable(self) -> bool {
        matches!(self, Self::Checkbox | Self::Radio)
    }
}

impl fmt::Display for ItemMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "command" => Ok(Self::Command),
            "checkbox" => Ok(Self::Checkbox),
            "radio" => Ok(Self::Radio),
            "option" => Ok(Self::Option),
            "expander" => Ok(Self::Expander),
            other => Err(ConfigError::InvalidMode {
                mode: other.to_string(),
            }),
        }
    }
}

/// Group-owned checked state as seen by one item.
///
/// Checkbox groups share a set, radio groups share a single value. The set
/// is never edited in place: writers build a new `Arc` and replace it.
#[derive(Debug, Clone, PartialEq)]
pub enum Checked<V> {
    /// Values checked in a checkbox group
    Set(Arc<Vec<V>>),
    /// Value checked in a radio group
    Value(Option<V>),
}

impl<V> Checked<V> {
    /// Empty checkbox set.
    #[must_use]
    pub fn empty_set() -> Self {
        Self::Set(Arc::new(Vec::new()))
    }
}

impl<V: ItemValue> Checked<V> {
    /// Set with `value` added if absent, removed if present.
    ///
    /// A radio value is treated as a set of at most one element.
    #[must_use]
    pub fn toggled(&self, value: &V) -> Arc<Vec<V>> {
        let current: Vec<V> = match self {
            Self::Set(set) => set.as_ref().clone(),
            Self::Value(v) => v.iter().cloned().collect(),
        };
        let next = if current.contains(value) {
            current.into_iter().filter(|v| v != value).collect()
        } else {
            let mut next = current;
            next.push(value.clone());
            next
        };
        Arc::new(next)
    }
}

/// Whether an item shows as checked.
///
/// Checkbox: `value` is a member of the set. Radio: `value` equals the
/// checked value. Every other mode is never checked.
#[must_use]
pub fn compute_is_checked<V: PartialEq>(mode: ItemMode, value: Option<&V>, checked: &Checked<V>) -> bool {
    match (mode, value, checked) {
        (ItemMode::Checkbox, Some(value), Checked::Set(set)) => set.contains(value),
        (ItemMode::Radio, Some(value), Checked::Value(Some(current))) => current == value,
        _ => false,
    }
}

/// Visual affordances derived from slot content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayFlags {
    /// Apply the minimum-width style to the main element
    pub main_min_width: bool,
    /// Show the left icon slot
    pub left_visible: bool,
    /// Show the right icon slot
    pub right_visible: bool,
}

/// Derive display flags from the slot flags.
#[must_use]
pub const fn compute_display_flags(has_left: bool, has_right: bool) -> DisplayFlags {
    DisplayFlags {
        main_min_width: has_left || has_right,
        left_visible: has_left,
        right_visible: has_right,
    }
}

/// Mode-dependent state of one menu entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemState<V> {
    mode: ItemMode,
    value: Option<V>,
    disabled: bool,
    cascade: bool,
    selected: bool,
    checked: Checked<V>,
    has_left: bool,
    has_right: bool,
    submenu_open: bool,
    slots_final: bool,
    revision: u64,
}

impl<V: ItemValue> ItemState<V> {
    /// Build the initial state and apply the mode coercions.
    ///
    /// Checkbox and radio items never cascade. A cascading item of any other
    /// mode becomes an expander. Only option items keep `selected`.
    pub fn new(
        mode: ItemMode,
        value: Option<V>,
        disabled: bool,
        cascade: bool,
        selected: bool,
    ) -> Result<Self, ConfigError> {
        if mode.is_checkable() && value.is_none() {
            return Err(ConfigError::MissingValue {
                mode: mode.as_str(),
            });
        }

        let (mode, cascade) = if mode.is_checkable() {
            (mode, false)
        } else if cascade {
            (ItemMode::Expander, true)
        } else {
            (mode, false)
        };

        let checked = match mode {
            ItemMode::Checkbox => Checked::empty_set(),
            _ => Checked::Value(None),
        };

        Ok(Self {
            mode,
            value,
            disabled,
            cascade,
            selected: selected && mode == ItemMode::Option,
            checked,
            has_left: false,
            has_right: false,
            submenu_open: false,
            slots_final: false,
            revision: 0,
        })
    }

    /// Fix the slot flags once the item's children are known.
    ///
    /// Returns `false` (and changes nothing) if they were already fixed.
    pub fn finalize_slots(&mut self, left_supplied: bool, right_supplied: bool) -> bool {
        if self.slots_final {
            return false;
        }
        if !self.mode.is_checkable() {
            self.has_left = left_supplied;
        }
        self.has_right = self.cascade || right_supplied;
        self.slots_final = true;
        self.touch();
        true
    }

    /// Interaction mode.
    #[must_use]
    pub const fn mode(&self) -> ItemMode {
        self.mode
    }

    /// Identity value.
    #[must_use]
    pub const fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Whether interaction is suppressed.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Whether the item hosts a submenu popover.
    #[must_use]
    pub const fn is_cascade(&self) -> bool {
        self.cascade
    }

    /// Whether this option is the group's current choice.
    #[must_use]
    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    /// Group-owned checked state as last seen.
    #[must_use]
    pub const fn checked(&self) -> &Checked<V> {
        &self.checked
    }

    /// Left slot holds content.
    #[must_use]
    pub const fn has_left(&self) -> bool {
        self.has_left
    }

    /// Right slot holds content.
    #[must_use]
    pub const fn has_right(&self) -> bool {
        self.has_right
    }

    /// Whether the submenu is open.
    #[must_use]
    pub const fn is_submenu_open(&self) -> bool {
        self.submenu_open
    }

    /// Monotonic counter bumped by every mutation; renderers compare it to
    /// decide whether to re-render.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether the item shows as checked.
    #[must_use]
    pub fn is_checked(&self) -> bool {
        compute_is_checked(self.mode, self.value.as_ref(), &self.checked)
    }

    /// Display flags for the current slot state.
    #[must_use]
    pub const fn display_flags(&self) -> DisplayFlags {
        compute_display_flags(self.has_left, self.has_right)
    }

    pub(crate) fn set_disabled(&mut self, disabled: bool) {
        if self.disabled != disabled {
            self.disabled = disabled;
            self.touch();
        }
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        if self.selected != selected {
            self.selected = selected;
            self.touch();
        }
    }

    pub(crate) fn set_checked(&mut self, checked: Checked<V>) {
        if self.checked != checked {
            self.checked = checked;
            self.touch();
        }
    }

    pub(crate) fn set_submenu_open(&mut self, open: bool) {
        if self.submenu_open != open {
            self.submenu_open = open;
            self.touch();
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}
