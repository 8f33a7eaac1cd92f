//! Selectable menu entry.
//!
//! A [`MenuItem`] owns its [`ItemState`], reacts to clicks according to its
//! [`ItemMode`], and reports upward through [`Reaction`]s: at most one
//! protocol envelope for ancestors and at most one local event for the host.
//! It never touches its siblings; the enclosing [`Menu`] answers exclusivity
//! signals with directives, which arrive through [`Receiver::receive`].
//!
//! # Examples
//!
//! ```
//! use menukit_core::{ClickEvent, Signal};
//! use menukit_widgets::{MenuItem, MenuItemConfig};
//!
//! let mut item = MenuItem::new(MenuItemConfig::radio("Small", 1u32)).unwrap();
//! item.attach();
//!
//! let reaction = item.click(&mut ClickEvent::keyboard());
//! assert!(item.is_checked());
//! assert_eq!(
//!     reaction.signal.map(|env| env.signal),
//!     Some(Signal::RadioChecked { value: 1 })
//! );
//!
//! // Re-clicking a checked radio is silent.
//! assert!(item.click(&mut ClickEvent::keyboard()).is_none());
//! ```

use crate::item_state::{Checked, ItemMode, ItemState, ItemValue};
use crate::menu::{CheckedConfig, Dispatch, Menu};
use crate::render::{self, Chrome, RenderProps};
use menukit_core::{
    AccessibleRole, ClickEvent, ConfigError, Delivery, Directive, Envelope, LayoutResult,
    Listener, Rect, Receiver, Signal, SignalKind, Widget, WidgetId,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Height of a single-line item.
pub const ITEM_HEIGHT: f32 = 32.0;

/// Height of an item with a subtitle.
pub const ITEM_HEIGHT_WITH_SUBTITLE: f32 = 48.0;

fn default_mode() -> String {
    ItemMode::Command.as_str().to_string()
}

/// Construction-time options of a menu item.
///
/// `mode` stays a string until [`MenuItem::new`] validates it, so that
/// manifests and hand-built configs go through the same check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemConfig<V> {
    /// One of `command`, `checkbox`, `radio`, `option`, `expander`
    #[serde(default = "default_mode")]
    pub mode: String,
    /// Identity value
    #[serde(default = "Option::default")]
    pub value: Option<V>,
    /// Suppress all interaction
    #[serde(default)]
    pub disabled: bool,
    /// Open a submenu popover
    #[serde(default)]
    pub cascade: bool,
    /// Initially selected (option mode)
    #[serde(default)]
    pub selected: bool,
    /// Primary text
    #[serde(default)]
    pub title: String,
    /// Secondary text
    #[serde(default)]
    pub sub_title: Option<String>,
    /// Left slot glyph
    #[serde(default)]
    pub left_icon: Option<String>,
    /// Right slot glyph
    #[serde(default)]
    pub right_icon: Option<String>,
    /// Test ID
    #[serde(default)]
    pub test_id: Option<String>,
    /// Submenu entries (cascading items only)
    #[serde(default = "Vec::new")]
    pub submenu: Vec<MenuItemConfig<V>>,
    /// Initial checked state of the submenu group (cascading items only)
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub checked: Option<CheckedConfig<V>>,
}

impl<V> Default for MenuItemConfig<V> {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            value: None,
            disabled: false,
            cascade: false,
            selected: false,
            title: String::new(),
            sub_title: None,
            left_icon: None,
            right_icon: None,
            test_id: None,
            submenu: Vec::new(),
            checked: None,
        }
    }
}

impl<V> MenuItemConfig<V> {
    fn with_mode(mode: ItemMode, title: impl Into<String>, value: Option<V>) -> Self {
        Self {
            mode: mode.as_str().to_string(),
            title: title.into(),
            value,
            ..Self::default()
        }
    }

    /// Command item.
    #[must_use]
    pub fn command(title: impl Into<String>) -> Self {
        Self::with_mode(ItemMode::Command, title, None)
    }

    /// Checkbox item toggling `value`.
    #[must_use]
    pub fn checkbox(title: impl Into<String>, value: V) -> Self {
        Self::with_mode(ItemMode::Checkbox, title, Some(value))
    }

    /// Radio item checking `value`.
    #[must_use]
    pub fn radio(title: impl Into<String>, value: V) -> Self {
        Self::with_mode(ItemMode::Radio, title, Some(value))
    }

    /// Option item selecting `value`.
    #[must_use]
    pub fn option(title: impl Into<String>, value: V) -> Self {
        Self::with_mode(ItemMode::Option, title, Some(value))
    }

    /// Expander item without a popover.
    #[must_use]
    pub fn expander(title: impl Into<String>) -> Self {
        Self::with_mode(ItemMode::Expander, title, None)
    }

    /// Cascading item opening `items` in a popover.
    #[must_use]
    pub fn cascade(title: impl Into<String>, items: Vec<Self>) -> Self {
        Self {
            cascade: true,
            submenu: items,
            ..Self::command(title)
        }
    }

    /// Set the raw mode string.
    #[must_use]
    pub fn mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = mode.into();
        self
    }

    /// Set the identity value.
    #[must_use]
    pub fn value(mut self, value: V) -> Self {
        self.value = Some(value);
        self
    }

    /// Set disabled state.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Request a submenu popover.
    #[must_use]
    pub const fn with_cascade(mut self, cascade: bool) -> Self {
        self.cascade = cascade;
        self
    }

    /// Set initial selection (option mode).
    #[must_use]
    pub const fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Seed the submenu group's checked state.
    #[must_use]
    pub fn checked(mut self, checked: CheckedConfig<V>) -> Self {
        self.checked = Some(checked);
        self
    }

    /// Set subtitle.
    #[must_use]
    pub fn sub_title(mut self, sub_title: impl Into<String>) -> Self {
        self.sub_title = Some(sub_title.into());
        self
    }

    /// Put a glyph in the left slot.
    #[must_use]
    pub fn left_icon(mut self, icon: impl Into<String>) -> Self {
        self.left_icon = Some(icon.into());
        self
    }

    /// Put a glyph in the right slot.
    #[must_use]
    pub fn right_icon(mut self, icon: impl Into<String>) -> Self {
        self.right_icon = Some(icon.into());
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id = Some(id.into());
        self
    }
}

/// Payload of a `change` event.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent<V> {
    /// A checkbox toggled; `checked` is the group's new set
    Toggled {
        /// Value that was toggled
        value: V,
        /// Replacement set for the group
        checked: Arc<Vec<V>>,
    },
    /// A radio became checked
    Checked {
        /// Newly checked value
        value: V,
    },
    /// An option became selected
    Selected {
        /// Value of the selected option
        value: Option<V>,
    },
}

/// Local event fired to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemEvent<V> {
    /// A command item was clicked; carries the original click
    Click(ClickEvent),
    /// A checkbox, radio or option item changed
    Change(ChangeEvent<V>),
}

/// Outcome of one interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Reaction<V> {
    /// Protocol envelope for ancestors
    pub signal: Option<Envelope<V>>,
    /// Local event for the host
    pub event: Option<ItemEvent<V>>,
}

impl<V> Reaction<V> {
    /// Nothing happened.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            signal: None,
            event: None,
        }
    }

    /// Whether neither a signal nor an event was produced.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.signal.is_none() && self.event.is_none()
    }
}

impl<V> Default for Reaction<V> {
    fn default() -> Self {
        Self::none()
    }
}

/// A selectable menu entry.
#[derive(Debug)]
pub struct MenuItem<V> {
    id: WidgetId,
    state: ItemState<V>,
    title: String,
    sub_title: Option<String>,
    left_icon: Option<String>,
    right_icon: Option<String>,
    test_id_value: Option<String>,
    submenu: Option<Box<Menu<V>>>,
    bounds: Rect,
}

impl<V: ItemValue> MenuItem<V> {
    /// Build an item from its configuration.
    ///
    /// Validates the mode, applies the mode coercions and builds the
    /// submenu of cascading items.
    pub fn new(config: MenuItemConfig<V>) -> Result<Self, ConfigError> {
        let mode: ItemMode = config.mode.parse()?;
        let state = ItemState::new(
            mode,
            config.value,
            config.disabled,
            config.cascade,
            config.selected,
        )?;

        let submenu = if state.is_cascade() {
            let mut submenu = Menu::from_configs(config.submenu)?;
            if let Some(checked) = config.checked {
                submenu = submenu.with_checked(checked);
            }
            submenu.hide();
            Some(Box::new(submenu))
        } else {
            if !config.submenu.is_empty() {
                log::debug!(
                    "{mode} item '{}' ignores {} submenu entries",
                    config.title,
                    config.submenu.len()
                );
            }
            None
        };

        Ok(Self {
            id: WidgetId::next(),
            state,
            title: config.title,
            sub_title: config.sub_title,
            left_icon: config.left_icon,
            right_icon: config.right_icon,
            test_id_value: config.test_id,
            submenu,
            bounds: Rect::default(),
        })
    }

    /// Initialization notice for the enclosing container.
    #[must_use]
    pub fn inited(&self) -> Envelope<V> {
        self.envelope(Signal::Inited)
    }

    /// Finalize slot flags now that slot content is known.
    ///
    /// Returns the envelopes to pass upward: those that bubbled out of the
    /// submenu while it attached, then this item's `Attached` notice. A
    /// second call returns nothing.
    pub fn attach(&mut self) -> Vec<Envelope<V>> {
        let first = self
            .state
            .finalize_slots(self.left_icon.is_some(), self.right_icon.is_some());
        if !first {
            return Vec::new();
        }

        let escaped = self
            .submenu
            .as_deref_mut()
            .map(Menu::attach)
            .unwrap_or_default();
        let mut out: Vec<Envelope<V>> = escaped
            .into_iter()
            .filter_map(|envelope| menukit_core::deliver(&mut *self, envelope))
            .collect();
        out.push(self.envelope(Signal::Attached));
        out
    }

    /// Detach and discard the item, returning its `Detached` notice.
    ///
    /// Submenu items are detached first, so their group sees a `Detached`
    /// for every `Attached` it registered.
    #[must_use]
    pub fn detach(mut self) -> Envelope<V> {
        let nested = self.submenu.as_deref_mut().map_or(0, Menu::clear);
        log::trace!("menu item {} detached ({nested} submenu items)", self.id);
        self.envelope(Signal::Detached)
    }

    /// Handle a click.
    ///
    /// A disabled item swallows the click (stops propagation, prevents the
    /// default action) and reports nothing.
    pub fn click(&mut self, event: &mut ClickEvent) -> Reaction<V> {
        if self.state.is_disabled() {
            event.stop_propagation();
            event.prevent_default();
            return Reaction::none();
        }

        match self.state.mode() {
            ItemMode::Expander => {
                let open = !self.state.is_submenu_open();
                self.open_submenu(open);
                let signal = if open {
                    Signal::Expand
                } else {
                    Signal::Collapse
                };
                Reaction {
                    signal: Some(self.envelope(signal)),
                    event: None,
                }
            }
            ItemMode::Checkbox => {
                let Some(value) = self.state.value().cloned() else {
                    return Reaction::none();
                };
                let checked = self.state.checked().toggled(&value);
                self.state.set_checked(Checked::Set(Arc::clone(&checked)));
                Reaction {
                    signal: None,
                    event: Some(ItemEvent::Change(ChangeEvent::Toggled { value, checked })),
                }
            }
            ItemMode::Radio => {
                let Some(value) = self.state.value().cloned() else {
                    return Reaction::none();
                };
                if self.state.is_checked() {
                    return Reaction::none();
                }
                self.state.set_checked(Checked::Value(Some(value.clone())));
                Reaction {
                    signal: Some(self.envelope(Signal::RadioChecked {
                        value: value.clone(),
                    })),
                    event: Some(ItemEvent::Change(ChangeEvent::Checked { value })),
                }
            }
            ItemMode::Option => {
                if self.state.is_selected() {
                    return Reaction::none();
                }
                self.state.set_selected(true);
                let value = self.state.value().cloned();
                Reaction {
                    signal: Some(self.envelope(Signal::OptionSelected {
                        value: value.clone(),
                    })),
                    event: Some(ItemEvent::Change(ChangeEvent::Selected { value })),
                }
            }
            ItemMode::Command => Reaction {
                signal: Some(self.envelope(Signal::MenuCollapse)),
                event: Some(ItemEvent::Click(event.clone())),
            },
        }
    }

    /// Bound open flag of the submenu; the popover calls this when it closes
    /// itself (e.g. on an outside click).
    pub fn set_submenu_open(&mut self, open: bool) {
        self.open_submenu(open);
    }

    /// Enable or disable interaction.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.state.set_disabled(disabled);
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &ItemState<V> {
        &self.state
    }

    /// Interaction mode.
    #[must_use]
    pub const fn mode(&self) -> ItemMode {
        self.state.mode()
    }

    /// Identity value.
    #[must_use]
    pub const fn value(&self) -> Option<&V> {
        self.state.value()
    }

    /// Whether the item shows as checked.
    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.state.is_checked()
    }

    /// Whether this option is selected.
    #[must_use]
    pub const fn is_selected(&self) -> bool {
        self.state.is_selected()
    }

    /// Whether the submenu is open.
    #[must_use]
    pub const fn is_submenu_open(&self) -> bool {
        self.state.is_submenu_open()
    }

    /// Primary text.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Left slot glyph, shown only when the left slot is in use.
    #[must_use]
    pub fn left_icon(&self) -> Option<&str> {
        self.left_icon.as_deref().filter(|_| self.state.has_left())
    }

    /// Right slot glyph, if any.
    #[must_use]
    pub fn right_icon(&self) -> Option<&str> {
        self.right_icon.as_deref()
    }

    /// Submenu of a cascading item.
    #[must_use]
    pub fn submenu(&self) -> Option<&Menu<V>> {
        self.submenu.as_deref()
    }

    /// Mutable submenu of a cascading item.
    pub fn submenu_mut(&mut self) -> Option<&mut Menu<V>> {
        self.submenu.as_deref_mut()
    }

    /// Anchor accessor handed to the popover: this item's root rectangle.
    #[must_use]
    pub const fn anchor(&self) -> Rect {
        self.bounds
    }

    /// Preferred height.
    #[must_use]
    pub fn height(&self) -> f32 {
        match self.sub_title.as_deref() {
            Some(s) if !s.is_empty() => ITEM_HEIGHT_WITH_SUBTITLE,
            _ => ITEM_HEIGHT,
        }
    }

    /// Render inputs for the template collaborator.
    #[must_use]
    pub fn render_props(&self) -> RenderProps {
        render::render_props(&self.state, &self.title, self.sub_title.as_deref())
    }

    /// Mounted chrome (ripple, popover).
    #[must_use]
    pub fn chrome(&self) -> Chrome {
        render::chrome(&self.state, self.anchor())
    }

    /// Route a click into the submenu along `path`.
    ///
    /// Envelopes escaping the submenu pass through this item on their way up.
    pub(crate) fn click_submenu(
        &mut self,
        path: &[usize],
        event: &mut ClickEvent,
    ) -> Dispatch<V> {
        let Some(mut dispatch) = self
            .submenu
            .as_deref_mut()
            .map(|submenu| submenu.click_path(path, event))
        else {
            return Dispatch::default();
        };
        let escaped = std::mem::take(&mut dispatch.unhandled);
        dispatch.unhandled = escaped
            .into_iter()
            .filter_map(|envelope| menukit_core::deliver(&mut *self, envelope))
            .collect();
        dispatch
    }

    fn open_submenu(&mut self, open: bool) {
        self.state.set_submenu_open(open);
        if let Some(submenu) = self.submenu.as_deref_mut() {
            if open {
                submenu.show();
            } else {
                submenu.hide();
            }
        }
    }

    fn envelope(&self, signal: Signal<V>) -> Envelope<V> {
        Envelope::new(self.id, signal)
    }
}

/// A cascading item is the nearest ancestor of its submenu: a collapse
/// request from inside closes the popover and keeps bubbling.
impl<V: ItemValue> Listener<V> for MenuItem<V> {
    fn listens_to(&self, kind: SignalKind) -> bool {
        kind == SignalKind::MenuCollapse && self.state.is_cascade()
    }

    fn on_signal(&mut self, _envelope: &Envelope<V>) -> Delivery {
        self.state.set_submenu_open(false);
        Delivery::Bubble
    }
}

impl<V: ItemValue> Receiver<V> for MenuItem<V> {
    fn receiver_id(&self) -> WidgetId {
        self.id
    }

    fn receive(&mut self, directive: &Directive<V>) {
        match (self.state.mode(), directive) {
            (ItemMode::Radio, Directive::SyncRadio { value }) => {
                self.state.set_checked(Checked::Value(Some(value.clone())));
            }
            (ItemMode::Checkbox, Directive::SyncChecked { checked }) => {
                self.state.set_checked(Checked::Set(Arc::clone(checked)));
            }
            // The group never sends this to the origin, so any option that
            // receives it clears, whatever its value.
            (ItemMode::Option, Directive::Deselect { .. }) => {
                self.state.set_selected(false);
            }
            _ => {}
        }
    }
}

impl<V: ItemValue> Widget for MenuItem<V> {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn is_interactive(&self) -> bool {
        !self.state.is_disabled()
    }

    fn accessible_role(&self) -> AccessibleRole {
        match self.state.mode() {
            ItemMode::Command | ItemMode::Expander => AccessibleRole::MenuItem,
            ItemMode::Checkbox => AccessibleRole::MenuItemCheckbox,
            ItemMode::Radio => AccessibleRole::MenuItemRadio,
            ItemMode::Option => AccessibleRole::Option,
        }
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menukit_core::{MouseButton, Point};

    fn item(config: MenuItemConfig<u32>) -> MenuItem<u32> {
        let mut item = MenuItem::new(config).unwrap();
        item.attach();
        item
    }

    fn click(item: &mut MenuItem<u32>) -> Reaction<u32> {
        item.click(&mut ClickEvent::keyboard())
    }

    fn signal_of(reaction: &Reaction<u32>) -> Option<Signal<u32>> {
        reaction.signal.as_ref().map(|env| env.signal.clone())
    }

    // =========================================================================
    // Construction Tests
    // =========================================================================

    #[test]
    fn test_new_rejects_invalid_mode() {
        let err = MenuItem::new(MenuItemConfig::<u32>::command("Cut").mode("button")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMode { ref mode } if mode == "button"));
    }

    #[test]
    fn test_new_rejects_invalid_submenu_mode() {
        let config = MenuItemConfig::<u32>::cascade(
            "More",
            vec![MenuItemConfig::command("Nested").mode("bogus")],
        );
        assert!(MenuItem::new(config).is_err());
    }

    #[test]
    fn test_cascade_checkbox_stays_checkbox() {
        let item = item(MenuItemConfig::checkbox("Grid", 1).with_cascade(true));
        assert_eq!(item.mode(), ItemMode::Checkbox);
        assert!(!item.state().is_cascade());
        assert!(item.submenu().is_none());
        assert!(item.chrome().popover.is_none());
    }

    #[test]
    fn test_cascade_command_becomes_expander() {
        let item = item(MenuItemConfig::cascade(
            "More",
            vec![MenuItemConfig::command("Nested")],
        ));
        assert_eq!(item.mode(), ItemMode::Expander);
        assert_eq!(item.submenu().map(Menu::len), Some(1));
        assert!(item.state().has_right());
    }

    #[test]
    fn test_inited_and_attached_notices() {
        let mut item = MenuItem::new(MenuItemConfig::<u32>::command("Cut")).unwrap();
        assert_eq!(item.inited().signal, Signal::Inited);
        assert_eq!(item.inited().origin, item.id());

        let notices = item.attach();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].signal, Signal::Attached);
        assert!(item.attach().is_empty());
    }

    #[test]
    fn test_detach_notice() {
        let item = item(MenuItemConfig::command("Cut"));
        let id = item.id();
        let envelope = item.detach();
        assert_eq!(envelope, Envelope::new(id, Signal::Detached));
    }

    #[test]
    fn test_left_icon_slot() {
        let plain = item(MenuItemConfig::command("Cut").left_icon("content_cut"));
        assert!(plain.state().has_left());
        assert_eq!(plain.left_icon(), Some("content_cut"));

        let check = item(MenuItemConfig::checkbox("Grid", 1).left_icon("grid_on"));
        assert!(!check.state().has_left());
        assert_eq!(check.left_icon(), None);
    }

    #[test]
    fn test_right_icon_slot() {
        let item = item(MenuItemConfig::command("Cut").right_icon("keyboard"));
        assert!(item.state().has_right());
        assert!(item.render_props().main_style.min_width.is_some());
    }

    // =========================================================================
    // Disabled Tests
    // =========================================================================

    #[test]
    fn test_disabled_click_is_swallowed() {
        for config in [
            MenuItemConfig::command("A"),
            MenuItemConfig::checkbox("B", 1),
            MenuItemConfig::radio("C", 2),
            MenuItemConfig::option("D", 3),
            MenuItemConfig::expander("E"),
        ] {
            let mut item = item(config.disabled(true));
            let before = item.state().clone();
            let mut event = ClickEvent::at(Point::new(1.0, 1.0), MouseButton::Left);

            let reaction = item.click(&mut event);

            assert!(reaction.is_none());
            assert!(event.is_propagation_stopped());
            assert!(event.is_default_prevented());
            assert_eq!(*item.state(), before);
        }
    }

    #[test]
    fn test_set_disabled_reenables() {
        let mut item = item(MenuItemConfig::command("Cut").disabled(true));
        assert!(!item.is_interactive());
        item.set_disabled(false);
        assert!(item.is_interactive());
        assert!(!click(&mut item).is_none());
    }

    // =========================================================================
    // Mode Dispatch Tests
    // =========================================================================

    #[test]
    fn test_expander_toggles() {
        let mut item = item(MenuItemConfig::expander("More"));

        let opened = click(&mut item);
        assert!(item.is_submenu_open());
        assert_eq!(signal_of(&opened), Some(Signal::Expand));
        assert!(opened.event.is_none());

        let closed = click(&mut item);
        assert!(!item.is_submenu_open());
        assert_eq!(signal_of(&closed), Some(Signal::Collapse));
    }

    #[test]
    fn test_checkbox_toggle_is_own_inverse() {
        let mut item = item(MenuItemConfig::checkbox("Grid", 7));
        item.receive(&Directive::SyncChecked {
            checked: Arc::new(vec![3]),
        });

        let first = click(&mut item);
        assert!(item.is_checked());
        assert!(first.signal.is_none());
        assert!(matches!(
            first.event,
            Some(ItemEvent::Change(ChangeEvent::Toggled { value: 7, ref checked })) if **checked == vec![3, 7]
        ));

        let second = click(&mut item);
        assert!(!item.is_checked());
        assert!(matches!(second.event, Some(ItemEvent::Change(_))));
        assert_eq!(*item.state().checked(), Checked::Set(Arc::new(vec![3])));
    }

    #[test]
    fn test_radio_checks_once() {
        let mut item = item(MenuItemConfig::radio("Small", 1));
        item.receive(&Directive::SyncRadio { value: 2 });

        let reaction = click(&mut item);
        assert!(item.is_checked());
        assert_eq!(signal_of(&reaction), Some(Signal::RadioChecked { value: 1 }));
        assert_eq!(
            reaction.event,
            Some(ItemEvent::Change(ChangeEvent::Checked { value: 1 }))
        );

        assert!(click(&mut item).is_none());
    }

    #[test]
    fn test_option_selects_once() {
        let mut item = item(MenuItemConfig::option("Blue", 4));

        let reaction = click(&mut item);
        assert!(item.is_selected());
        assert_eq!(
            signal_of(&reaction),
            Some(Signal::OptionSelected { value: Some(4) })
        );
        assert!(item.render_props().main_class_name.contains("state-selected"));

        let revision = item.state().revision();
        assert!(click(&mut item).is_none());
        assert_eq!(item.state().revision(), revision);
    }

    #[test]
    fn test_command_fires_click_and_collapse() {
        let mut item = item(MenuItemConfig::command("Cut"));
        let mut event = ClickEvent::at(Point::new(3.0, 4.0), MouseButton::Left);

        let reaction = item.click(&mut event);

        assert_eq!(signal_of(&reaction), Some(Signal::MenuCollapse));
        assert_eq!(reaction.event, Some(ItemEvent::Click(event.clone())));
        assert!(!event.is_propagation_stopped());
    }

    // =========================================================================
    // Directive Tests
    // =========================================================================

    #[test]
    fn test_receive_sync_radio() {
        let mut item = item(MenuItemConfig::radio("Small", 1));
        item.receive(&Directive::SyncRadio { value: 1 });
        assert!(item.is_checked());
        item.receive(&Directive::SyncRadio { value: 2 });
        assert!(!item.is_checked());
    }

    #[test]
    fn test_receive_deselect_clears_any_value() {
        let mut same = item(MenuItemConfig::option("Blue", 4).selected(true));
        same.receive(&Directive::Deselect { value: Some(4) });
        assert!(!same.is_selected());

        let mut bare = item(MenuItemConfig::command("Plain").mode("option").selected(true));
        assert_eq!(bare.value(), None);
        bare.receive(&Directive::Deselect { value: None });
        assert!(!bare.is_selected());
    }

    #[test]
    fn test_receive_ignores_other_modes() {
        let mut item = item(MenuItemConfig::command("Cut"));
        let before = item.state().clone();
        item.receive(&Directive::SyncRadio { value: 1 });
        item.receive(&Directive::SyncChecked {
            checked: Arc::new(vec![1]),
        });
        item.receive(&Directive::Deselect { value: None });
        assert_eq!(*item.state(), before);
    }

    // =========================================================================
    // Popover Binding Tests
    // =========================================================================

    #[test]
    fn test_popover_reports_closure() {
        let mut item = item(MenuItemConfig::cascade("More", vec![]));
        click(&mut item);
        assert!(item.chrome().popover.is_some_and(|p| p.open));

        item.set_submenu_open(false);
        assert!(!item.is_submenu_open());
        assert!(item.chrome().popover.is_some_and(|p| !p.open));
    }

    #[test]
    fn test_anchor_is_layout_bounds() {
        let mut item = item(MenuItemConfig::cascade("More", vec![]));
        let bounds = Rect::new(0.0, 8.0, 200.0, ITEM_HEIGHT);
        item.layout(bounds);
        assert_eq!(item.anchor(), bounds);
        assert_eq!(item.chrome().popover.map(|p| p.anchor), Some(bounds));
    }

    #[test]
    fn test_accessible_roles() {
        assert_eq!(
            item(MenuItemConfig::checkbox("a", 1)).accessible_role(),
            AccessibleRole::MenuItemCheckbox
        );
        assert_eq!(
            item(MenuItemConfig::radio("a", 1)).accessible_role(),
            AccessibleRole::MenuItemRadio
        );
        assert_eq!(
            item(MenuItemConfig::option("a", 1)).accessible_role(),
            AccessibleRole::Option
        );
        assert_eq!(
            item(MenuItemConfig::command("a")).accessible_role(),
            AccessibleRole::MenuItem
        );
    }

    #[test]
    fn test_height_with_subtitle() {
        assert_eq!(item(MenuItemConfig::command("a")).height(), ITEM_HEIGHT);
        assert_eq!(
            item(MenuItemConfig::command("a").sub_title("b")).height(),
            ITEM_HEIGHT_WITH_SUBTITLE
        );
    }

    #[test]
    fn test_config_deserialize_defaults() {
        let config: MenuItemConfig<u32> =
            serde_json::from_str(r#"{"title": "Cut", "sub_title": "Ctrl+X"}"#).unwrap();
        assert_eq!(config.mode, "command");
        assert!(!config.disabled);
        assert!(config.submenu.is_empty());
        let item = MenuItem::new(config).unwrap();
        assert_eq!(item.title(), "Cut");
    }
}
