//! Menu container and group authority.
//!
//! A [`Menu`] is the nearest shared ancestor of its items. It owns the
//! group's checked state, answers `RadioChecked` and `OptionSelected` by
//! broadcasting directives to the other items, closes itself on
//! `MenuCollapse`, and keeps a registry of attached items. `Expand` and
//! `Collapse` are not its business and travel on to the host.

use crate::item_state::ItemValue;
use crate::menu_item::{ChangeEvent, ItemEvent, MenuItem, MenuItemConfig};
use crate::render::SUBMENU_OFFSET_X;
use menukit_core::{
    broadcast, deliver, AccessibleRole, ClickEvent, ConfigError, Delivery, Directive, Envelope,
    Event, Key, LayoutResult, Listener, Point, Receiver, Rect, Signal, SignalKind, Widget,
    WidgetId,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default menu width.
pub const DEFAULT_WIDTH: f32 = 200.0;

/// Vertical padding above the first and below the last item.
pub const MENU_PADDING: f32 = 8.0;

/// Everything one interaction produced that the host should see.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch<V> {
    /// Local events, tagged with the item that fired them
    pub events: Vec<(WidgetId, ItemEvent<V>)>,
    /// Envelopes no ancestor consumed
    pub unhandled: Vec<Envelope<V>>,
    /// The menu closed itself while handling the interaction
    pub closed: bool,
}

impl<V> Default for Dispatch<V> {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            unhandled: Vec::new(),
            closed: false,
        }
    }
}

impl<V> Dispatch<V> {
    /// Whether nothing reached the host.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.unhandled.is_empty() && !self.closed
    }

    /// Kinds of the unhandled envelopes, oldest first.
    #[must_use]
    pub fn unhandled_kinds(&self) -> Vec<SignalKind> {
        self.unhandled.iter().map(Envelope::kind).collect()
    }
}

/// Initial checked state of a group: a list seeds a checkbox group, a
/// scalar a radio group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CheckedConfig<V> {
    /// Checkbox group set
    Set(Vec<V>),
    /// Radio group value
    Value(V),
}

/// A group of menu items.
#[derive(Debug)]
pub struct Menu<V> {
    id: WidgetId,
    items: Vec<MenuItem<V>>,
    open: bool,
    width: f32,
    checked_set: Arc<Vec<V>>,
    checked_value: Option<V>,
    registered: Vec<WidgetId>,
    test_id_value: Option<String>,
    bounds: Rect,
    highlighted_index: Option<usize>,
}

impl<V: ItemValue> Default for Menu<V> {
    fn default() -> Self {
        Self {
            id: WidgetId::next(),
            items: Vec::new(),
            open: true,
            width: DEFAULT_WIDTH,
            checked_set: Arc::new(Vec::new()),
            checked_value: None,
            registered: Vec::new(),
            test_id_value: None,
            bounds: Rect::default(),
            highlighted_index: None,
        }
    }
}

impl<V: ItemValue> Menu<V> {
    /// Create an empty, open menu.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a menu from item configurations.
    ///
    /// Fails on the first invalid entry; nothing is built in that case.
    pub fn from_configs(configs: Vec<MenuItemConfig<V>>) -> Result<Self, ConfigError> {
        let mut menu = Self::new();
        for config in configs {
            menu.push(MenuItem::new(config)?);
        }
        Ok(menu)
    }

    /// Add an item. The item adopts the group's checked state.
    #[must_use]
    pub fn item(mut self, item: MenuItem<V>) -> Self {
        self.push(item);
        self
    }

    /// Set menu width.
    #[must_use]
    pub const fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Seed the checkbox group's checked set.
    #[must_use]
    pub fn with_checked_values(mut self, values: Vec<V>) -> Self {
        self.replace_checked_set(Arc::new(values), None);
        self
    }

    /// Seed the radio group's checked value.
    #[must_use]
    pub fn with_checked_value(mut self, value: V) -> Self {
        self.checked_value = Some(value.clone());
        let directive = Directive::SyncRadio { value };
        for item in &mut self.items {
            item.receive(&directive);
        }
        self
    }

    /// Seed the group from a configured checked state.
    #[must_use]
    pub fn with_checked(self, checked: CheckedConfig<V>) -> Self {
        match checked {
            CheckedConfig::Set(values) => self.with_checked_values(values),
            CheckedConfig::Value(value) => self.with_checked_value(value),
        }
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Append an item to an existing menu.
    ///
    /// An option arriving selected while another option already is gets
    /// deselected: the first selected option wins.
    pub fn push(&mut self, mut item: MenuItem<V>) {
        item.receive(&Directive::SyncChecked {
            checked: Arc::clone(&self.checked_set),
        });
        if let Some(value) = self.checked_value.clone() {
            item.receive(&Directive::SyncRadio { value });
        }
        let selected = item.is_selected();
        if let Some(kept) = self.items.iter().find(|other| selected && other.is_selected()) {
            log::debug!(
                "menu {}: option '{}' already selected, clearing '{}'",
                self.id,
                kept.title(),
                item.title()
            );
            item.receive(&Directive::Deselect {
                value: kept.value().cloned(),
            });
        }
        let inited = item.inited();
        self.items.push(item);
        let _ = deliver(&mut *self, inited);
    }

    /// Attach every item, returning what bubbled out of the group.
    pub fn attach(&mut self) -> Vec<Envelope<V>> {
        let mut escaped = Vec::new();
        for index in 0..self.items.len() {
            let notices = self.items[index].attach();
            for envelope in notices {
                escaped.extend(deliver(&mut *self, envelope));
            }
        }
        escaped
    }

    /// Detach and drop the item with `id`.
    ///
    /// Returns `false` if no such item exists.
    pub fn remove(&mut self, id: WidgetId) -> bool {
        let Some(index) = self.items.iter().position(|item| item.id() == id) else {
            return false;
        };
        let item = self.items.remove(index);
        let _ = deliver(&mut *self, item.detach());
        self.highlighted_index = None;
        true
    }

    /// Detach and drop every item, submenu items included.
    ///
    /// Returns the number of items removed from this menu.
    pub fn clear(&mut self) -> usize {
        let items = std::mem::take(&mut self.items);
        let count = items.len();
        for item in items {
            let _ = deliver(&mut *self, item.detach());
        }
        self.highlighted_index = None;
        count
    }

    /// Open the menu.
    pub fn show(&mut self) {
        self.open = true;
        self.highlighted_index = None;
    }

    /// Close the menu.
    pub fn hide(&mut self) {
        self.open = false;
        self.highlighted_index = None;
    }

    /// Toggle the menu.
    pub fn toggle(&mut self) {
        if self.open {
            self.hide();
        } else {
            self.show();
        }
    }

    /// Check if menu is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Get highlighted index.
    #[must_use]
    pub const fn highlighted_index(&self) -> Option<usize> {
        self.highlighted_index
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the menu has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in display order.
    #[must_use]
    pub fn items(&self) -> &[MenuItem<V>] {
        &self.items
    }

    /// Item at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&MenuItem<V>> {
        self.items.get(index)
    }

    /// Mutable item at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut MenuItem<V>> {
        self.items.get_mut(index)
    }

    /// Ids of the items that announced attachment and have not detached.
    #[must_use]
    pub fn registered(&self) -> &[WidgetId] {
        &self.registered
    }

    /// The checkbox group's checked set.
    #[must_use]
    pub const fn checked_values(&self) -> &Arc<Vec<V>> {
        &self.checked_set
    }

    /// The radio group's checked value.
    #[must_use]
    pub const fn checked_value(&self) -> Option<&V> {
        self.checked_value.as_ref()
    }

    /// Click the item at `index`.
    pub fn click(&mut self, index: usize, event: &mut ClickEvent) -> Dispatch<V> {
        self.click_path(&[index], event)
    }

    /// Click an item in a nested submenu.
    ///
    /// `path` lists item indices from this menu downward. Envelopes leaving
    /// a submenu pass through its cascading item, then through this menu.
    pub fn click_path(&mut self, path: &[usize], event: &mut ClickEvent) -> Dispatch<V> {
        let (id, was_open) = (self.id, self.open);
        let Some((&index, rest)) = path.split_first() else {
            return Dispatch::default();
        };
        let Some(item) = self.items.get_mut(index) else {
            log::debug!("menu {id} has no item at index {index}");
            return Dispatch::default();
        };

        let mut dispatch = if rest.is_empty() {
            let origin = item.id();
            let reaction = item.click(event);
            let mut dispatch = Dispatch::default();
            if let Some(item_event) = reaction.event {
                self.lift(origin, &item_event);
                dispatch.events.push((origin, item_event));
            }
            if let Some(envelope) = reaction.signal {
                dispatch.unhandled.extend(deliver(&mut *self, envelope));
            }
            dispatch
        } else {
            let mut dispatch = item.click_submenu(rest, event);
            let escaped = std::mem::take(&mut dispatch.unhandled);
            for envelope in escaped {
                dispatch.unhandled.extend(deliver(&mut *self, envelope));
            }
            dispatch
        };
        dispatch.closed |= was_open && !self.open;
        dispatch
    }

    /// Handle pointer and keyboard input.
    ///
    /// Input is ignored while the menu is closed.
    pub fn event(&mut self, event: &Event) -> Dispatch<V> {
        if !self.open {
            return Dispatch::default();
        }

        match event {
            Event::MouseDown { position, button } => {
                if let Some(path) = self.hit_path(position) {
                    let mut click = ClickEvent::at(*position, *button);
                    return self.click_path(&path, &mut click);
                }
                if !self.contains_point(position) {
                    return self.close();
                }
            }
            Event::MouseMove { position } => {
                self.highlighted_index = self
                    .items
                    .iter()
                    .position(|item| item.bounds().hits(position));
            }
            Event::KeyDown { key } => match key {
                Key::Escape => return self.close(),
                Key::Up => {
                    self.highlighted_index = self.next_selectable(self.highlighted_index, false);
                }
                Key::Down => {
                    self.highlighted_index = self.next_selectable(self.highlighted_index, true);
                }
                Key::Enter | Key::Space => {
                    if let Some(index) = self.highlighted_index {
                        return self.click(index, &mut ClickEvent::keyboard());
                    }
                }
                Key::Tab => {}
            },
            Event::FocusOut => return self.close(),
        }

        Dispatch::default()
    }

    /// Total height of the laid-out panel.
    fn calculate_menu_height(&self) -> f32 {
        let items_height: f32 = self.items.iter().map(MenuItem::height).sum();
        items_height + MENU_PADDING * 2.0
    }

    fn close(&mut self) -> Dispatch<V> {
        self.hide();
        Dispatch {
            closed: true,
            ..Dispatch::default()
        }
    }

    fn contains_point(&self, point: &Point) -> bool {
        self.bounds.contains_point(point)
            || self
                .items
                .iter()
                .filter_map(MenuItem::submenu)
                .any(|submenu| submenu.is_open() && submenu.contains_point(point))
    }

    /// Index path of the item under `point`, searching open submenus too.
    ///
    /// Stacked items share a boundary; a point on it belongs to the lower one.
    fn hit_path(&self, point: &Point) -> Option<Vec<usize>> {
        if let Some(index) = self
            .items
            .iter()
            .position(|item| item.bounds().hits(point))
        {
            return Some(vec![index]);
        }

        self.items.iter().enumerate().find_map(|(index, item)| {
            let submenu = item.submenu().filter(|_| item.is_submenu_open())?;
            let mut path = submenu.hit_path(point)?;
            path.insert(0, index);
            Some(path)
        })
    }

    /// Find next enabled item, wrapping around.
    fn next_selectable(&self, from: Option<usize>, forward: bool) -> Option<usize> {
        let len = self.items.len();
        if len == 0 {
            return None;
        }

        let step = |i: usize| {
            if forward {
                (i + 1) % len
            } else {
                (i + len - 1) % len
            }
        };
        let start = from.map_or(if forward { 0 } else { len - 1 }, step);

        let mut index = start;
        for _ in 0..len {
            if self.items[index].is_interactive() {
                return Some(index);
            }
            index = step(index);
        }

        None
    }

    /// Store a lifted checkbox set and push it to the other items.
    fn lift(&mut self, origin: WidgetId, event: &ItemEvent<V>) {
        if let ItemEvent::Change(ChangeEvent::Toggled { checked, .. }) = event {
            self.replace_checked_set(Arc::clone(checked), Some(origin));
        }
    }

    fn replace_checked_set(&mut self, checked: Arc<Vec<V>>, origin: Option<WidgetId>) {
        self.checked_set = Arc::clone(&checked);
        let directive = Directive::SyncChecked { checked };
        match origin {
            Some(origin) => {
                broadcast(self.items.iter_mut(), origin, &directive);
            }
            None => {
                for item in &mut self.items {
                    item.receive(&directive);
                }
            }
        }
    }
}

impl<V: ItemValue> Listener<V> for Menu<V> {
    fn listens_to(&self, kind: SignalKind) -> bool {
        kind.is_lifecycle()
            || matches!(
                kind,
                SignalKind::RadioChecked | SignalKind::OptionSelected | SignalKind::MenuCollapse
            )
    }

    fn on_signal(&mut self, envelope: &Envelope<V>) -> Delivery {
        let origin = envelope.origin;
        match &envelope.signal {
            Signal::Inited => {
                log::trace!("menu {} saw item {origin} initialize", self.id);
                Delivery::Consumed
            }
            Signal::Attached => {
                if !self.registered.contains(&origin) {
                    self.registered.push(origin);
                }
                Delivery::Consumed
            }
            Signal::Detached => {
                self.registered.retain(|id| *id != origin);
                Delivery::Consumed
            }
            Signal::RadioChecked { value } => {
                self.checked_value = Some(value.clone());
                let directive = Directive::SyncRadio {
                    value: value.clone(),
                };
                let count = broadcast(self.items.iter_mut(), origin, &directive);
                log::debug!("menu {}: radio {value:?} checked, synced {count} items", self.id);
                Delivery::Consumed
            }
            Signal::OptionSelected { value } => {
                let directive = Directive::Deselect {
                    value: value.clone(),
                };
                let count = broadcast(self.items.iter_mut(), origin, &directive);
                log::debug!("menu {}: option {value:?} selected, notified {count} items", self.id);
                Delivery::Consumed
            }
            Signal::MenuCollapse => {
                self.hide();
                Delivery::Bubble
            }
            Signal::Expand | Signal::Collapse => Delivery::Bubble,
        }
    }
}

impl<V: ItemValue> Widget for Menu<V> {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = Rect::new(bounds.x, bounds.y, self.width, self.calculate_menu_height());

        let mut y = bounds.y + MENU_PADDING;
        for item in &mut self.items {
            let height = item.height();
            let item_bounds = Rect::new(bounds.x, y, self.width, height);
            item.layout(item_bounds);
            if let Some(submenu) = item.submenu_mut() {
                let corner = item_bounds.top_right();
                let width = submenu.width;
                submenu.layout(Rect::new(
                    corner.x + SUBMENU_OFFSET_X,
                    corner.y - MENU_PADDING,
                    width,
                    0.0,
                ));
            }
            y += height;
        }

        LayoutResult {
            size: self.bounds.size(),
        }
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn is_interactive(&self) -> bool {
        self.open
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Menu
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }
}
