//! Render adapter: turns item state into the inputs the template collaborator
//! consumes, plus the mount decisions for ripple and popover chrome.

use crate::item_state::{ItemState, ItemValue};
use menukit_core::Rect;
use serde::{Deserialize, Serialize};

/// Class-name prefix shared by every menu part.
pub const CLASS_PREFIX: &str = "sm";

/// Minimum width applied when either icon slot is in use.
pub const MIN_WIDTH_WITH_SLOTS: &str = "10rem";

/// Horizontal offset of the submenu popover from its anchor.
pub const SUBMENU_OFFSET_X: f32 = 2.0;

/// Builds `block`, `block-variant-*` and `state-*` class lists.
#[derive(Debug, Clone)]
pub struct ClassName {
    block: String,
    variants: Vec<String>,
    states: Vec<String>,
}

impl ClassName {
    /// Start a class list for `block` (e.g. `"menu-item"`).
    #[must_use]
    pub fn new(block: &str) -> Self {
        Self {
            block: format!("{CLASS_PREFIX}-{block}"),
            variants: Vec::new(),
            states: Vec::new(),
        }
    }

    /// Add a variant class when `on`.
    #[must_use]
    pub fn variant(mut self, name: &str, on: bool) -> Self {
        if on {
            self.variants.push(format!("{}-variant-{name}", self.block));
        }
        self
    }

    /// Add a state class when `on`.
    #[must_use]
    pub fn state(mut self, name: &str, on: bool) -> Self {
        if on {
            self.states.push(format!("state-{name}"));
        }
        self
    }

    /// Class name of a child part (`sm-menu-item-title`).
    #[must_use]
    pub fn part(&self, name: &str) -> String {
        format!("{}-{name}", self.block)
    }

    /// Space-separated class list.
    #[must_use]
    pub fn build(&self) -> String {
        let mut classes = Vec::with_capacity(1 + self.variants.len() + self.states.len());
        classes.push(self.block.as_str());
        classes.extend(self.variants.iter().map(String::as_str));
        classes.extend(self.states.iter().map(String::as_str));
        classes.join(" ")
    }
}

/// CSS `display` of an icon slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Display {
    /// Leave display to the stylesheet
    #[default]
    #[serde(rename = "")]
    Inherit,
    /// Hide the slot
    #[serde(rename = "none")]
    None,
}

/// Inline style of the main element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MainStyle {
    /// `min-width`, when set
    #[serde(rename = "min-width", skip_serializing_if = "Option::is_none")]
    pub min_width: Option<&'static str>,
}

impl MainStyle {
    /// Inline CSS, or `None` when no style applies.
    #[must_use]
    pub fn to_css(&self) -> Option<String> {
        self.min_width.map(|w| format!("min-width: {w}"))
    }
}

/// Inline style of an icon slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IconStyle {
    /// Slot display
    pub display: Display,
}

impl IconStyle {
    const fn visible(visible: bool) -> Self {
        Self {
            display: if visible {
                Display::Inherit
            } else {
                Display::None
            },
        }
    }

    /// Inline CSS, or `None` when the slot is visible.
    #[must_use]
    pub fn to_css(&self) -> Option<String> {
        match self.display {
            Display::Inherit => None,
            Display::None => Some("display: none".to_string()),
        }
    }
}

/// Everything the template collaborator needs for one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderProps {
    /// Class list of the main element
    pub main_class_name: String,
    /// Inline style of the main element
    pub main_style: MainStyle,
    /// Inline style of the left icon slot
    pub left_icon_style: IconStyle,
    /// Inline style of the right icon slot
    pub right_icon_style: IconStyle,
    /// Draw the check glyph
    pub is_checked: bool,
    /// Primary text
    pub title: String,
    /// Secondary text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_title: Option<String>,
}

/// Where the popover attaches to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnchorOrigin {
    /// Top-left corner
    #[serde(rename = "tl")]
    TopLeft,
    /// Top-right corner
    #[default]
    #[serde(rename = "tr")]
    TopRight,
    /// Bottom-left corner
    #[serde(rename = "bl")]
    BottomLeft,
    /// Bottom-right corner
    #[serde(rename = "br")]
    BottomRight,
}

/// Mount parameters for the submenu popover.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopoverProps {
    /// Bound open flag; the popover reports closure back through
    /// `MenuItem::set_submenu_open`
    pub open: bool,
    /// Anchor rectangle (the item's root element)
    pub anchor: Rect,
    /// Anchor corner
    pub anchor_origin: AnchorOrigin,
    /// Horizontal offset from the anchor
    pub offset_x: f32,
}

/// Which collaborators are mounted around the item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Chrome {
    /// Touch ripple, mounted for enabled items
    pub ripple: bool,
    /// Submenu popover, mounted for cascading items
    pub popover: Option<PopoverProps>,
}

/// Compute render inputs for `state`.
pub fn render_props<V: ItemValue>(
    state: &ItemState<V>,
    title: &str,
    sub_title: Option<&str>,
) -> RenderProps {
    let flags = state.display_flags();
    let class = ClassName::new("menu-item")
        .variant("with-left-icon", state.has_left())
        .state("selected", state.is_selected());

    RenderProps {
        main_class_name: class.build(),
        main_style: MainStyle {
            min_width: flags.main_min_width.then_some(MIN_WIDTH_WITH_SLOTS),
        },
        left_icon_style: IconStyle::visible(flags.left_visible),
        right_icon_style: IconStyle::visible(flags.right_visible),
        is_checked: state.is_checked(),
        title: title.to_string(),
        sub_title: sub_title.filter(|s| !s.is_empty()).map(str::to_string),
    }
}

/// Compute chrome mounts for `state` anchored at `anchor`.
pub fn chrome<V: ItemValue>(state: &ItemState<V>, anchor: Rect) -> Chrome {
    Chrome {
        ripple: !state.is_disabled(),
        popover: state.is_cascade().then(|| PopoverProps {
            open: state.is_submenu_open(),
            anchor,
            anchor_origin: AnchorOrigin::TopRight,
            offset_x: SUBMENU_OFFSET_X,
        }),
    }
}
