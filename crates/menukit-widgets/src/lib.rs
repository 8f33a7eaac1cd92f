//! Menu widgets for menukit.

pub mod item_state;
pub mod menu;
pub mod menu_item;
pub mod render;

pub use item_state::{
    compute_display_flags, compute_is_checked, Checked, DisplayFlags, ItemMode, ItemState,
    ItemValue,
};
pub use menu::{CheckedConfig, Dispatch, Menu};
pub use menu_item::{ChangeEvent, ItemEvent, MenuItem, MenuItemConfig, Reaction};
pub use render::{AnchorOrigin, Chrome, ClassName, IconStyle, MainStyle, PopoverProps, RenderProps};
