//! YAML menu manifest types.

use crate::error::ParseError;
use menukit_core::ConfigError;
use menukit_widgets::{Menu, MenuItemConfig};
use serde::{Deserialize, Serialize};

/// Menu manifest loaded from YAML.
///
/// `checked` seeds the top-level group. A cascading item carries its own
/// `checked` for the group inside its submenu.
///
/// ```yaml
/// width: 240
/// checked: small
/// items:
///   - { mode: radio, title: Small, value: small }
///   - { mode: radio, title: Large, value: large }
///   - title: Show
///     cascade: true
///     checked: [grid]
///     submenu:
///       - { mode: checkbox, title: Grid, value: grid }
///       - { mode: checkbox, title: Rulers, value: rulers }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuManifest {
    /// Menu width
    #[serde(default = "default_width")]
    pub width: f32,
    /// Initial checked state of the top-level group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<CheckedConfig>,
    /// Menu entries
    #[serde(default)]
    pub items: Vec<MenuItemConfig<String>>,
}

fn default_width() -> f32 {
    200.0
}

/// Initial checked state with string values.
pub type CheckedConfig = menukit_widgets::CheckedConfig<String>;

impl MenuManifest {
    /// Parse a manifest from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ParseError> {
        let manifest: Self = serde_yaml_ng::from_str(yaml)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, ParseError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check values serde cannot check.
    fn validate(&self) -> Result<(), ParseError> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(ParseError::InvalidValue {
                field: "width".to_string(),
                message: format!("must be a positive number, got {}", self.width),
            });
        }
        Ok(())
    }

    /// Build and attach the menu tree.
    ///
    /// Every item, nested ones included, is validated; the first invalid
    /// entry fails the whole build.
    pub fn build(&self) -> Result<Menu<String>, ConfigError> {
        let mut menu = Menu::from_configs(self.items.clone())?.width(self.width);
        if let Some(checked) = self.checked.clone() {
            menu = menu.with_checked(checked);
        }
        let escaped = menu.attach();
        log::debug!(
            "built menu with {} items from manifest ({} signals escaped)",
            menu.len(),
            escaped.len()
        );
        Ok(menu)
    }
}

/// Parse a manifest and build its menu in one step.
pub fn load(yaml: &str) -> Result<Menu<String>, ParseError> {
    Ok(MenuManifest::from_yaml(yaml)?.build()?)
}
