//! Integration tests for menukit-yaml.
//!
//! These tests load manifests and drive the resulting menus end-to-end.

use menukit_core::{ClickEvent, SignalKind};
use menukit_widgets::{ItemMode, Menu};
use menukit_yaml::{load, CheckedConfig, MenuManifest, ParseError};

const FORMAT_MENU: &str = r"
width: 260
checked: [bold]
items:
  - { mode: checkbox, title: Bold, value: bold }
  - { mode: checkbox, title: Italic, value: italic }
  - mode: command
    title: Clear formatting
    sub_title: Removes all styles
    left_icon: format_clear
  - title: Size
    cascade: true
    submenu:
      - { mode: radio, title: Small, value: small }
      - { mode: radio, title: Large, value: large }
";

// =============================================================================
// Manifest Integration Tests
// =============================================================================

#[test]
fn test_load_format_menu() {
    let menu = load(FORMAT_MENU).expect("valid manifest");

    assert_eq!(menu.len(), 4);
    assert!(menu.items()[0].is_checked());
    assert!(!menu.items()[1].is_checked());
    assert_eq!(menu.items()[2].left_icon(), Some("format_clear"));
    assert_eq!(menu.items()[3].mode(), ItemMode::Expander);
    assert_eq!(menu.items()[3].submenu().map(Menu::len), Some(2));
}

#[test]
fn test_manifest_checked_is_a_set() {
    let manifest = MenuManifest::from_yaml(FORMAT_MENU).expect("valid manifest");
    assert_eq!(
        manifest.checked,
        Some(CheckedConfig::Set(vec!["bold".to_string()]))
    );
}

#[test]
fn test_loaded_menu_is_interactive() {
    let mut menu = load(FORMAT_MENU).expect("valid manifest");
    assert!(menu.attach().is_empty());

    menu.click(1, &mut ClickEvent::keyboard());
    assert_eq!(
        **menu.checked_values(),
        vec!["bold".to_string(), "italic".to_string()]
    );

    menu.click(3, &mut ClickEvent::keyboard());
    menu.click_path(&[3, 1], &mut ClickEvent::keyboard());
    let size = menu.items()[3].submenu().expect("submenu");
    assert_eq!(size.checked_value().map(String::as_str), Some("large"));

    let dispatch = menu.click(2, &mut ClickEvent::keyboard());
    assert_eq!(dispatch.unhandled_kinds(), vec![SignalKind::MenuCollapse]);
    assert!(!menu.is_open());
}

// =============================================================================
// Error Integration Tests
// =============================================================================

#[test]
fn test_load_rejects_invalid_mode() {
    let err = load("items: [ { title: X, mode: toggle } ]").unwrap_err();
    assert!(matches!(err, ParseError::Config(_)));
    assert!(err.to_string().contains("'toggle'"));
}

#[test]
fn test_load_rejects_bad_shape() {
    let err = load("items: { title: X }").unwrap_err();
    assert!(matches!(err, ParseError::Yaml(_)));
}
