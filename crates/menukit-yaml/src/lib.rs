//! YAML manifest loader for menukit menus.

mod error;
mod manifest;

pub use error::ParseError;
pub use manifest::{load, CheckedConfig, MenuManifest};
