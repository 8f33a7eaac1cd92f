//! Error types for menukit.

use thiserror::Error;

/// Errors raised while constructing a menu component.
///
/// Construction either succeeds completely or returns one of these; no
/// partially configured component is ever handed out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The `mode` option is not one of the supported modes.
    #[error("invalid menu item mode '{mode}' (expected command, checkbox, radio, option or expander)")]
    InvalidMode {
        /// The rejected mode string
        mode: String,
    },

    /// Checkbox and radio items compare against their value, so they need one.
    #[error("{mode} menu item requires a value")]
    MissingValue {
        /// Mode of the offending item
        mode: &'static str,
    },
}
