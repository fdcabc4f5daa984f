//! Error types for the theme store.

use thiserror::Error;

/// Theme-related errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThemeError {
    /// A stored or supplied theme value is not one of `dark`, `light`, `system`.
    #[error("invalid theme `{0}`, expected one of: dark, light, system")]
    InvalidTheme(String),

    /// The storage backend failed.
    #[error("theme storage error: {0}")]
    Storage(String),
}

/// Result type alias for theme operations.
pub type Result<T> = std::result::Result<T, ThemeError>;
