//! Error types for Qrium.

use thiserror::Error;

/// Library-level error type for Qrium operations.
///
/// Per-source fetch failures are deliberately not represented here; they use
/// [`crate::sources::SourceFailure`] so one source's failure stays confined
/// to its own slot in the aggregate result.
#[derive(Error, Debug)]
pub enum QriumError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for Qrium operations.
pub type Result<T> = std::result::Result<T, QriumError>;
