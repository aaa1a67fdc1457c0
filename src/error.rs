//! Error types for bbhl

use thiserror::Error;

/// Result type alias for bbhl operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Errors raised at the edges of the highlighter (config, IO, rendering).
///
/// The tokenizer and grammar never fail: malformed markup is reported
/// through style labels instead.
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Unknown style label: {0}")]
    UnknownStyle(String),

    #[error("Unknown color: {0}")]
    UnknownColor(String),

    #[error("{0}")]
    Usage(String),
}
