//! Error types for mention-config

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Pool not configured: {pool}")]
    MissingPool { pool: String },

    #[error("Invalid trigger character {character:?}: expected exactly one non-whitespace character")]
    InvalidCharacter { character: String },

    #[error("Unknown placeholder {{{name}}} in matching template")]
    UnknownPlaceholder { name: String },

    #[error("Placeholder {{{name}}} is built in and cannot be redefined")]
    ReservedPlaceholder { name: String },

    #[error("Invalid option overrides: {message}")]
    InvalidOverrides { message: String },

    #[error("Invalid matching expression: {0}")]
    InvalidRegex(#[from] regex::Error),

    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
