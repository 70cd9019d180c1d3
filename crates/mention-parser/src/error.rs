//! Error types for mention-parser

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a parse
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid or incomplete configuration
    #[error(transparent)]
    Config(#[from] mention_config::Error),

    /// A directory or recorder failure that is not a lookup miss
    #[error(transparent)]
    Collaborator(#[from] mention_model::Error),
}
