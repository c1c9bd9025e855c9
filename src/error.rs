use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from reading or writing documents.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal initialization or rendering errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A node path that resolves to nothing, or to the wrong kind of node.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// An imported document is missing a required field or fails to parse.
    #[error("Format error: {0}")]
    Format(String),

    /// User-supplied folder or link fields were rejected.
    #[error("{0}")]
    Validation(String),

    /// Configuration could not be applied (logger setup, output directory).
    #[error("Config error: {0}")]
    Config(String),
}
