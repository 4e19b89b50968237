use thiserror::Error;

/// Unified error type for release-bump operations
#[derive(Error, Debug)]
pub enum ReleaseBumpError {
    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Command `{command}` failed: {detail}")]
    CommandFailed { command: String, detail: String },

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results in release-bump
pub type Result<T> = std::result::Result<T, ReleaseBumpError>;

impl ReleaseBumpError {
    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseBumpError::Version(msg.into())
    }

    /// Create an invalid argument error with context
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        ReleaseBumpError::InvalidArgument(msg.into())
    }

    /// Create a command failure for the given command line
    pub fn command_failed(command: impl Into<String>, detail: impl Into<String>) -> Self {
        ReleaseBumpError::CommandFailed {
            command: command.into(),
            detail: detail.into(),
        }
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        ReleaseBumpError::Manifest(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseBumpError::Config(msg.into())
    }
}
