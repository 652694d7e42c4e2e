use thiserror::Error;

/// Queue core errors
///
/// The ordering operations themselves never fail; these errors come from the
/// edges of the crate: snapshot fetches, configuration, and input that cannot
/// be normalized.
#[derive(Error, Debug)]
pub enum QueueCoreError {
    /// Snapshot fetch errors
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// Errors bubbled up from a snapshot source implementation
    #[error("Source error: {0}")]
    Source(#[from] anyhow::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Watcher errors
    #[error("Watcher error: {0}")]
    Watcher(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl QueueCoreError {
    /// Create a new Snapshot error
    pub fn snapshot<S: Into<String>>(msg: S) -> Self {
        Self::Snapshot(msg.into())
    }

    /// Create a new Config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new InvalidInput error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new Watcher error
    pub fn watcher<S: Into<String>>(msg: S) -> Self {
        Self::Watcher(msg.into())
    }

    /// Create a new Internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type for queue core operations
pub type Result<T> = std::result::Result<T, QueueCoreError>;
