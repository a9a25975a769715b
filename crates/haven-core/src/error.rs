//! Error types for Haven

/// Result type alias using Haven's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Haven operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Classifier construction or execution errors
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Orchestrator state errors
    #[error("orchestrator error: {0}")]
    Orchestrator(String),

    /// Unknown or malformed subject references
    #[error("subject error: {0}")]
    Subject(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new orchestrator error
    pub fn orchestrator(msg: impl Into<String>) -> Self {
        Self::Orchestrator(msg.into())
    }

    /// Create a new subject error
    pub fn subject(msg: impl Into<String>) -> Self {
        Self::Subject(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
