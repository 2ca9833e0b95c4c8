//! Error types for tandem
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in tandem
#[derive(Debug, Error)]
pub enum TandemError {
    /// LLM API error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Tool execution aborted the round
    #[error("Tool error: {0}")]
    Tool(String),

    /// Local git operation failed
    #[error("Git error: {0}")]
    Git(String),

    /// Code host (GitHub) API error with the reported status code
    #[error("Host error {status}: {message}")]
    Host { status: u16, message: String },

    /// No pending changes exist; nothing to publish
    #[error("No diff found; nothing to publish")]
    EmptyDiff,

    /// A working branch was required but not set
    #[error("Working branch is not set")]
    BranchMissing,

    /// Invalid state transition or operation
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TandemError {
    /// Whether this failure means the cycle found no changes to publish.
    pub fn is_empty_diff(&self) -> bool {
        matches!(self, TandemError::EmptyDiff)
    }
}

/// Result type alias for tandem operations
pub type Result<T> = std::result::Result<T, TandemError>;
