//! Error types for the forecast-frames pipeline.

use thiserror::Error;

/// Result type alias using FrameError.
pub type FrameResult<T> = Result<T, FrameError>;

/// Primary error type for pipeline operations.
#[derive(Debug, Error)]
pub enum FrameError {
    // === Input Errors ===
    #[error("dataset collection is empty")]
    EmptyCollection,

    #[error("failed to decode source file: {0}")]
    DecodeError(String),

    #[error("grid shape mismatch: expected {expected} values, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    // === Rendering Errors ===
    #[error("rendering failed: {0}")]
    RenderError(String),

    #[error("PNG encoding failed: {0}")]
    EncodeError(String),

    // === Infrastructure Errors ===
    #[error("invalid frame task: {0}")]
    InvalidTask(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("metadata error: {0}")]
    MetadataError(String),
}

impl FrameError {
    /// Create a DecodeError.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeError(msg.into())
    }

    /// Create a RenderError.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::RenderError(msg.into())
    }

    /// Create an InvalidGrid error.
    pub fn invalid_grid(msg: impl Into<String>) -> Self {
        Self::InvalidGrid(msg.into())
    }

    /// Create an EncodeError.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::EncodeError(msg.into())
    }
}

impl From<std::io::Error> for FrameError {
    fn from(err: std::io::Error) -> Self {
        FrameError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for FrameError {
    fn from(err: serde_json::Error) -> Self {
        FrameError::MetadataError(format!("JSON error: {}", err))
    }
}
