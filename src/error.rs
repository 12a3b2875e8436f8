//! Error taxonomy for the scoring engine.
//!
//! Startup errors (collaborators, artifacts, config) abort initialization.
//! `InvalidInput` rejects a single request and never stops the process.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    /// Malformed or out-of-range request data
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Scaler or classifier missing / not initialized
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// Collaborator returned something outside its contract (e.g. a probability above 1)
    #[error("classifier contract violated: {0}")]
    ModelContract(String),

    /// Statistics, scaler and classifier disagree on vector shape
    #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScoreError {
    /// True for errors that indicate a broken deployment rather than a bad request.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ScoreError::InvalidInput(_))
    }
}

pub type Result<T> = std::result::Result<T, ScoreError>;
