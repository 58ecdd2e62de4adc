//! Error types for the JSONL sink.

use thiserror::Error;

/// Errors that can occur during JSONL writing.
#[derive(Error, Debug)]
pub enum JsonlPopulatorError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
