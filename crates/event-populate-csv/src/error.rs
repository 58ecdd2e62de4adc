//! Error types for the CSV collaborators.

use thiserror::Error;

/// Errors that can occur reading or writing CSV files.
#[derive(Error, Debug)]
pub enum CsvPopulatorError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The reference file has no header row.
    #[error("Reference file '{0}' has no header row")]
    MissingHeader(String),
}
