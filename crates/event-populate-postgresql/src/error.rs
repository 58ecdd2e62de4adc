//! Error types for the PostgreSQL collaborators.

use thiserror::Error;

/// Errors that can occur during PostgreSQL population.
#[derive(Error, Debug)]
pub enum PostgreSQLPopulatorError {
    /// PostgreSQL connection or query error.
    #[error("PostgreSQL error: {0}")]
    PostgreSQL(#[from] tokio_postgres::Error),

    /// The server reported fewer inserted rows than were sent.
    #[error("Inserted {inserted} of {expected} rows into '{table}'")]
    ShortInsert {
        table: String,
        expected: u64,
        inserted: u64,
    },
}
