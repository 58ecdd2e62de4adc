//! Interfaces of the external persistence collaborators.

use async_trait::async_trait;
use event_generator::EventRecord;

/// Error type returned by collaborators; kept intact as the source of
/// [`PopulateError::Store`](crate::PopulateError::Store) and
/// [`PopulateError::Sink`](crate::PopulateError::Sink).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Source of existing campaign identifiers.
#[async_trait]
pub trait ReferenceStore: Send {
    /// Fetch up to `limit` known campaign ids.
    async fn fetch_known_references(&mut self, limit: u64) -> Result<Vec<String>, BoxError>;

    /// Human-readable location, used in logs and errors.
    fn describe(&self) -> String;
}

/// Destination of generated events.
#[async_trait]
pub trait EventSink: Send {
    /// Persist one batch, returning the number of rows written.
    async fn persist_batch(&mut self, rows: &[EventRecord]) -> Result<u64, BoxError>;

    /// Flush buffered output after the last batch.
    async fn finish(&mut self) -> Result<(), BoxError> {
        Ok(())
    }

    /// Human-readable location, used in logs.
    fn describe(&self) -> String;
}
