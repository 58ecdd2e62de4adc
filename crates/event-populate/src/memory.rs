//! In-memory collaborators for dry runs and tests.

use crate::collaborator::{BoxError, EventSink, ReferenceStore};
use async_trait::async_trait;
use event_generator::EventRecord;

/// Reference store backed by a fixed list of campaign ids.
#[derive(Debug, Clone, Default)]
pub struct StaticReferenceStore {
    ids: Vec<String>,
}

impl StaticReferenceStore {
    pub fn new(ids: Vec<String>) -> Self {
        Self { ids }
    }
}

#[async_trait]
impl ReferenceStore for StaticReferenceStore {
    async fn fetch_known_references(&mut self, limit: u64) -> Result<Vec<String>, BoxError> {
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self
            .ids
            .iter()
            .filter(|id| !id.trim().is_empty())
            .take(limit)
            .cloned()
            .collect())
    }

    fn describe(&self) -> String {
        format!("inline campaign list ({} ids)", self.ids.len())
    }
}

/// Sink that keeps every persisted row.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    rows: Vec<EventRecord>,
    batches: usize,
    finished: bool,
}

impl MemorySink {
    pub fn rows(&self) -> &[EventRecord] {
        &self.rows
    }

    /// Number of `persist_batch` calls received.
    pub fn batches(&self) -> usize {
        self.batches
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn into_rows(self) -> Vec<EventRecord> {
        self.rows
    }
}

#[async_trait]
impl EventSink for MemorySink {
    async fn persist_batch(&mut self, rows: &[EventRecord]) -> Result<u64, BoxError> {
        self.rows.extend_from_slice(rows);
        self.batches += 1;
        Ok(rows.len() as u64)
    }

    async fn finish(&mut self) -> Result<(), BoxError> {
        self.finished = true;
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory sink".to_string()
    }
}
