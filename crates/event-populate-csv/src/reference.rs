//! Campaign ids from a CSV file.

use crate::error::CsvPopulatorError;
use async_trait::async_trait;
use event_populate::{BoxError, ReferenceStore};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Preferred header of the campaign id column.
pub const CAMPAIGN_ID_COLUMN: &str = "campaign_id";

/// Reads campaign ids from the `campaign_id` column of a CSV file, falling
/// back to the first column when no such header exists. Blank values are
/// skipped.
#[derive(Debug, Clone)]
pub struct CsvReferenceStore {
    path: PathBuf,
}

impl CsvReferenceStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read up to `limit` campaign ids.
    pub fn read_ids(&self, limit: u64) -> Result<Vec<String>, CsvPopulatorError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)?;

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(CsvPopulatorError::MissingHeader(
                self.path.display().to_string(),
            ));
        }
        let column = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(CAMPAIGN_ID_COLUMN))
            .unwrap_or(0);
        debug!(
            "Reading campaign ids from column '{}' of {}",
            &headers[column],
            self.path.display()
        );

        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        let mut ids = Vec::new();
        for record in reader.records() {
            if ids.len() >= limit {
                break;
            }
            let record = record?;
            match record.get(column) {
                Some(id) if !id.is_empty() => ids.push(id.to_string()),
                _ => {}
            }
        }

        Ok(ids)
    }
}

#[async_trait]
impl ReferenceStore for CsvReferenceStore {
    async fn fetch_known_references(&mut self, limit: u64) -> Result<Vec<String>, BoxError> {
        Ok(self.read_ids(limit)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
