//! JSONL event sink.

use crate::error::JsonlPopulatorError;
use async_trait::async_trait;
use event_generator::EventRecord;
use event_populate::{BoxError, EventSink};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default buffer size for JSONL writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Writes one JSON object per event per line.
pub struct JsonlEventSink {
    writer: BufWriter<File>,
    path: PathBuf,
    rows_written: u64,
}

impl JsonlEventSink {
    /// Create (or truncate) `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, JsonlPopulatorError> {
        let path = path.as_ref().to_path_buf();
        info!("Creating JSONL event file '{}'", path.display());
        let file = File::create(&path)?;
        Ok(Self::from_file(file, path))
    }

    /// Open `path` for appending, creating it if needed.
    pub fn append<P: AsRef<Path>>(path: P) -> Result<Self, JsonlPopulatorError> {
        let path = path.as_ref().to_path_buf();
        info!("Appending to JSONL event file '{}'", path.display());
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self::from_file(file, path))
    }

    fn from_file(file: File, path: PathBuf) -> Self {
        Self {
            writer: BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file),
            path,
            rows_written: 0,
        }
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    fn write_rows(&mut self, rows: &[EventRecord]) -> Result<u64, JsonlPopulatorError> {
        for row in rows {
            serde_json::to_writer(&mut self.writer, row)?;
            self.writer.write_all(b"\n")?;
        }
        self.rows_written += rows.len() as u64;
        Ok(rows.len() as u64)
    }
}

#[async_trait]
impl EventSink for JsonlEventSink {
    async fn persist_batch(&mut self, rows: &[EventRecord]) -> Result<u64, BoxError> {
        Ok(self.write_rows(rows)?)
    }

    async fn finish(&mut self) -> Result<(), BoxError> {
        self.writer.flush()?;
        debug!(
            "Flushed {} rows to '{}'",
            self.rows_written,
            self.path.display()
        );
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use event_generator::{CampaignReference, Division, EventType};
    use serde_json::Value;
    use tempfile::TempDir;

    fn event(reference: CampaignReference) -> EventRecord {
        EventRecord {
            event_id: "9b2f1c4e-7a6d-4e3b-8f10-2c5d6e7f8a9b".parse().unwrap(),
            event_type: EventType::Delivered,
            event_timestamp: NaiveDate::from_ymd_opt(2024, 12, 31)
                .unwrap()
                .and_hms_opt(0, 0, 59)
                .unwrap(),
            subscriber_key: "sub_42".to_string(),
            campaign_reference: reference,
            division: Division::South,
            message_id: "msg_7".to_string(),
            is_unique: false,
        }
    }

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_writes_one_object_per_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("events.jsonl");

        let mut sink = JsonlEventSink::create(&path).unwrap();
        sink.persist_batch(&[
            event(CampaignReference::Orphan("ORPHAN_0badf00d".into())),
            event(CampaignReference::Missing),
        ])
        .await
        .unwrap();
        sink.finish().await.unwrap();

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event_id"], "9b2f1c4e-7a6d-4e3b-8f10-2c5d6e7f8a9b");
        assert_eq!(lines[0]["event_type"], "DELIVERED");
        assert_eq!(lines[0]["event_ts"], "2024-12-31 00:00:59");
        assert_eq!(lines[0]["campaign_id"], "ORPHAN_0badf00d");
        assert_eq!(lines[0]["division"], "South");
        assert_eq!(lines[0]["is_unique"], false);
        assert!(lines[1]["campaign_id"].is_null());
    }

    #[tokio::test]
    async fn test_append_keeps_existing_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("events.jsonl");

        let mut sink = JsonlEventSink::create(&path).unwrap();
        sink.persist_batch(&[event(CampaignReference::Missing)])
            .await
            .unwrap();
        sink.finish().await.unwrap();

        let mut sink = JsonlEventSink::append(&path).unwrap();
        sink.persist_batch(&[event(CampaignReference::Known("CMP-1".into()))])
            .await
            .unwrap();
        sink.finish().await.unwrap();

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["campaign_id"], "CMP-1");
    }
}
