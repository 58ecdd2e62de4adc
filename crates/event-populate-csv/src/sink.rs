//! CSV event sink.

use crate::error::CsvPopulatorError;
use async_trait::async_trait;
use csv::Writer;
use event_generator::{EventRecord, EVENT_COLUMNS};
use event_populate::{BoxError, EventSink};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default buffer size for CSV writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Writes events to a CSV file. The header row is written on creation, so an
/// empty run still yields a valid file. NULL campaign ids become empty fields.
pub struct CsvEventSink {
    writer: Writer<BufWriter<File>>,
    path: PathBuf,
    rows_written: u64,
}

impl CsvEventSink {
    /// Create (or truncate) `path` and write the header row.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, CsvPopulatorError> {
        let path = path.as_ref().to_path_buf();
        info!("Creating CSV event file '{}'", path.display());

        let file = File::create(&path)?;
        let buf_writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(buf_writer);
        writer.write_record(EVENT_COLUMNS)?;

        Ok(Self {
            writer,
            path,
            rows_written: 0,
        })
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    fn write_rows(&mut self, rows: &[EventRecord]) -> Result<u64, CsvPopulatorError> {
        for row in rows {
            self.writer.serialize(row)?;
        }
        self.rows_written += rows.len() as u64;
        Ok(rows.len() as u64)
    }
}

#[async_trait]
impl EventSink for CsvEventSink {
    async fn persist_batch(&mut self, rows: &[EventRecord]) -> Result<u64, BoxError> {
        Ok(self.write_rows(rows)?)
    }

    async fn finish(&mut self) -> Result<(), BoxError> {
        self.writer.flush()?;
        let file_size = std::fs::metadata(&self.path)?.len();
        debug!(
            "Flushed {} rows ({} bytes) to '{}'",
            self.rows_written,
            file_size,
            self.path.display()
        );
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
