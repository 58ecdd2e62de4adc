//! CSV collaborators for the mock event populator.
//!
//! - [`CsvReferenceStore`] reads known campaign ids from a CSV file.
//! - [`CsvEventSink`] writes generated events to a CSV file with a header row.
//!
//! # Example
//!
//! ```ignore
//! use event_populate_csv::{CsvEventSink, CsvReferenceStore};
//!
//! let mut store = CsvReferenceStore::new("campaigns.csv");
//! let mut sink = CsvEventSink::create("events.csv")?;
//! let metrics = populator.populate(&mut store, &mut sink).await?;
//! ```

pub mod args;
mod error;
mod reference;
mod sink;

pub use args::CsvPopulateArgs;
pub use error::CsvPopulatorError;
pub use reference::{CsvReferenceStore, CAMPAIGN_ID_COLUMN};
pub use sink::CsvEventSink;
