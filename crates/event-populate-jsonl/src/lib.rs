//! JSONL event sink for the mock event populator.
//!
//! Each event becomes one JSON object per line, keyed by the sink column
//! names; NULL campaign ids are written as JSON `null`.

pub mod args;
mod error;
mod sink;

pub use args::JsonlPopulateArgs;
pub use error::JsonlPopulatorError;
pub use sink::JsonlEventSink;
