//! PostgreSQL collaborators for the mock event populator.
//!
//! - [`PostgreSQLReferenceStore`] selects existing campaign ids.
//! - [`PostgreSQLEventSink`] inserts events with batched, parameterized
//!   `INSERT` statements and can create the event table.

pub mod args;
mod error;
pub mod insert;
mod store;

pub use args::PostgreSQLPopulateArgs;
pub use error::PostgreSQLPopulatorError;
pub use store::{connect, PostgreSQLEventSink, PostgreSQLReferenceStore};
