//! Populate workflow for mock marketing events.
//!
//! Connects the [`event_generator`] crate to the outside world through two
//! collaborator traits:
//!
//! - [`ReferenceStore`] fetches the campaign ids that valid events point at.
//! - [`EventSink`] persists batches of generated events.
//!
//! [`EventPopulator`] runs fetch → fail-fast on empty references → generate →
//! persist in batches, and reports [`PopulateMetrics`].
//!
//! # Example
//!
//! ```ignore
//! use event_populate::{EventPopulator, MemorySink, PopulateOptions, StaticReferenceStore};
//!
//! let mut store = StaticReferenceStore::new(vec!["CMP-1".into()]);
//! let mut sink = MemorySink::default();
//! let mut populator = EventPopulator::new(generator, PopulateOptions::default());
//!
//! let metrics = populator.populate(&mut store, &mut sink).await?;
//! ```

pub mod args;
mod collaborator;
mod error;
mod memory;
mod populator;
mod summary;

pub use args::{CommonPopulateArgs, ReferenceArgs};
pub use collaborator::{BoxError, EventSink, ReferenceStore};
pub use error::PopulateError;
pub use memory::{MemorySink, StaticReferenceStore};
pub use populator::{EventPopulator, PopulateMetrics, PopulateOptions, PreparedEvents};
pub use summary::EventSummary;
