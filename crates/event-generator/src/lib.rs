//! Synthetic marketing event generator.
//!
//! This crate produces fake marketing-cloud event log rows (sends, opens,
//! clicks, bounces, ...) for seeding an analytics warehouse. A configurable
//! share of the rows deliberately carries data-quality defects: a NULL
//! campaign reference or an "orphan" reference that points at no known
//! campaign.
//!
//! # Architecture
//!
//! ```text
//! known campaign ids ──┐
//!                      ▼
//!            ┌──────────────────┐
//!            │  EventGenerator  │
//!            │                  │
//!            │  - config/rates  │
//!            │  - rng (StdRng)  │
//!            │  - clock         │
//!            └────────┬─────────┘
//!                     │
//!                     ▼
//!   EventRecord { event_id, event_type, event_timestamp, ... }
//! ```
//!
//! The random source and the clock are injected, so a fixed seed together
//! with a [`FixedClock`] yields byte-identical batches.
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use event_generator::{EventGenerator, FixedClock, GeneratorConfig};
//!
//! let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());
//! let mut generator = EventGenerator::new(GeneratorConfig::default(), 42)
//!     .unwrap()
//!     .with_clock(clock);
//!
//! let campaigns = vec!["CMP-1".to_string(), "CMP-2".to_string()];
//! let events = generator.generate(&campaigns, 10).unwrap();
//! assert_eq!(events.len(), 10);
//! ```

pub mod clock;
pub mod config;
pub mod distribution;
pub mod error;
pub mod generator;
pub mod generators;
pub mod record;

// Re-exports for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::GeneratorConfig;
pub use distribution::{DefectRates, ReferenceOutcome, WeightedTable, EVENT_TYPE_WEIGHTS};
pub use error::GeneratorError;
pub use generator::{generate_events, EventGenerator};
pub use generators::is_orphan_id;
pub use record::{
    CampaignReference, Division, EventRecord, EventType, EVENT_COLUMNS, ORPHAN_PREFIX,
    TIMESTAMP_FORMAT,
};
