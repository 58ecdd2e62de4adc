//! Per-field value generators.
//!
//! Each function draws one field of an event from the supplied RNG, so the
//! whole row is reproducible from the generator seed.

pub mod identifier;
pub mod reference;
pub mod timestamp;
pub mod uuid;

pub use identifier::{pooled_key, MESSAGE_PREFIX, SUBSCRIBER_PREFIX};
pub use reference::{is_orphan_id, ReferencePool};
pub use timestamp::recent_timestamp;
pub use self::uuid::random_uuid_v4;
