//! The event record and its closed enumerations.

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Prefix that marks a deliberately dangling campaign reference.
pub const ORPHAN_PREFIX: &str = "ORPHAN_";

/// Text format for naive event timestamps in file sinks.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Sink column names, in insert order.
pub const EVENT_COLUMNS: [&str; 8] = [
    "event_id",
    "event_type",
    "event_ts",
    "subscriber_key",
    "campaign_id",
    "division",
    "message_id",
    "is_unique",
];

/// Marketing event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Send,
    Delivered,
    Open,
    Click,
    Bounce,
    Unsubscribe,
}

impl EventType {
    pub const ALL: [EventType; 6] = [
        EventType::Send,
        EventType::Delivered,
        EventType::Open,
        EventType::Click,
        EventType::Bounce,
        EventType::Unsubscribe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Send => "SEND",
            EventType::Delivered => "DELIVERED",
            EventType::Open => "OPEN",
            EventType::Click => "CLICK",
            EventType::Bounce => "BOUNCE",
            EventType::Unsubscribe => "UNSUBSCRIBE",
        }
    }

    /// Only engagement events carry a meaningful uniqueness flag.
    pub fn tracks_uniqueness(&self) -> bool {
        matches!(self, EventType::Open | EventType::Click)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sales division an event is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Division {
    North,
    South,
    East,
    West,
}

impl Division {
    pub const ALL: [Division; 4] = [
        Division::North,
        Division::South,
        Division::East,
        Division::West,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Division::North => "North",
            Division::South => "South",
            Division::East => "East",
            Division::West => "West",
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Campaign foreign key of an event.
///
/// Serializes as a nullable string: `Missing` becomes NULL, the other
/// variants their identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CampaignReference {
    /// An identifier taken from the known campaign set.
    Known(String),
    /// A synthesized identifier that matches no known campaign.
    Orphan(String),
    /// NULL.
    Missing,
}

impl CampaignReference {
    /// The identifier as it lands in the campaign column.
    pub fn as_deref(&self) -> Option<&str> {
        match self {
            CampaignReference::Known(id) | CampaignReference::Orphan(id) => Some(id),
            CampaignReference::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CampaignReference::Missing)
    }

    pub fn is_orphan(&self) -> bool {
        matches!(self, CampaignReference::Orphan(_))
    }
}

impl Serialize for CampaignReference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_deref() {
            Some(id) => serializer.serialize_some(id),
            None => serializer.serialize_none(),
        }
    }
}

/// One synthetic marketing event log row.
///
/// Field names serialize to the sink column names in [`EVENT_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub event_id: Uuid,
    pub event_type: EventType,
    /// UTC wall-clock time without offset.
    #[serde(rename = "event_ts", serialize_with = "serialize_naive_timestamp")]
    pub event_timestamp: NaiveDateTime,
    pub subscriber_key: String,
    #[serde(rename = "campaign_id")]
    pub campaign_reference: CampaignReference,
    pub division: Division,
    pub message_id: String,
    pub is_unique: bool,
}

fn serialize_naive_timestamp<S: Serializer>(
    timestamp: &NaiveDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&timestamp.format(TIMESTAMP_FORMAT))
}
