//! Per-batch tallies of generated events.

use event_generator::{CampaignReference, EventRecord, EventType};
use std::collections::BTreeMap;
use std::fmt;

/// Counts of event types, reference outcomes and unique flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventSummary {
    pub total: u64,
    pub by_type: BTreeMap<EventType, u64>,
    pub known_references: u64,
    pub orphan_references: u64,
    pub missing_references: u64,
    pub unique_events: u64,
}

impl EventSummary {
    pub fn from_events(events: &[EventRecord]) -> Self {
        let mut summary = Self::default();
        for event in events {
            summary.record(event);
        }
        summary
    }

    /// Add one event to the tallies.
    pub fn record(&mut self, event: &EventRecord) {
        self.total += 1;
        *self.by_type.entry(event.event_type).or_default() += 1;
        match event.campaign_reference {
            CampaignReference::Known(_) => self.known_references += 1,
            CampaignReference::Orphan(_) => self.orphan_references += 1,
            CampaignReference::Missing => self.missing_references += 1,
        }
        if event.is_unique {
            self.unique_events += 1;
        }
    }

    pub fn count(&self, event_type: EventType) -> u64 {
        self.by_type.get(&event_type).copied().unwrap_or(0)
    }

    /// Share of events with a NULL campaign id.
    pub fn missing_fraction(&self) -> f64 {
        fraction(self.missing_references, self.total)
    }

    /// Share of events with an orphan campaign id.
    pub fn orphan_fraction(&self) -> f64 {
        fraction(self.orphan_references, self.total)
    }
}

fn fraction(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

impl fmt::Display for EventSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} events (", self.total)?;
        for (idx, event_type) in EventType::ALL.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", event_type, self.count(*event_type))?;
        }
        write!(
            f,
            "); campaign ids: {} known, {} orphan, {} null; {} unique",
            self.known_references,
            self.orphan_references,
            self.missing_references,
            self.unique_events
        )
    }
}
