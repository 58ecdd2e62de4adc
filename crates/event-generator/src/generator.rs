//! Main event generator.

use crate::clock::{Clock, SystemClock};
use crate::config::GeneratorConfig;
use crate::distribution::{event_type_table, DefectRates, ReferenceOutcome, WeightedTable};
use crate::error::GeneratorError;
use crate::generators::{
    pooled_key, random_uuid_v4, recent_timestamp, ReferencePool, MESSAGE_PREFIX,
    SUBSCRIBER_PREFIX,
};
use crate::record::{CampaignReference, Division, EventRecord, EventType};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generator of synthetic marketing events.
///
/// Holds a validated config, its own RNG and a clock. The clock is read once
/// per [`generate`](Self::generate) call, so every row of a batch is relative
/// to the same instant.
pub struct EventGenerator<C = SystemClock> {
    config: GeneratorConfig,
    rates: DefectRates,
    event_types: WeightedTable<EventType>,
    rng: StdRng,
    clock: C,
    generated: u64,
}

impl EventGenerator<SystemClock> {
    /// Create a generator with a seeded RNG and the system clock.
    pub fn new(config: GeneratorConfig, seed: u64) -> Result<Self, GeneratorError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Create a generator seeded from OS entropy.
    pub fn from_entropy(config: GeneratorConfig) -> Result<Self, GeneratorError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    fn with_rng(config: GeneratorConfig, rng: StdRng) -> Result<Self, GeneratorError> {
        let rates = config.validate()?;
        Ok(Self {
            config,
            rates,
            event_types: event_type_table()?,
            rng,
            clock: SystemClock,
            generated: 0,
        })
    }
}

impl<C: Clock> EventGenerator<C> {
    /// Swap the time source.
    pub fn with_clock<D: Clock>(self, clock: D) -> EventGenerator<D> {
        EventGenerator {
            config: self.config,
            rates: self.rates,
            event_types: self.event_types,
            rng: self.rng,
            clock,
            generated: self.generated,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn rates(&self) -> DefectRates {
        self.rates
    }

    /// Total rows produced by this generator so far.
    pub fn generated_count(&self) -> u64 {
        self.generated
    }

    /// Generate `count` events referencing `known` campaign ids.
    ///
    /// Fails with [`GeneratorError::NoKnownReferences`] when `known` is empty,
    /// `count > 0` and the config leaves a non-zero share for valid
    /// references. No rows are produced on error.
    pub fn generate(
        &mut self,
        known: &[String],
        count: usize,
    ) -> Result<Vec<EventRecord>, GeneratorError> {
        let now = self.clock.now();
        let events = generate_batch(
            &mut self.rng,
            now,
            &self.config,
            &self.rates,
            &self.event_types,
            known,
            count,
        )?;
        self.generated += events.len() as u64;
        Ok(events)
    }
}

/// Generate `count` events with the default field pools and the given defect
/// rates, using a caller-supplied RNG and clock.
///
/// Rates are validated before anything else, so an invalid pair fails even
/// when `count` is zero.
pub fn generate_events<R, C>(
    rng: &mut R,
    clock: &C,
    known: &[String],
    count: usize,
    null_rate: f64,
    orphan_rate: f64,
) -> Result<Vec<EventRecord>, GeneratorError>
where
    R: Rng,
    C: Clock + ?Sized,
{
    let config = GeneratorConfig::default().with_rates(null_rate, orphan_rate);
    let rates = config.validate()?;
    let event_types = event_type_table()?;
    generate_batch(
        rng,
        clock.now(),
        &config,
        &rates,
        &event_types,
        known,
        count,
    )
}

fn generate_batch<R: Rng>(
    rng: &mut R,
    now: DateTime<Utc>,
    config: &GeneratorConfig,
    rates: &DefectRates,
    event_types: &WeightedTable<EventType>,
    known: &[String],
    count: usize,
) -> Result<Vec<EventRecord>, GeneratorError> {
    if count == 0 {
        return Ok(Vec::new());
    }

    let pool = ReferencePool::new(known);
    // A known-reference draw needs a non-empty pool. Rejecting up front keeps
    // a failing batch from producing some rows first.
    if pool.is_empty() && rates.known_rate() > 0.0 {
        return Err(GeneratorError::NoKnownReferences);
    }

    let events = (0..count)
        .map(|_| next_event(rng, now, config, rates, event_types, &pool))
        .collect();
    Ok(events)
}

fn next_event<R: Rng>(
    rng: &mut R,
    now: DateTime<Utc>,
    config: &GeneratorConfig,
    rates: &DefectRates,
    event_types: &WeightedTable<EventType>,
    pool: &ReferencePool<'_>,
) -> EventRecord {
    let event_id = random_uuid_v4(rng);
    let event_type = *event_types.sample(rng);
    let event_timestamp = recent_timestamp(rng, now, config.lookback_minutes);
    let subscriber_key = pooled_key(rng, SUBSCRIBER_PREFIX, config.subscriber_pool);
    let division = Division::ALL[rng.gen_range(0..Division::ALL.len())];
    let message_id = pooled_key(rng, MESSAGE_PREFIX, config.message_pool);

    let campaign_reference = match rates.sample(rng) {
        ReferenceOutcome::Missing => CampaignReference::Missing,
        ReferenceOutcome::Orphan => CampaignReference::Orphan(pool.orphan(rng)),
        ReferenceOutcome::Known => match pool.pick_known(rng) {
            Some(id) => CampaignReference::Known(id),
            // Empty pool with a known share below float noise.
            None => CampaignReference::Orphan(pool.orphan(rng)),
        },
    };

    let is_unique = event_type.tracks_uniqueness() && rng.gen_bool(config.unique_rate);

    EventRecord {
        event_id,
        event_type,
        event_timestamp,
        subscriber_key,
        campaign_reference,
        division,
        message_id,
        is_unique,
    }
}
