//! Discrete distributions used by the generator.
//!
//! Event type selection and defect injection are expressed as data: a
//! cumulative weight table for the former and a pair of validated thresholds
//! for the latter.

use crate::error::GeneratorError;
use crate::record::EventType;
use rand::Rng;

/// Relative weights of each event type, out of 100.
pub const EVENT_TYPE_WEIGHTS: [(EventType, u32); 6] = [
    (EventType::Send, 20),
    (EventType::Delivered, 20),
    (EventType::Open, 25),
    (EventType::Click, 20),
    (EventType::Bounce, 10),
    (EventType::Unsubscribe, 5),
];

/// Rates that sum to at most this much above 1.0 are accepted as 1.0.
const RATE_EPSILON: f64 = 1e-9;

/// Weighted random selection over a fixed set of values.
///
/// Sampling draws one integer uniformly from `0..total` and returns the first
/// entry whose cumulative weight exceeds it. Zero-weight entries are kept but
/// never selected.
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    values: Vec<T>,
    cumulative: Vec<u64>,
}

impl<T> WeightedTable<T> {
    /// Build a table from `(value, weight)` pairs.
    pub fn new(entries: impl IntoIterator<Item = (T, u32)>) -> Result<Self, GeneratorError> {
        let mut values = Vec::new();
        let mut cumulative = Vec::new();
        let mut running = 0u64;

        for (value, weight) in entries {
            running += u64::from(weight);
            values.push(value);
            cumulative.push(running);
        }

        if running == 0 {
            return Err(GeneratorError::EmptyWeightTable);
        }

        Ok(Self { values, cumulative })
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Draw one value.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> &T {
        let point = rng.gen_range(0..self.total_weight());
        let idx = self.cumulative.partition_point(|&bound| bound <= point);
        &self.values[idx]
    }

    /// Iterate `(value, weight)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, u64)> + '_ {
        self.values.iter().enumerate().map(|(idx, value)| {
            let lower = if idx == 0 { 0 } else { self.cumulative[idx - 1] };
            (value, self.cumulative[idx] - lower)
        })
    }

    /// Expected selection probability of `value`.
    pub fn probability(&self, value: &T) -> f64
    where
        T: PartialEq,
    {
        let weight: u64 = self
            .iter()
            .filter(|(candidate, _)| *candidate == value)
            .map(|(_, weight)| weight)
            .sum();
        weight as f64 / self.total_weight() as f64
    }
}

/// The event type table with the fixed marketing weights.
pub fn event_type_table() -> Result<WeightedTable<EventType>, GeneratorError> {
    WeightedTable::new(EVENT_TYPE_WEIGHTS)
}

/// Which kind of campaign reference a row receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceOutcome {
    /// NULL campaign id.
    Missing,
    /// Dangling campaign id.
    Orphan,
    /// Campaign id drawn from the known set.
    Known,
}

/// Validated defect-injection thresholds.
///
/// Both rates are checked against a single uniform draw `r` in `[0, 1)`:
/// `[0, null_rate)` is a NULL reference, `[null_rate, null_rate + orphan_rate)`
/// an orphan, and the remainder a known campaign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefectRates {
    null_rate: f64,
    orphan_rate: f64,
}

impl DefectRates {
    pub fn new(null_rate: f64, orphan_rate: f64) -> Result<Self, GeneratorError> {
        check_probability("null_rate", null_rate)?;
        check_probability("orphan_rate", orphan_rate)?;

        if null_rate + orphan_rate > 1.0 + RATE_EPSILON {
            return Err(GeneratorError::RatesExceedOne {
                null_rate,
                orphan_rate,
            });
        }

        Ok(Self {
            null_rate,
            orphan_rate,
        })
    }

    pub fn null_rate(&self) -> f64 {
        self.null_rate
    }

    pub fn orphan_rate(&self) -> f64 {
        self.orphan_rate
    }

    /// Probability that a row references a known campaign.
    pub fn known_rate(&self) -> f64 {
        let remainder = 1.0 - self.null_rate - self.orphan_rate;
        if remainder <= RATE_EPSILON {
            0.0
        } else {
            remainder
        }
    }

    /// Map a uniform fraction in `[0, 1)` to an outcome.
    pub fn classify(&self, fraction: f64) -> ReferenceOutcome {
        if fraction < self.null_rate {
            ReferenceOutcome::Missing
        } else if fraction < self.null_rate + self.orphan_rate {
            ReferenceOutcome::Orphan
        } else {
            ReferenceOutcome::Known
        }
    }

    /// Draw an outcome.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> ReferenceOutcome {
        self.classify(rng.gen::<f64>())
    }
}

/// Reject NaN and values outside [0, 1].
pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<(), GeneratorError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GeneratorError::InvalidRate { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn test_event_type_table_weights() {
        let table = event_type_table().unwrap();
        assert_eq!(table.total_weight(), 100);
        assert_eq!(table.len(), 6);
        assert_eq!(table.probability(&EventType::Open), 0.25);
        assert_eq!(table.probability(&EventType::Unsubscribe), 0.05);
    }

    #[test]
    fn test_empty_table_rejected() {
        let result = WeightedTable::<EventType>::new(Vec::new());
        assert!(matches!(result, Err(GeneratorError::EmptyWeightTable)));

        let result = WeightedTable::new(vec![("a", 0), ("b", 0)]);
        assert!(matches!(result, Err(GeneratorError::EmptyWeightTable)));
    }

    #[test]
    fn test_zero_weight_never_sampled() {
        let table = WeightedTable::new(vec![("never", 0), ("always", 3), ("also_never", 0)]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            assert_eq!(*table.sample(&mut rng), "always");
        }
    }

    #[test]
    fn test_iter_recovers_weights() {
        let table = WeightedTable::new(vec![("a", 2), ("b", 0), ("c", 5)]).unwrap();
        let pairs: Vec<(&str, u64)> = table.iter().map(|(v, w)| (*v, w)).collect();
        assert_eq!(pairs, vec![("a", 2), ("b", 0), ("c", 5)]);
    }

    #[test]
    fn test_sample_follows_weights() {
        let table = event_type_table().unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let draws: u32 = 100_000;

        let mut counts: HashMap<EventType, u32> = HashMap::new();
        for _ in 0..draws {
            *counts.entry(*table.sample(&mut rng)).or_default() += 1;
        }

        for (event_type, weight) in EVENT_TYPE_WEIGHTS {
            let observed = f64::from(counts[&event_type]) / f64::from(draws);
            let expected = f64::from(weight) / 100.0;
            assert!(
                (observed - expected).abs() < 0.01,
                "{event_type}: observed {observed}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_rates_validation() {
        assert!(DefectRates::new(0.05, 0.03).is_ok());
        assert!(DefectRates::new(0.0, 0.0).is_ok());
        assert!(DefectRates::new(0.7, 0.3).is_ok());
        assert!(DefectRates::new(1.0, 0.0).is_ok());

        assert!(matches!(
            DefectRates::new(0.6, 0.5),
            Err(GeneratorError::RatesExceedOne { .. })
        ));
        assert!(matches!(
            DefectRates::new(-0.1, 0.0),
            Err(GeneratorError::InvalidRate {
                name: "null_rate",
                ..
            })
        ));
        assert!(matches!(
            DefectRates::new(0.0, 1.5),
            Err(GeneratorError::InvalidRate {
                name: "orphan_rate",
                ..
            })
        ));
        assert!(matches!(
            DefectRates::new(f64::NAN, 0.0),
            Err(GeneratorError::InvalidRate { .. })
        ));
    }

    #[test]
    fn test_rate_sum_boundary() {
        assert!(DefectRates::new(0.7, 0.3).is_ok());
        assert!(DefectRates::new(0.1, 0.9).is_ok());
        // Float noise just above 1.0 is tolerated.
        assert!(DefectRates::new(0.5, 0.5 + 1e-12).is_ok());

        assert!(matches!(
            DefectRates::new(0.5, 0.5 + 1e-6),
            Err(GeneratorError::RatesExceedOne { .. })
        ));
        assert!(matches!(
            DefectRates::new(1.0, 1e-8),
            Err(GeneratorError::RatesExceedOne { .. })
        ));
    }

    #[test]
    fn test_classify_boundaries() {
        let rates = DefectRates::new(0.25, 0.25).unwrap();

        assert_eq!(rates.classify(0.0), ReferenceOutcome::Missing);
        assert_eq!(rates.classify(0.2499), ReferenceOutcome::Missing);
        // Lower bounds are inclusive, upper bounds exclusive.
        assert_eq!(rates.classify(0.25), ReferenceOutcome::Orphan);
        assert_eq!(rates.classify(0.4999), ReferenceOutcome::Orphan);
        assert_eq!(rates.classify(0.5), ReferenceOutcome::Known);
        assert_eq!(rates.classify(0.9999), ReferenceOutcome::Known);
    }

    #[test]
    fn test_zero_rates_always_known() {
        let rates = DefectRates::new(0.0, 0.0).unwrap();
        assert_eq!(rates.classify(0.0), ReferenceOutcome::Known);
        assert_eq!(rates.known_rate(), 1.0);
    }

    #[test]
    fn test_known_rate_when_defects_fill_everything() {
        let rates = DefectRates::new(0.7, 0.3).unwrap();
        assert_eq!(rates.known_rate(), 0.0);
    }
}
