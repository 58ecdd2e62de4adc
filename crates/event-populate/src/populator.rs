//! The fetch → generate → persist workflow.

use crate::collaborator::{EventSink, ReferenceStore};
use crate::error::PopulateError;
use crate::summary::EventSummary;
use event_generator::{Clock, EventGenerator, EventRecord, SystemClock};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Default number of events per sink write.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Default number of campaign ids fetched from the reference store.
pub const DEFAULT_REFERENCE_LIMIT: u64 = 200;

/// Knobs of a populate run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulateOptions {
    /// Number of events to generate.
    pub row_count: u64,
    /// Maximum campaign ids to fetch.
    pub reference_limit: u64,
    /// Events per `persist_batch` call.
    pub batch_size: usize,
    /// Generate but skip the sink.
    pub dry_run: bool,
}

impl Default for PopulateOptions {
    fn default() -> Self {
        Self {
            row_count: 500,
            reference_limit: DEFAULT_REFERENCE_LIMIT,
            batch_size: DEFAULT_BATCH_SIZE,
            dry_run: false,
        }
    }
}

/// Metrics from a populate operation.
#[derive(Debug, Clone, Default)]
pub struct PopulateMetrics {
    /// Campaign ids returned by the reference store.
    pub references_fetched: u64,
    /// Events produced by the generator.
    pub rows_generated: u64,
    /// Events the sink reported as written.
    pub rows_persisted: u64,
    /// Number of `persist_batch` calls.
    pub batch_count: u64,
    /// Total time taken.
    pub total_duration: Duration,
    /// Time spent generating data.
    pub generation_duration: Duration,
    /// Time spent writing data.
    pub persist_duration: Duration,
    /// Tallies of the generated batch.
    pub summary: EventSummary,
}

impl PopulateMetrics {
    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_persisted as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Drives one generator against a reference store and a sink.
pub struct EventPopulator<C = SystemClock> {
    generator: EventGenerator<C>,
    options: PopulateOptions,
}

impl<C: Clock> EventPopulator<C> {
    pub fn new(generator: EventGenerator<C>, options: PopulateOptions) -> Self {
        Self { generator, options }
    }

    pub fn options(&self) -> &PopulateOptions {
        &self.options
    }

    pub fn generator(&self) -> &EventGenerator<C> {
        &self.generator
    }

    /// Run the workflow: [`prepare`](Self::prepare) then
    /// [`persist`](Self::persist).
    pub async fn populate<S, K>(
        &mut self,
        store: &mut S,
        sink: &mut K,
    ) -> Result<PopulateMetrics, PopulateError>
    where
        S: ReferenceStore + ?Sized,
        K: EventSink + ?Sized,
    {
        let prepared = self.prepare(store).await?;
        self.persist(prepared, sink).await
    }

    /// Fetch references and generate the whole batch without touching any
    /// sink.
    ///
    /// Invalid options or an empty reference set fail here, so callers can
    /// open or create their output only after this succeeds.
    pub async fn prepare<S>(&mut self, store: &mut S) -> Result<PreparedEvents, PopulateError>
    where
        S: ReferenceStore + ?Sized,
    {
        let started = Instant::now();
        let mut metrics = PopulateMetrics::default();

        if self.options.batch_size == 0 {
            return Err(PopulateError::Config(
                "batch_size must be at least 1".to_string(),
            ));
        }
        let count = usize::try_from(self.options.row_count).map_err(|_| {
            PopulateError::Config(format!(
                "row_count {} exceeds this platform's limit",
                self.options.row_count
            ))
        })?;

        info!(
            "Fetching up to {} campaign ids from {}",
            self.options.reference_limit,
            store.describe()
        );
        let known = store
            .fetch_known_references(self.options.reference_limit)
            .await
            .map_err(PopulateError::Store)?;
        if known.is_empty() {
            return Err(PopulateError::NoKnownReferences(store.describe()));
        }
        metrics.references_fetched = known.len() as u64;
        debug!("Fetched {} campaign ids", known.len());

        let gen_start = Instant::now();
        let events = self.generator.generate(&known, count)?;
        metrics.generation_duration = gen_start.elapsed();
        metrics.rows_generated = events.len() as u64;
        metrics.summary = EventSummary::from_events(&events);
        info!("Generated {}", metrics.summary);

        Ok(PreparedEvents {
            events,
            metrics,
            started,
        })
    }

    /// Write a prepared batch in chunks of `batch_size`, then finish the sink.
    ///
    /// Sink errors abort the run and are returned unchanged as the error
    /// source; batches already written stay written. In dry-run mode the sink
    /// is left untouched.
    pub async fn persist<K>(
        &self,
        prepared: PreparedEvents,
        sink: &mut K,
    ) -> Result<PopulateMetrics, PopulateError>
    where
        K: EventSink + ?Sized,
    {
        let PreparedEvents {
            events,
            mut metrics,
            started,
        } = prepared;

        if self.options.dry_run {
            info!("Dry run: skipping writes to {}", sink.describe());
        } else {
            info!(
                "Writing {} events to {} (batch size: {})",
                events.len(),
                sink.describe(),
                self.options.batch_size
            );

            let persist_start = Instant::now();
            for batch in events.chunks(self.options.batch_size.max(1)) {
                let written = sink
                    .persist_batch(batch)
                    .await
                    .map_err(PopulateError::Sink)?;
                metrics.rows_persisted += written;
                metrics.batch_count += 1;

                debug!(
                    "Batch {} complete: {} rows written, {} total",
                    metrics.batch_count, written, metrics.rows_persisted
                );
            }
            sink.finish().await.map_err(PopulateError::Sink)?;
            metrics.persist_duration = persist_start.elapsed();
        }

        metrics.total_duration = started.elapsed();

        info!(
            "Population complete: {} rows in {:?} ({:.2} rows/sec)",
            metrics.rows_persisted,
            metrics.total_duration,
            metrics.rows_per_second()
        );

        Ok(metrics)
    }
}

/// A generated batch waiting to be written.
#[derive(Debug)]
pub struct PreparedEvents {
    events: Vec<EventRecord>,
    metrics: PopulateMetrics,
    started: Instant,
}

impl PreparedEvents {
    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn summary(&self) -> &EventSummary {
        &self.metrics.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborator::BoxError;
    use crate::memory::{MemorySink, StaticReferenceStore};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use event_generator::{FixedClock, GeneratorConfig, GeneratorError};

    fn populator(options: PopulateOptions) -> EventPopulator<FixedClock> {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());
        let generator = EventGenerator::new(GeneratorConfig::default(), 42)
            .unwrap()
            .with_clock(clock);
        EventPopulator::new(generator, options)
    }

    fn store() -> StaticReferenceStore {
        StaticReferenceStore::new((1..=5).map(|i| format!("CMP-{i}")).collect())
    }

    #[derive(Debug)]
    struct DiskFull;

    impl std::fmt::Display for DiskFull {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("disk full")
        }
    }

    impl std::error::Error for DiskFull {}

    /// Fails on the second batch.
    #[derive(Default)]
    struct FlakySink {
        calls: usize,
        finished: bool,
    }

    #[async_trait]
    impl EventSink for FlakySink {
        async fn persist_batch(&mut self, rows: &[EventRecord]) -> Result<u64, BoxError> {
            self.calls += 1;
            if self.calls == 2 {
                return Err(Box::new(DiskFull));
            }
            Ok(rows.len() as u64)
        }

        async fn finish(&mut self) -> Result<(), BoxError> {
            self.finished = true;
            Ok(())
        }

        fn describe(&self) -> String {
            "flaky sink".to_string()
        }
    }

    #[tokio::test]
    async fn test_populate_in_batches() {
        let mut populator = populator(PopulateOptions {
            row_count: 250,
            batch_size: 100,
            ..Default::default()
        });
        let mut sink = MemorySink::default();

        let metrics = populator.populate(&mut store(), &mut sink).await.unwrap();

        assert_eq!(metrics.references_fetched, 5);
        assert_eq!(metrics.rows_generated, 250);
        assert_eq!(metrics.rows_persisted, 250);
        assert_eq!(metrics.batch_count, 3);
        assert_eq!(metrics.summary.total, 250);
        assert_eq!(sink.batches(), 3);
        assert_eq!(sink.rows().len(), 250);
        assert!(sink.is_finished());
        assert_eq!(populator.generator().generated_count(), 250);
    }

    #[tokio::test]
    async fn test_reference_limit_applies() {
        let mut populator = populator(PopulateOptions {
            row_count: 50,
            reference_limit: 2,
            ..Default::default()
        });
        let mut sink = MemorySink::default();

        let metrics = populator.populate(&mut store(), &mut sink).await.unwrap();
        assert_eq!(metrics.references_fetched, 2);
        for row in sink.rows() {
            if let event_generator::CampaignReference::Known(id) = &row.campaign_reference {
                assert!(id == "CMP-1" || id == "CMP-2");
            }
        }
    }

    #[tokio::test]
    async fn test_empty_references_abort_before_generation() {
        let mut populator = populator(PopulateOptions::default());
        let mut empty = StaticReferenceStore::default();
        let mut sink = MemorySink::default();

        let err = populator.populate(&mut empty, &mut sink).await.unwrap_err();

        assert!(matches!(err, PopulateError::NoKnownReferences(_)));
        assert!(err.to_string().contains("Seed/load campaigns first"));
        assert_eq!(sink.batches(), 0);
        assert_eq!(populator.generator().generated_count(), 0);
    }

    #[tokio::test]
    async fn test_zero_rows_writes_nothing() {
        let mut populator = populator(PopulateOptions {
            row_count: 0,
            ..Default::default()
        });
        let mut sink = MemorySink::default();

        let metrics = populator.populate(&mut store(), &mut sink).await.unwrap();
        assert_eq!(metrics.rows_generated, 0);
        assert_eq!(metrics.batch_count, 0);
        assert!(sink.is_finished());
    }

    #[tokio::test]
    async fn test_dry_run_skips_sink() {
        let mut populator = populator(PopulateOptions {
            row_count: 30,
            dry_run: true,
            ..Default::default()
        });
        let mut sink = MemorySink::default();

        let metrics = populator.populate(&mut store(), &mut sink).await.unwrap();
        assert_eq!(metrics.rows_generated, 30);
        assert_eq!(metrics.rows_persisted, 0);
        assert_eq!(metrics.summary.total, 30);
        assert_eq!(sink.batches(), 0);
        assert!(!sink.is_finished());
    }

    #[tokio::test]
    async fn test_zero_batch_size_rejected() {
        let mut populator = populator(PopulateOptions {
            batch_size: 0,
            ..Default::default()
        });
        let err = populator
            .populate(&mut store(), &mut MemorySink::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PopulateError::Config(_)));
    }

    #[tokio::test]
    async fn test_sink_error_propagates() {
        let mut populator = populator(PopulateOptions {
            row_count: 300,
            batch_size: 100,
            ..Default::default()
        });
        let mut sink = FlakySink::default();

        let err = populator.populate(&mut store(), &mut sink).await.unwrap_err();

        let PopulateError::Sink(source) = &err else {
            panic!("expected sink error, got {err:?}");
        };
        assert!(source.downcast_ref::<DiskFull>().is_some());
        assert_eq!(sink.calls, 2);
        assert!(!sink.finished);
    }

    #[tokio::test]
    async fn test_invalid_generator_config_surfaces() {
        let result = EventGenerator::new(GeneratorConfig::default().with_rates(0.6, 0.5), 1);
        let err: PopulateError = result.err().unwrap().into();
        assert!(matches!(
            err,
            PopulateError::Generator(GeneratorError::RatesExceedOne { .. })
        ));
    }

    #[tokio::test]
    async fn test_works_with_trait_objects() {
        let mut populator = populator(PopulateOptions {
            row_count: 10,
            ..Default::default()
        });
        let mut store: Box<dyn ReferenceStore> = Box::new(store());
        let mut sink: Box<dyn EventSink> = Box::new(MemorySink::default());

        let metrics = populator
            .populate(store.as_mut(), sink.as_mut())
            .await
            .unwrap();
        assert_eq!(metrics.rows_persisted, 10);
    }

    #[tokio::test]
    async fn test_prepare_does_not_touch_sink() {
        let mut populator = populator(PopulateOptions {
            row_count: 120,
            batch_size: 50,
            ..Default::default()
        });

        let prepared = populator.prepare(&mut store()).await.unwrap();
        assert_eq!(prepared.events().len(), 120);
        assert_eq!(prepared.summary().total, 120);

        let mut sink = MemorySink::default();
        let metrics = populator.persist(prepared, &mut sink).await.unwrap();
        assert_eq!(metrics.references_fetched, 5);
        assert_eq!(metrics.rows_persisted, 120);
        assert_eq!(metrics.batch_count, 3);
        assert!(sink.is_finished());
    }

    #[tokio::test]
    async fn test_prepare_fails_before_any_sink_exists() {
        let mut populator = populator(PopulateOptions::default());
        let err = populator
            .prepare(&mut StaticReferenceStore::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PopulateError::NoKnownReferences(_)));
    }

    #[test]
    fn test_metrics_rate() {
        let metrics = PopulateMetrics {
            rows_persisted: 1000,
            total_duration: Duration::from_secs(10),
            ..Default::default()
        };
        assert_eq!(metrics.rows_per_second(), 100.0);
    }
}
