//! Populate command runner.

use anyhow::Context;
use event_populate::{
    CommonPopulateArgs, EventPopulator, MemorySink, PopulateMetrics, PreparedEvents,
    ReferenceArgs, ReferenceStore, StaticReferenceStore,
};
use event_populate_csv::{CsvEventSink, CsvReferenceStore};
use event_populate_jsonl::JsonlEventSink;
use event_populate_postgresql::{PostgreSQLEventSink, PostgreSQLReferenceStore};

use crate::cli::PopulateTarget;
use crate::logging::mask_connection_password;

/// Run one populate command end to end.
///
/// Output files and tables are only opened or created once the generator
/// config is valid and the reference store returned campaign ids.
pub async fn run_populate(target: PopulateTarget) -> anyhow::Result<PopulateMetrics> {
    match target {
        PopulateTarget::PostgreSQL { args } => {
            let mut populator = build_populator(&args.common)?;

            tracing::info!(
                "Connecting to {}",
                mask_connection_password(&args.postgresql_connection_string)
            );
            let client = event_populate_postgresql::connect(&args.postgresql_connection_string)
                .await
                .context("Failed to connect to PostgreSQL")?;

            let mut store = PostgreSQLReferenceStore::new(
                client.clone(),
                &args.campaigns_table,
                &args.campaign_column,
            );
            let prepared = populator.prepare(&mut store).await?;

            let mut sink = PostgreSQLEventSink::new(client, &args.events_table);
            if args.common.dry_run {
                return Ok(populator.persist(prepared, &mut sink).await?);
            }
            if args.create_table {
                sink.create_table().await.with_context(|| {
                    format!("Failed to create table '{}'", args.events_table)
                })?;
            }
            Ok(populator.persist(prepared, &mut sink).await?)
        }
        PopulateTarget::Csv { args } => {
            let (populator, prepared) = prepare(&args.common, &args.references).await?;
            if args.common.dry_run {
                return dry_run(&populator, prepared).await;
            }
            let mut sink = CsvEventSink::create(&args.output)
                .with_context(|| format!("Failed to create {}", args.output.display()))?;
            Ok(populator.persist(prepared, &mut sink).await?)
        }
        PopulateTarget::Jsonl { args } => {
            let (populator, prepared) = prepare(&args.common, &args.references).await?;
            if args.common.dry_run {
                return dry_run(&populator, prepared).await;
            }
            let sink = if args.append {
                JsonlEventSink::append(&args.output)
            } else {
                JsonlEventSink::create(&args.output)
            };
            let mut sink =
                sink.with_context(|| format!("Failed to open {}", args.output.display()))?;
            Ok(populator.persist(prepared, &mut sink).await?)
        }
    }
}

/// Campaign ids for file targets come from a CSV file or the command line.
fn reference_store(args: &ReferenceArgs) -> Box<dyn ReferenceStore> {
    match &args.campaigns_file {
        Some(path) => Box::new(CsvReferenceStore::new(path)),
        None => Box::new(StaticReferenceStore::new(args.campaign_ids.clone())),
    }
}

fn build_populator(common: &CommonPopulateArgs) -> anyhow::Result<EventPopulator> {
    let generator = common
        .build_generator()
        .context("Invalid generator configuration")?;
    let rates = generator.rates();
    tracing::info!(
        "Generating {} events (null_rate={}, orphan_rate={}, seed={:?})",
        common.row_count,
        rates.null_rate(),
        rates.orphan_rate(),
        common.seed
    );
    Ok(EventPopulator::new(generator, common.options()))
}

async fn prepare(
    common: &CommonPopulateArgs,
    references: &ReferenceArgs,
) -> anyhow::Result<(EventPopulator, PreparedEvents)> {
    let mut populator = build_populator(common)?;
    let mut store = reference_store(references);
    let prepared = populator.prepare(store.as_mut()).await?;
    Ok((populator, prepared))
}

async fn dry_run(
    populator: &EventPopulator,
    prepared: PreparedEvents,
) -> anyhow::Result<PopulateMetrics> {
    Ok(populator
        .persist(prepared, &mut MemorySink::default())
        .await?)
}
