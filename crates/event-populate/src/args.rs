//! Common CLI argument definitions shared by all populate targets.

use crate::populator::PopulateOptions;
use clap::Args;
use event_generator::{EventGenerator, GeneratorConfig, GeneratorError};
use std::path::PathBuf;

/// Common arguments shared by all populate targets.
///
/// Used by every `populate` subcommand (PostgreSQL, CSV, JSONL) to keep the
/// CLI consistent.
#[derive(Args, Clone, Debug)]
pub struct CommonPopulateArgs {
    /// Number of events to generate
    #[arg(long, env = "MOCK_EVENT_ROWS", default_value = "500")]
    pub row_count: u64,

    /// Share of events with a NULL campaign id (overrides the config file)
    #[arg(long)]
    pub null_rate: Option<f64>,

    /// Share of events with a campaign id that matches no campaign (overrides the config file)
    #[arg(long)]
    pub orphan_rate: Option<f64>,

    /// Maximum number of campaign ids fetched from the reference store
    #[arg(long, default_value = "200")]
    pub reference_limit: u64,

    /// Number of events per sink write
    #[arg(long, default_value = "100")]
    pub batch_size: usize,

    /// Random seed (same seed = same rows, apart from timestamps); random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Path to generator config YAML
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Dry-run mode: fetch references and generate, but skip sink writes
    #[arg(long)]
    pub dry_run: bool,
}

impl CommonPopulateArgs {
    /// Load the config file (if any), apply rate overrides and validate.
    pub fn generator_config(&self) -> Result<GeneratorConfig, GeneratorError> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_file(path)?,
            None => GeneratorConfig::default(),
        };
        if let Some(null_rate) = self.null_rate {
            config.null_rate = null_rate;
        }
        if let Some(orphan_rate) = self.orphan_rate {
            config.orphan_rate = orphan_rate;
        }
        config.validate()?;
        Ok(config)
    }

    /// Build the generator, seeded when `--seed` is given.
    pub fn build_generator(&self) -> Result<EventGenerator, GeneratorError> {
        let config = self.generator_config()?;
        match self.seed {
            Some(seed) => EventGenerator::new(config, seed),
            None => EventGenerator::from_entropy(config),
        }
    }

    pub fn options(&self) -> PopulateOptions {
        PopulateOptions {
            row_count: self.row_count,
            reference_limit: self.reference_limit,
            batch_size: self.batch_size,
            dry_run: self.dry_run,
        }
    }
}

/// Where file-based targets read known campaign ids from.
#[derive(Args, Clone, Debug)]
#[group(required = true, multiple = false)]
pub struct ReferenceArgs {
    /// CSV file with campaign ids (`campaign_id` column, or the first column)
    #[arg(long)]
    pub campaigns_file: Option<PathBuf>,

    /// Campaign ids given inline (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub campaign_ids: Vec<String>,
}
