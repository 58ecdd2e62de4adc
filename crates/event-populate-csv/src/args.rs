//! CLI argument definitions for the CSV target.

use clap::Args;
use std::path::PathBuf;

// Re-export the shared argument groups for convenience
pub use event_populate::{CommonPopulateArgs, ReferenceArgs};

/// CSV-specific populate arguments.
#[derive(Args, Clone, Debug)]
pub struct CsvPopulateArgs {
    /// Output CSV file for generated events
    #[arg(long, short = 'o')]
    pub output: PathBuf,

    #[command(flatten)]
    pub references: ReferenceArgs,

    #[command(flatten)]
    pub common: CommonPopulateArgs,
}
