//! CLI argument definitions for the JSONL target.

use clap::Args;
use std::path::PathBuf;

pub use event_populate::{CommonPopulateArgs, ReferenceArgs};

/// JSONL-specific populate arguments.
#[derive(Args, Clone, Debug)]
pub struct JsonlPopulateArgs {
    /// Output JSONL file for generated events
    #[arg(long, short = 'o')]
    pub output: PathBuf,

    /// Append to the output file instead of truncating it
    #[arg(long)]
    pub append: bool,

    #[command(flatten)]
    pub references: ReferenceArgs,

    #[command(flatten)]
    pub common: CommonPopulateArgs,
}
