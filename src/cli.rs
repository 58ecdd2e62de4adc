//! Command-line definitions.

use clap::{Parser, Subcommand};
use event_populate_csv::CsvPopulateArgs;
use event_populate_jsonl::JsonlPopulateArgs;
use event_populate_postgresql::PostgreSQLPopulateArgs;

#[derive(Parser)]
#[command(name = "mock-events")]
#[command(about = "Generate mock marketing-cloud events with injected data-quality defects")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch known campaign ids, generate events and write them to a target
    Populate {
        #[command(subcommand)]
        target: PopulateTarget,
    },
}

/// Where generated events go
#[derive(Subcommand)]
pub enum PopulateTarget {
    /// Read campaigns from and insert events into PostgreSQL
    #[command(name = "postgresql")]
    PostgreSQL {
        #[command(flatten)]
        args: PostgreSQLPopulateArgs,
    },
    /// Write events to a CSV file
    #[command(name = "csv")]
    Csv {
        #[command(flatten)]
        args: CsvPopulateArgs,
    },
    /// Write events to a JSONL file
    #[command(name = "jsonl")]
    Jsonl {
        #[command(flatten)]
        args: JsonlPopulateArgs,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_target() {
        let cli = Cli::try_parse_from([
            "mock-events",
            "populate",
            "csv",
            "-o",
            "events.csv",
            "--campaign-ids",
            "CMP-1,CMP-2",
            "--row-count",
            "25",
        ])
        .unwrap();

        let Commands::Populate {
            target: PopulateTarget::Csv { args },
        } = cli.command
        else {
            panic!("expected csv target");
        };
        assert_eq!(args.output.to_str(), Some("events.csv"));
        assert_eq!(args.references.campaign_ids, vec!["CMP-1", "CMP-2"]);
        assert_eq!(args.common.row_count, 25);
    }

    #[test]
    fn test_file_targets_require_references() {
        let result = Cli::try_parse_from(["mock-events", "populate", "jsonl", "-o", "events.jsonl"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_reference_sources_are_exclusive() {
        let result = Cli::try_parse_from([
            "mock-events",
            "populate",
            "csv",
            "-o",
            "events.csv",
            "--campaigns-file",
            "campaigns.csv",
            "--campaign-ids",
            "CMP-1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_postgresql_defaults() {
        let cli = Cli::try_parse_from([
            "mock-events",
            "populate",
            "postgresql",
            "--postgresql-connection-string",
            "postgresql://u:p@localhost/db",
        ])
        .unwrap();

        let Commands::Populate {
            target: PopulateTarget::PostgreSQL { args },
        } = cli.command
        else {
            panic!("expected postgresql target");
        };
        assert_eq!(args.campaigns_table, "raw.campaigns");
        assert_eq!(args.campaign_column, "campaign_id");
        assert_eq!(args.events_table, "raw.marketing_cloud_events");
        assert!(!args.create_table);
    }
}
