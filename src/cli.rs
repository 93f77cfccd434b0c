//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - top-level CLI argument structure
//! - [`Command`] - the available subcommands
//!
//! Each subcommand mirrors one library entry point, so everything the
//! binary does is equally reachable through the library API.

use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::config::ColumnSpec;

/// Reassemble fragmented SMS delivery logs and build generalized
/// message-pattern reports.
#[derive(Parser, Debug, Clone)]
#[command(name = "smstitch")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    smstitch merge delivery.csv -o merged.csv
    smstitch merge delivery.csv -o merged.csv --window 30 --date-col submission_date
    smstitch patterns merged.csv -o patterns_report_full.csv
    smstitch aggregate patterns_report_full.csv -o patterns_report_aggregated.csv
    smstitch top delivery.csv --markdown top_patterns.md
    smstitch find delivery.csv -p 'Kod posylki' -p 'Tekseru'
    smstitch count delivery.csv")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

/// Column-name options shared by the log-reading subcommands.
#[derive(ClapArgs, Debug, Clone)]
pub struct ColumnArgs {
    /// Phone identifier column name
    #[arg(long, value_name = "NAME", default_value = "phone")]
    pub phone_col: String,

    /// Timestamp column name
    #[arg(long, value_name = "NAME", default_value = "send_date")]
    pub date_col: String,

    /// Message body column name
    #[arg(long, value_name = "NAME", default_value = "message")]
    pub msg_col: String,

    /// Traffic type column name
    #[arg(long, value_name = "NAME", default_value = "traffic_type")]
    pub type_col: String,
}

impl ColumnArgs {
    /// Converts the CLI options into a [`ColumnSpec`].
    pub fn to_spec(&self) -> ColumnSpec {
        ColumnSpec::new()
            .with_phone(self.phone_col.clone())
            .with_date(self.date_col.clone())
            .with_message(self.msg_col.clone())
            .with_traffic_type(self.type_col.clone())
    }
}

/// Supported operations.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Reassemble fragmented messages into one row per logical message
    Merge {
        /// Path to the tab-delimited delivery log
        input: String,

        /// Path to the merged output file
        #[arg(short, long, default_value = "merged.csv")]
        output: String,

        /// Pairing time window in seconds
        #[arg(long, value_name = "SECONDS", default_value_t = 20)]
        window: i64,

        #[command(flatten)]
        columns: ColumnArgs,
    },

    /// Build the generalized pattern frequency report
    Patterns {
        /// Path to the tab-delimited delivery log
        input: String,

        /// Path to the report CSV
        #[arg(short, long, default_value = "patterns_report_full.csv")]
        output: String,

        /// Skip messages shorter than this many characters
        #[arg(long, value_name = "CHARS", default_value_t = 3)]
        min_len: usize,

        #[command(flatten)]
        columns: ColumnArgs,
    },

    /// Re-generalize and aggregate an existing pattern report
    Aggregate {
        /// Path to a frequency report CSV
        input: String,

        /// Path to the aggregated CSV
        #[arg(short, long, default_value = "patterns_report_aggregated.csv")]
        output: String,
    },

    /// Build the cleaned-message top-N report
    Top {
        /// Path to the tab-delimited delivery log
        input: String,

        /// Path to the markdown table output
        #[arg(long, value_name = "PATH", default_value = "top_patterns.md")]
        markdown: String,

        /// Prefix for the CSV part files
        #[arg(long, value_name = "PREFIX", default_value = "patterns_part")]
        csv_prefix: String,

        /// Number of entries in the markdown table
        #[arg(long, value_name = "N", default_value_t = 200)]
        top: usize,

        /// Maximum data rows per CSV part
        #[arg(long, value_name = "ROWS", default_value_t = 650_000)]
        max_rows: usize,

        /// Skip cleaned messages shorter than this many characters
        #[arg(long, value_name = "CHARS", default_value_t = 2)]
        min_len: usize,

        #[command(flatten)]
        columns: ColumnArgs,
    },

    /// Count and sample messages containing exact substrings
    Find {
        /// Path to the tab-delimited delivery log
        input: String,

        /// Substring to search for (repeatable)
        #[arg(short, long = "pattern", value_name = "TEXT", required = true)]
        patterns: Vec<String>,

        /// Sample messages to display per pattern
        #[arg(long, value_name = "N", default_value_t = 10)]
        samples: usize,

        #[command(flatten)]
        columns: ColumnArgs,
    },

    /// Count data rows in a log
    Count {
        /// Path to the tab-delimited file
        input: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_merge_defaults() {
        let args = Args::parse_from(["smstitch", "merge", "in.csv"]);
        match args.command {
            Command::Merge {
                input,
                output,
                window,
                columns,
            } => {
                assert_eq!(input, "in.csv");
                assert_eq!(output, "merged.csv");
                assert_eq!(window, 20);
                assert_eq!(columns.date_col, "send_date");
            }
            _ => panic!("expected merge"),
        }
    }

    #[test]
    fn test_find_requires_pattern() {
        let result = Args::try_parse_from(["smstitch", "find", "in.csv"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_columns() {
        let args = Args::parse_from([
            "smstitch",
            "merge",
            "in.csv",
            "--date-col",
            "submission_date",
        ]);
        match args.command {
            Command::Merge { columns, .. } => {
                assert_eq!(columns.to_spec().date, "submission_date");
            }
            _ => panic!("expected merge"),
        }
    }
}
