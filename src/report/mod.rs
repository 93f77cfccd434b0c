//! Reporting collaborators built on top of the pattern generalizer.
//!
//! - [`frequency`] - pattern frequency report over a delivery log
//! - [`aggregate`] - re-generalization and aggregation of an existing report
//! - [`top`] - cleaned-message top-N report with row-limited CSV splitting
//! - [`find`] - exact substring scan with sample capture
//!
//! All of these consume message text as plain text; none of them feed back
//! into the reassembly engine.

pub mod aggregate;
pub mod find;
pub mod frequency;
pub mod top;

pub use aggregate::{aggregate_report, read_report, write_aggregated_report, AggregateRow};
pub use find::{find_patterns, find_patterns_in_log, PatternMatches};
pub use frequency::{
    build_frequency_report, frequency_report_from_log, write_frequency_report, PatternRow,
};
pub use top::{
    build_top_report, top_report_from_log, write_top_csv_parts, write_top_markdown, TopEntry,
    TopReport,
};

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::ReaderBuilder;

use crate::config::ColumnSpec;
use crate::error::{Result, SmstitchError};

/// Traffic type recorded when the input carries none.
pub const UNKNOWN_TRAFFIC: &str = "UNKNOWN";

/// Reads (message, traffic type) pairs from a tab-delimited delivery log.
///
/// Only the message column is required; when the traffic column is absent
/// or empty the pair carries [`UNKNOWN_TRAFFIC`]. Rows with an empty
/// message are dropped.
pub(crate) fn read_messages(path: &Path, columns: &ColumnSpec) -> Result<Vec<(String, String)>> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let header = reader.headers()?.clone();
    let msg_idx = header
        .iter()
        .position(|h| h == columns.message)
        .ok_or_else(|| {
            SmstitchError::missing_column(&columns.message, Some(path.to_path_buf()))
        })?;
    let traffic_idx = header.iter().position(|h| h == columns.traffic_type);

    let mut messages = Vec::new();
    for result in reader.records() {
        let row = result?;
        let text = row.get(msg_idx).unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }
        let traffic = traffic_idx
            .and_then(|idx| row.get(idx))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(UNKNOWN_TRAFFIC);
        messages.push((text.to_string(), traffic.to_string()));
    }
    Ok(messages)
}
