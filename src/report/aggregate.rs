//! Report aggregation.
//!
//! A frequency report is often produced in parts, or by earlier tooling
//! whose masking was less aggressive. Aggregation re-runs the
//! generalization rule table over the `Pattern` column of an existing
//! report and folds rows that now collapse to the same generalized pattern,
//! summing their counts and keeping the longest example.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{Result, SmstitchError};
use crate::pattern::Generalizer;
use crate::report::frequency::PatternRow;

/// One row of the aggregated report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateRow {
    /// Pattern after re-generalization.
    pub pattern: String,
    /// Traffic type of the folded rows.
    pub traffic_type: String,
    /// Sum of the folded rows' counts.
    pub sum_count: u64,
    /// Longest example among the folded rows.
    pub example: String,
    /// Count column of the row the example came from.
    pub example_count: u64,
    /// Character length of the example.
    pub example_length: usize,
    /// Segment column of the row the example came from.
    pub example_segments: usize,
}

const AGGREGATE_HEADER: [&str; 7] = [
    "Generalized Pattern",
    "Traffic Type",
    "Sum Total Count",
    "Example Message",
    "Example Total Count",
    "Example Length",
    "Example SMS Segments",
];

/// Reads a frequency report CSV back into [`PatternRow`]s.
pub fn read_report(path: &Path) -> Result<Vec<PatternRow>> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new().from_reader(BufReader::new(file));

    let header = reader.headers()?.clone();
    let index_of = |name: &str| -> Result<usize> {
        header
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| SmstitchError::missing_column(name, Some(path.to_path_buf())))
    };
    let pattern_idx = index_of("Pattern")?;
    let example_idx = index_of("Example")?;
    let count_idx = index_of("Total Count")?;
    let length_idx = index_of("Length")?;
    let segments_idx = index_of("SMS Segments")?;
    let traffic_idx = index_of("Traffic Type")?;

    let parse_number = |value: &str, column: &str| -> Result<u64> {
        value
            .trim()
            .parse::<u64>()
            .map_err(|_| SmstitchError::invalid_number(value, column))
    };

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let field = |idx: usize| record.get(idx).unwrap_or("").to_string();
        rows.push(PatternRow {
            pattern: field(pattern_idx),
            example: field(example_idx),
            count: parse_number(&field(count_idx), "Total Count")?,
            length: parse_number(&field(length_idx), "Length")? as usize,
            segments: parse_number(&field(segments_idx), "SMS Segments")? as usize,
            traffic_type: field(traffic_idx),
        });
    }
    Ok(rows)
}

/// Folds report rows by re-generalized pattern and traffic type.
///
/// Output is sorted by summed count descending, with pattern/traffic
/// tie-breaks for determinism.
pub fn aggregate_report(rows: &[PatternRow]) -> Vec<AggregateRow> {
    let generalizer = Generalizer::new();
    let mut folded: HashMap<(String, String), AggregateRow> = HashMap::new();

    for row in rows {
        let pattern = generalizer.regeneralize(&row.pattern);
        let key = (pattern.clone(), row.traffic_type.clone());
        let entry = folded.entry(key).or_insert_with(|| AggregateRow {
            pattern,
            traffic_type: row.traffic_type.clone(),
            sum_count: 0,
            example: String::new(),
            example_count: 0,
            example_length: 0,
            example_segments: 0,
        });
        entry.sum_count += row.count;
        let example_len = row.example.chars().count();
        if example_len > entry.example_length || entry.example.is_empty() {
            entry.example = row.example.clone();
            entry.example_count = row.count;
            entry.example_length = example_len;
            entry.example_segments = row.segments;
        }
    }

    let mut aggregated: Vec<AggregateRow> = folded.into_values().collect();
    aggregated.sort_by(|a, b| {
        b.sum_count
            .cmp(&a.sum_count)
            .then_with(|| a.pattern.cmp(&b.pattern))
            .then_with(|| a.traffic_type.cmp(&b.traffic_type))
    });
    aggregated
}

/// Writes the aggregated report as a comma-separated file.
pub fn write_aggregated_report(path: &Path, rows: &[AggregateRow]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(File::create(path)?);
    writer.write_record(AGGREGATE_HEADER)?;
    for row in rows {
        let sum_count = row.sum_count.to_string();
        let example_count = row.example_count.to_string();
        let example_length = row.example_length.to_string();
        let example_segments = row.example_segments.to_string();
        writer.write_record([
            row.pattern.as_str(),
            row.traffic_type.as_str(),
            sum_count.as_str(),
            row.example.as_str(),
            example_count.as_str(),
            example_length.as_str(),
            example_segments.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
