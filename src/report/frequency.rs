//! Pattern frequency report.
//!
//! Masks and generalizes every message of a delivery log, counts occurrences
//! per (pattern, traffic type), and keeps the longest raw message seen for
//! each pattern as its example. Length and segment figures are computed from
//! the example, not the pattern, so the report shows real transmission
//! costs.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use crate::config::ColumnSpec;
use crate::error::Result;
use crate::pattern::{compute_segments, Generalizer};
use crate::report::read_messages;

/// Messages shorter than this many characters are noise and are skipped.
pub const DEFAULT_MIN_LEN: usize = 3;

/// One row of the frequency report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternRow {
    /// Generalized pattern string.
    pub pattern: String,
    /// Longest raw message that produced this pattern.
    pub example: String,
    /// Number of messages that collapsed into this pattern.
    pub count: u64,
    /// Character length of the example.
    pub length: usize,
    /// SMS segments of the example.
    pub segments: usize,
    /// Traffic type of the counted messages.
    pub traffic_type: String,
}

/// Header of the frequency report CSV.
pub(crate) const FREQUENCY_HEADER: [&str; 6] = [
    "Pattern",
    "Example",
    "Total Count",
    "Length",
    "SMS Segments",
    "Traffic Type",
];

/// Builds the frequency report from (message, traffic type) pairs.
///
/// Rows come back sorted by count descending; ties break on pattern then
/// traffic type so the output is deterministic.
pub fn build_frequency_report<'a, I>(messages: I, min_len: usize) -> Vec<PatternRow>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let generalizer = Generalizer::new();
    let mut stats: HashMap<(String, String), (u64, String)> = HashMap::new();

    for (text, traffic) in messages {
        let text = text.trim();
        if text.chars().count() < min_len {
            continue;
        }
        let pattern = generalizer.pattern_of(text);
        let entry = stats
            .entry((pattern, traffic.to_string()))
            .or_insert_with(|| (0, String::new()));
        entry.0 += 1;
        // the longest raw message shows the pattern in full
        if text.chars().count() > entry.1.chars().count() {
            entry.1 = text.to_string();
        }
    }

    let mut rows: Vec<PatternRow> = stats
        .into_iter()
        .map(|((pattern, traffic_type), (count, example))| {
            let (length, segments) = compute_segments(&example);
            PatternRow {
                pattern,
                example,
                count,
                length,
                segments,
                traffic_type,
            }
        })
        .collect();
    rows.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.pattern.cmp(&b.pattern))
            .then_with(|| a.traffic_type.cmp(&b.traffic_type))
    });
    rows
}

/// Reads a delivery log and builds its frequency report.
pub fn frequency_report_from_log(
    path: &Path,
    columns: &ColumnSpec,
    min_len: usize,
) -> Result<Vec<PatternRow>> {
    let messages = read_messages(path, columns)?;
    Ok(build_frequency_report(
        messages.iter().map(|(m, t)| (m.as_str(), t.as_str())),
        min_len,
    ))
}

/// Writes the frequency report as a comma-separated file.
pub fn write_frequency_report(path: &Path, rows: &[PatternRow]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(File::create(path)?);
    writer.write_record(FREQUENCY_HEADER)?;
    for row in rows {
        let count = row.count.to_string();
        let length = row.length.to_string();
        let segments = row.segments.to_string();
        writer.write_record([
            row.pattern.as_str(),
            row.example.as_str(),
            count.as_str(),
            length.as_str(),
            segments.as_str(),
            row.traffic_type.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_structurally_identical_messages_together() {
        let messages = vec![
            ("Tekseru kody/Kod proverki: 482913", "SERVICE"),
            ("Tekseru kody/Kod proverki: 173205", "SERVICE"),
            ("Tekseru kody/Kod proverki: 555001", "SERVICE"),
        ];
        let rows = build_frequency_report(
            messages.iter().map(|(m, t)| (*m, *t)),
            DEFAULT_MIN_LEN,
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].count, 3);
        assert_eq!(rows[0].pattern, "Tekseru kody/Kod proverki:{NUM}");
    }

    #[test]
    fn test_traffic_type_separates_counts() {
        let messages = vec![
            ("Kod: 482913", "SERVICE"),
            ("Kod: 482913", "PROMO"),
        ];
        let rows = build_frequency_report(
            messages.iter().map(|(m, t)| (*m, *t)),
            DEFAULT_MIN_LEN,
        );
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_longest_example_retained() {
        let messages = vec![
            ("Kod 12 bar", "SERVICE"),
            ("Kod 123456789 bar", "SERVICE"),
        ];
        let rows = build_frequency_report(
            messages.iter().map(|(m, t)| (*m, *t)),
            DEFAULT_MIN_LEN,
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].example, "Kod 123456789 bar");
        assert_eq!(rows[0].length, 17);
    }

    #[test]
    fn test_short_messages_skipped() {
        let messages = vec![("ok", "SERVICE"), ("yes sir", "SERVICE")];
        let rows = build_frequency_report(
            messages.iter().map(|(m, t)| (*m, *t)),
            DEFAULT_MIN_LEN,
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].count, 1);
    }

    #[test]
    fn test_sorted_by_count_descending() {
        let messages = vec![
            ("alpha message", "A"),
            ("beta message", "A"),
            ("beta message", "A"),
        ];
        let rows = build_frequency_report(
            messages.iter().map(|(m, t)| (*m, *t)),
            DEFAULT_MIN_LEN,
        );
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[1].count, 1);
    }

    #[test]
    fn test_empty_input_empty_report() {
        let rows = build_frequency_report(std::iter::empty(), DEFAULT_MIN_LEN);
        assert!(rows.is_empty());
    }
}
