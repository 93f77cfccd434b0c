//! Exact-substring scan.
//!
//! A debugging aid for rule authoring: count how often suspicious substrings
//! occur in a log and capture a handful of sample messages for each.

use std::path::Path;

use crate::config::ColumnSpec;
use crate::error::Result;
use crate::report::read_messages;

/// Scan result for one needle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatches {
    /// The substring that was searched for.
    pub pattern: String,
    /// Number of messages containing it.
    pub count: u64,
    /// Up to the sample limit of matching messages, in log order.
    pub samples: Vec<String>,
}

/// Counts exact substring matches over (message, traffic) pairs.
pub fn find_patterns<'a, I>(
    messages: I,
    needles: &[String],
    sample_limit: usize,
) -> Vec<PatternMatches>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut results: Vec<PatternMatches> = needles
        .iter()
        .map(|needle| PatternMatches {
            pattern: needle.clone(),
            count: 0,
            samples: Vec::new(),
        })
        .collect();

    for text in messages {
        for result in &mut results {
            if text.contains(&result.pattern) {
                result.count += 1;
                if result.samples.len() < sample_limit {
                    result.samples.push(text.to_string());
                }
            }
        }
    }
    results
}

/// Reads a delivery log and scans its message column.
pub fn find_patterns_in_log(
    path: &Path,
    columns: &ColumnSpec,
    needles: &[String],
    sample_limit: usize,
) -> Result<Vec<PatternMatches>> {
    let messages = read_messages(path, columns)?;
    Ok(find_patterns(
        messages.iter().map(|(m, _)| m.as_str()),
        needles,
        sample_limit,
    ))
}
