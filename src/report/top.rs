//! Top-message report.
//!
//! A lighter-weight view than the full pattern report: messages are cleaned
//! of trailing log noise (anything from an embedded `YYYY-MM-DD` date on),
//! three known high-volume families are collapsed to canonical labels, and
//! the result is written as a markdown top-N table plus row-limited CSV
//! parts for spreadsheet consumption.

use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use regex::Regex;

use crate::config::ColumnSpec;
use crate::error::Result;
use crate::report::read_messages;

/// Cleaned messages shorter than this are skipped.
pub const DEFAULT_MIN_LEN: usize = 2;

/// One counted entry of the top report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopEntry {
    /// Cleaned (and possibly canonicalized) message.
    pub message: String,
    /// Traffic type.
    pub traffic_type: String,
    /// Occurrences.
    pub count: u64,
}

/// The built top report plus its intermediate statistics.
#[derive(Debug)]
pub struct TopReport {
    /// Entries sorted by count descending.
    pub entries: Vec<TopEntry>,
    /// Distinct cleaned messages before family grouping.
    pub unique_before_grouping: usize,
}

/// A known high-volume message family collapsed to one canonical label.
struct Family {
    matcher: Regex,
    canonical: &'static str,
}

fn families() -> Vec<Family> {
    vec![
        Family {
            matcher: Regex::new(r"(?i)^Sizdin belsendiru kody / Vash kod aktivatsii:\d+")
                .unwrap(),
            canonical: "Sizdin belsendiru kody / Vash kod aktivatsii:<code>",
        },
        Family {
            matcher: Regex::new(r"(?i)^Tekseru kody/Kod proverki:\d+").unwrap(),
            canonical: "Tekseru kody/Kod proverki:<code>",
        },
        Family {
            matcher: Regex::new(r"(?i)^\d{3}KZ\.Kod posylki").unwrap(),
            canonical: "<code>KZ.Kod posylki -. Srok hranenia 14 dney. \
                        Uznat dopolnitelnuyu informaciu mozhete na post.kz.",
        },
    ]
}

/// Truncates a raw message at the first embedded `YYYY-MM-DD` date.
///
/// Some upstream exports append delivery metadata after the body; the date
/// is the reliable seam.
pub fn clean_message(raw: &str, embedded_date: &Regex) -> String {
    match embedded_date.find(raw) {
        Some(m) => raw[..m.start()].trim().to_string(),
        None => raw.trim().to_string(),
    }
}

/// Builds the top report from (message, traffic type) pairs.
pub fn build_top_report<'a, I>(messages: I, min_len: usize) -> TopReport
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let embedded_date = Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap();
    let mut cleaned_counts: HashMap<(String, String), u64> = HashMap::new();

    for (raw, traffic) in messages {
        let message = clean_message(raw, &embedded_date);
        if message.chars().count() < min_len {
            continue;
        }
        *cleaned_counts
            .entry((message, traffic.to_string()))
            .or_insert(0) += 1;
    }
    let unique_before_grouping = cleaned_counts.len();

    let families = families();
    let mut grouped: HashMap<(String, String), u64> = HashMap::new();
    for ((message, traffic), count) in cleaned_counts {
        let canonical = families
            .iter()
            .find(|family| family.matcher.is_match(&message))
            .map(|family| family.canonical.to_string())
            .unwrap_or(message);
        *grouped.entry((canonical, traffic)).or_insert(0) += count;
    }

    let mut entries: Vec<TopEntry> = grouped
        .into_iter()
        .map(|((message, traffic_type), count)| TopEntry {
            message,
            traffic_type,
            count,
        })
        .collect();
    entries.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.message.cmp(&b.message))
            .then_with(|| a.traffic_type.cmp(&b.traffic_type))
    });

    TopReport {
        entries,
        unique_before_grouping,
    }
}

/// Reads a delivery log and builds its top report.
pub fn top_report_from_log(
    path: &Path,
    columns: &ColumnSpec,
    min_len: usize,
) -> Result<TopReport> {
    let messages = read_messages(path, columns)?;
    Ok(build_top_report(
        messages.iter().map(|(m, t)| (m.as_str(), t.as_str())),
        min_len,
    ))
}

/// Writes the top `n` entries as a markdown table.
pub fn write_top_markdown(path: &Path, report: &TopReport, n: usize) -> Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "| # | Count | Traffic Type | Pattern |")?;
    writeln!(file, "|:-:|------:|:-------------|:--------|")?;
    for (rank, entry) in report.entries.iter().take(n).enumerate() {
        let safe = entry.message.replace('|', "\\|");
        writeln!(
            file,
            "| {} | {} | {} | {} |",
            rank + 1,
            entry.count,
            entry.traffic_type,
            safe
        )?;
    }
    Ok(())
}

/// Writes all entries as CSV parts of at most `max_rows` data rows each.
///
/// Files are named `<prefix>_1.csv`, `<prefix>_2.csv`, ... next to whatever
/// directory the prefix points into. Returns the paths written.
pub fn write_top_csv_parts(
    prefix: &Path,
    report: &TopReport,
    max_rows: usize,
) -> Result<Vec<std::path::PathBuf>> {
    let mut written = Vec::new();
    let chunk_size = max_rows.max(1);
    for (index, chunk) in report.entries.chunks(chunk_size).enumerate() {
        let path = part_path(prefix, index + 1);
        let mut writer = csv::Writer::from_writer(File::create(&path)?);
        writer.write_record(["Pattern", "Traffic Type", "Count"])?;
        for entry in chunk {
            let count = entry.count.to_string();
            writer.write_record([
                entry.message.as_str(),
                entry.traffic_type.as_str(),
                count.as_str(),
            ])?;
        }
        writer.flush()?;
        written.push(path);
    }
    Ok(written)
}

fn part_path(prefix: &Path, index: usize) -> std::path::PathBuf {
    let mut name = prefix.as_os_str().to_os_string();
    name.push(format!("_{index}.csv"));
    std::path::PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build<'a>(messages: &'a [(&'a str, &'a str)]) -> TopReport {
        build_top_report(messages.iter().copied(), DEFAULT_MIN_LEN)
    }

    #[test]
    fn test_clean_message_truncates_at_date() {
        let rx = Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap();
        assert_eq!(clean_message("Kod keldi 2025-05-01T12:00:00 extra", &rx), "Kod keldi");
        assert_eq!(clean_message("Kod keldi", &rx), "Kod keldi");
    }

    #[test]
    fn test_families_collapse_to_canonical_labels() {
        let messages = [
            ("Tekseru kody/Kod proverki:482913", "SERVICE"),
            ("Tekseru kody/Kod proverki:173205", "SERVICE"),
            ("tekseru kody/kod proverki:999000", "SERVICE"),
        ];
        let report = build(&messages);
        assert_eq!(report.unique_before_grouping, 3);
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].message, "Tekseru kody/Kod proverki:<code>");
        assert_eq!(report.entries[0].count, 3);
    }

    #[test]
    fn test_parcel_family_matches_prefix_only() {
        let messages = [
            ("123KZ.Kod posylki -5512. Srok hranenia 14 dney.", "NOTIFY"),
            ("987KZ.Kod posylki -1000. Srok hranenia 14 dney.", "NOTIFY"),
        ];
        let report = build(&messages);
        assert_eq!(report.entries.len(), 1);
        assert!(report.entries[0].message.starts_with("<code>KZ.Kod posylki"));
    }

    #[test]
    fn test_ungrouped_messages_kept_verbatim() {
        let messages = [("Salem, qalaisyz?", "CHAT")];
        let report = build(&messages);
        assert_eq!(report.entries[0].message, "Salem, qalaisyz?");
    }

    #[test]
    fn test_short_cleaned_messages_skipped() {
        let messages = [("a 2025-05-01 tail", "CHAT")];
        let report = build(&messages);
        assert!(report.entries.is_empty());
    }

    #[test]
    fn test_entries_sorted_by_count() {
        let messages = [
            ("rare message", "A"),
            ("common message", "A"),
            ("common message", "A"),
        ];
        let report = build(&messages);
        assert_eq!(report.entries[0].message, "common message");
    }

    #[test]
    fn test_part_path_naming() {
        let path = part_path(Path::new("out/patterns_part"), 2);
        assert_eq!(path, Path::new("out/patterns_part_2.csv"));
    }
}
