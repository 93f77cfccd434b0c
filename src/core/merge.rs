//! Fragment ordering and merging.
//!
//! Given one cluster of record indices, the merger resolves fragment order,
//! repairs a known two-part delivery anomaly, concatenates the texts, and
//! emits one output row.
//!
//! Ordering is chronological with ties broken by original input order. The
//! output row reuses the chronologically-first fragment's original fields as
//! its template: only the message field (replaced with the concatenation)
//! and the date field (replaced with the chronologically-last fragment's
//! timestamp) differ.

use regex::Regex;

use crate::config::ReassemblyConfig;
use crate::record::Record;

/// Date format used when rewriting the merged row's timestamp field.
const MERGED_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Merges clusters into output rows.
///
/// # Example
///
/// ```rust
/// use smstitch::config::ReassemblyConfig;
/// use smstitch::core::FragmentMerger;
/// use smstitch::record::{parse_timestamp, Record};
///
/// let config = ReassemblyConfig::new();
/// let merger = FragmentMerger::new(&config);
/// let records = vec![Record::new(
///     "700",
///     parse_timestamp("2025-05-01T12:00:00").unwrap(),
///     "Single.",
///     vec!["700".into(), "2025-05-01T12:00:00".into(), "Single.".into()],
/// )];
/// let row = merger.merge(&records, &[0], 1, 2);
/// assert_eq!(row[2], "Single.");
/// ```
#[derive(Debug)]
pub struct FragmentMerger<'a> {
    config: &'a ReassemblyConfig,
    code_continuation: Regex,
}

impl<'a> FragmentMerger<'a> {
    /// Creates a merger bound to a reassembly configuration.
    pub fn new(config: &'a ReassemblyConfig) -> Self {
        Self {
            config,
            // AB12.Kod posylki ... — a truncated code run continuing the
            // previous fragment's tracking notice
            code_continuation: Regex::new(r"^[A-Z0-9]{2,}\.Kod\s+posylki").unwrap(),
        }
    }

    /// Builds the output row for one cluster.
    ///
    /// `date_idx` and `msg_idx` locate the date and message fields inside
    /// the original rows. A singleton cluster passes its row through
    /// unchanged; anything larger is sorted, swap-corrected and
    /// concatenated.
    ///
    /// Clusters are never empty by construction; an empty slice would panic
    /// on indexing, which is the correct response to a broken caller
    /// contract.
    pub fn merge(
        &self,
        records: &[Record],
        cluster: &[usize],
        date_idx: usize,
        msg_idx: usize,
    ) -> Vec<String> {
        if cluster.len() == 1 {
            return records[cluster[0]].row.clone();
        }

        let mut order: Vec<usize> = cluster.to_vec();
        // Equal timestamps degrade to original input order.
        order.sort_by_key(|&i| (records[i].timestamp, i));

        // The swap below reorders the text only; the row template stays with
        // the chronologically-first fragment and the date field with the
        // chronologically-last one.
        let chrono_first = &records[order[0]];
        let chrono_last = &records[*order.last().expect("cluster is non-empty")];

        self.correct_two_part_swap(records, &mut order);
        let merged_text = self.concatenate(records, &order);

        let mut row = chrono_first.row.clone();
        row[msg_idx] = merged_text;
        row[date_idx] = chrono_last.timestamp.format(MERGED_DATE_FORMAT).to_string();
        row
    }

    /// Repairs out-of-order two-part deliveries.
    ///
    /// Transport reordering occasionally delivers the continuation before
    /// the opener. When exactly two fragments arrive and only the
    /// chronologically-second one starts with a known opener marker, the
    /// pair is reversed. Clusters of three or more are left to the
    /// chronological order.
    fn correct_two_part_swap(&self, records: &[Record], order: &mut [usize]) {
        if order.len() != 2 {
            return;
        }
        let first = &records[order[0]].text;
        let second = &records[order[1]].text;
        if !self.config.starts_with_opener(first) && self.config.starts_with_opener(second) {
            order.swap(0, 1);
        }
    }

    /// Concatenates fragment texts in final order.
    ///
    /// A fragment matching the code-continuation shape is assumed to be the
    /// literal continuation of a truncated code and attaches with no
    /// separating space; every other fragment attaches with exactly one.
    fn concatenate(&self, records: &[Record], order: &[usize]) -> String {
        let mut merged = String::new();
        for (pos, &i) in order.iter().enumerate() {
            let text = records[i].text.trim();
            if pos == 0 {
                merged.push_str(text);
            } else if self.code_continuation.is_match(text) {
                merged.push_str(text);
            } else {
                merged.push(' ');
                merged.push_str(text);
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::parse_timestamp;

    fn record(phone: &str, ts: &str, text: &str) -> Record {
        Record::new(
            phone,
            parse_timestamp(ts).unwrap(),
            text,
            vec![phone.into(), ts.into(), text.into()],
        )
    }

    fn merge(records: &[Record], cluster: &[usize]) -> Vec<String> {
        let config = ReassemblyConfig::new();
        FragmentMerger::new(&config).merge(records, cluster, 1, 2)
    }

    #[test]
    fn test_singleton_passes_through_unchanged() {
        let records = vec![record("700", "2025-05-01T12:00:00", "Single.")];
        let row = merge(&records, &[0]);
        assert_eq!(row, records[0].row);
    }

    #[test]
    fn test_merge_orders_by_timestamp() {
        let records = vec![
            record("700", "2025-05-01T12:00:05", "keldi."),
            record("700", "2025-05-01T12:00:00", "Sizge 123 kody bar"),
        ];
        let row = merge(&records, &[0, 1]);
        assert_eq!(row[2], "Sizge 123 kody bar keldi.");
    }

    #[test]
    fn test_merge_takes_last_timestamp_and_first_template() {
        let records = vec![
            record("700", "2025-05-01T12:00:00", "Sizge 123 kody bar"),
            record("700", "2025-05-01T12:00:05", "keldi."),
        ];
        let row = merge(&records, &[0, 1]);
        // template fields come from the earliest fragment
        assert_eq!(row[0], "700");
        // date field reflects final delivery time
        assert_eq!(row[1], "2025-05-01T12:00:05");
    }

    #[test]
    fn test_two_part_swap_correction() {
        // continuation delivered first, opener second
        let records = vec![
            record("700", "2025-05-01T12:00:00", "AB12.Kod posylki 77"),
            record("700", "2025-05-01T12:00:04", "Sizge salemdeme keldi"),
        ];
        let row = merge(&records, &[0, 1]);
        // opener first, then the code run attached without a space
        assert_eq!(row[2], "Sizge salemdeme keldiAB12.Kod posylki 77");
        // timestamp still reflects the chronologically-last fragment
        assert_eq!(row[1], "2025-05-01T12:00:04");
    }

    #[test]
    fn test_swap_not_applied_when_opener_already_first() {
        let records = vec![
            record("700", "2025-05-01T12:00:00", "Sizge salemdeme keldi"),
            record("700", "2025-05-01T12:00:04", "Saqtau merzimi 14 kun."),
        ];
        let row = merge(&records, &[0, 1]);
        assert_eq!(row[2], "Sizge salemdeme keldi Saqtau merzimi 14 kun.");
    }

    #[test]
    fn test_swap_not_applied_to_three_fragments() {
        let records = vec![
            record("700", "2025-05-01T12:00:00", "tail fragment"),
            record("700", "2025-05-01T12:00:02", "Sizge opener"),
            record("700", "2025-05-01T12:00:04", "more tail."),
        ];
        let row = merge(&records, &[0, 1, 2]);
        assert_eq!(row[2], "tail fragment Sizge opener more tail.");
    }

    #[test]
    fn test_code_continuation_joins_without_space() {
        let records = vec![
            record("700", "2025-05-01T12:00:00", "Sizge salemdeme keldi 123"),
            record("700", "2025-05-01T12:00:03", "45KZ.Kod posylki 9. Srok hranenia 14 dney."),
        ];
        let row = merge(&records, &[0, 1]);
        assert_eq!(
            row[2],
            "Sizge salemdeme keldi 12345KZ.Kod posylki 9. Srok hranenia 14 dney."
        );
    }

    #[test]
    fn test_plain_fragments_join_with_single_space() {
        let records = vec![
            record("700", "2025-05-01T12:00:00", "part one"),
            record("700", "2025-05-01T12:00:01", "part two"),
            record("700", "2025-05-01T12:00:02", "part three."),
        ];
        let row = merge(&records, &[0, 1, 2]);
        assert_eq!(row[2], "part one part two part three.");
    }

    #[test]
    fn test_tied_timestamps_keep_input_order() {
        let records = vec![
            record("700", "2025-05-01T12:00:00", "alpha"),
            record("700", "2025-05-01T12:00:00", "beta"),
            record("700", "2025-05-01T12:00:00", "gamma."),
        ];
        let row = merge(&records, &[0, 1, 2]);
        assert_eq!(row[2], "alpha beta gamma.");
    }
}
