//! The fragment reassembly engine.
//!
//! This module contains:
//! - [`tokens`] - Structured-token extraction (identity evidence)
//! - [`graph`] - Candidate graph builder and component resolver
//! - [`merge`] - Fragment ordering and merging
//!
//! The pipeline is a single-pass batch computation over an in-memory record
//! set: extract tokens, propose candidate edges within each phone partition,
//! resolve connected components, merge each component into one output row.
//! Each stage consumes the previous stage's output as an immutable value;
//! nothing is mutated across stage boundaries.
//!
//! # Quick Start
//!
//! ```rust
//! use smstitch::config::ReassemblyConfig;
//! use smstitch::core::reassemble;
//! use smstitch::record::{parse_timestamp, Record};
//!
//! let records = vec![
//!     Record::new(
//!         "77010000001",
//!         parse_timestamp("2025-05-01T12:00:00").unwrap(),
//!         "Sizge 123 kody bar",
//!         vec!["77010000001".into(), "2025-05-01T12:00:00".into(), "Sizge 123 kody bar".into()],
//!     ),
//!     Record::new(
//!         "77010000001",
//!         parse_timestamp("2025-05-01T12:00:05").unwrap(),
//!         "keldi.",
//!         vec!["77010000001".into(), "2025-05-01T12:00:05".into(), "keldi.".into()],
//!     ),
//! ];
//!
//! let rows = reassemble(&records, &ReassemblyConfig::new(), 1, 2);
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0][2], "Sizge 123 kody bar keldi.");
//! ```

pub mod graph;
pub mod merge;
pub mod tokens;

// Re-export main types for convenience
pub use graph::{build_candidate_graph, ends_complete, find_components, AdjacencyList};
pub use merge::FragmentMerger;
pub use tokens::TokenExtractor;

use crate::config::ReassemblyConfig;
use crate::record::Record;

/// Runs the full reassembly pipeline and returns the output rows.
///
/// `date_idx` and `msg_idx` locate the date and message fields inside the
/// original rows (the reader resolves them from the header).
///
/// Every input record lands in exactly one output row: singleton clusters
/// pass their original row through unchanged, larger clusters collapse into
/// one merged row. Output order follows cluster discovery order, which is
/// deterministic for a given input enumeration but not required to match
/// input order.
pub fn reassemble(
    records: &[Record],
    config: &ReassemblyConfig,
    date_idx: usize,
    msg_idx: usize,
) -> Vec<Vec<String>> {
    let graph = build_candidate_graph(records, config);
    let components = find_components(&graph);
    let merger = FragmentMerger::new(config);

    components
        .iter()
        .map(|cluster| merger.merge(records, cluster, date_idx, msg_idx))
        .collect()
}

/// Statistics about a reassembly run.
#[derive(Debug, Clone, Copy)]
pub struct ReassemblyStats {
    /// Records that entered clustering
    pub input_count: usize,
    /// Rows emitted (singletons plus merged clusters)
    pub output_count: usize,
}

impl ReassemblyStats {
    /// Creates stats from raw counts.
    pub fn new(input_count: usize, output_count: usize) -> Self {
        Self {
            input_count,
            output_count,
        }
    }

    /// Percentage of rows removed by merging.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_count == 0 {
            return 0.0;
        }
        (1.0 - (self.output_count as f64 / self.input_count as f64)) * 100.0
    }

    /// Number of records absorbed into merges.
    pub fn merged_away(&self) -> usize {
        self.input_count.saturating_sub(self.output_count)
    }
}
