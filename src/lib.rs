//! # Smstitch
//!
//! A Rust library for reassembling fragmented SMS delivery logs and building
//! generalized message-pattern reports.
//!
//! ## Overview
//!
//! Carrier delivery logs record one row per *physical* transmission. A long
//! message crosses the transport length limit and arrives as several rows;
//! occasionally the parts even arrive out of order. Smstitch stitches those
//! fragments back into logical messages, and abstracts variable content
//! (numbers, money amounts, codes, links) into placeholder patterns so that
//! structurally identical messages can be counted together.
//!
//! The crate has three layers:
//!
//! - the **reassembly engine** ([`core`]): per-phone candidate graphs over
//!   time-close records, connected components, ordered merging
//! - the **pattern generalizer** ([`pattern`]): masking passes plus a
//!   prioritized rewrite-rule table
//! - the **reports** ([`report`]): frequency, aggregation, top-N and
//!   substring-scan views over a log
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use smstitch::config::{ColumnSpec, ReassemblyConfig};
//! use smstitch::core::reassemble;
//! use smstitch::io::{read_log, write_rows};
//! use smstitch::Result;
//!
//! fn main() -> Result<()> {
//!     let columns = ColumnSpec::new();
//!     let log = read_log(Path::new("delivery.csv"), &columns)?;
//!
//!     let rows = reassemble(
//!         &log.records,
//!         &ReassemblyConfig::new(),
//!         log.date_idx,
//!         log.msg_idx,
//!     );
//!
//!     write_rows(Path::new("merged.csv"), &log.header, &rows)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`core`] — the fragment reassembly engine
//!   - [`core::tokens`] — structured-token extraction
//!   - [`core::graph`] — candidate graph and connected components
//!   - [`core::merge`] — fragment ordering and merging
//! - [`pattern`] — masking, generalization rules, segment computation
//! - [`report`] — frequency/aggregate/top/find reports
//! - [`io`] — tab-delimited log readers and writers
//! - [`config`] — [`ReassemblyConfig`](config::ReassemblyConfig),
//!   [`ColumnSpec`](config::ColumnSpec)
//! - [`record`] — the [`Record`] type and timestamp parsing
//! - [`error`] — unified error types ([`SmstitchError`], [`Result`])
//! - [`prelude`] — convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod pattern;
pub mod record;
pub mod report;

// Re-export the main types at the crate root for convenience
pub use error::{Result, SmstitchError};
pub use record::Record;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use smstitch::prelude::*;
/// ```
pub mod prelude {
    // Core record type
    pub use crate::Record;

    // Error types
    pub use crate::error::{Result, SmstitchError};

    // Configuration
    pub use crate::config::{ColumnSpec, ReassemblyConfig};

    // Reassembly engine
    pub use crate::core::{
        build_candidate_graph, find_components, reassemble, FragmentMerger, ReassemblyStats,
        TokenExtractor,
    };

    // Pattern generalization
    pub use crate::pattern::{compute_segments, Generalizer, Masker, RuleSet};

    // Reports
    pub use crate::report::{
        aggregate_report, build_frequency_report, build_top_report, find_patterns,
        AggregateRow, PatternMatches, PatternRow, TopReport,
    };

    // Log I/O
    pub use crate::io::{read_log, write_rows, LogData};
}
