//! Tabular readers and writers for delivery logs.
//!
//! The logs are tab-delimited text with a header row. Message bodies contain
//! raw quote characters, so the reader runs with quoting disabled; the
//! writers quote minimally, only when a field would otherwise break the row.
//!
//! - [`reader`] - header-resolved delivery log reading
//! - [`writer`] - delivery log and report writing

pub mod reader;
pub mod writer;

pub use reader::{read_log, LogData};
pub use writer::write_rows;
