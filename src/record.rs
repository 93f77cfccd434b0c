//! The delivery record type at the heart of the reassembly engine.
//!
//! This module provides [`Record`], the in-memory representation of one row
//! of a delivery log. The tabular reader converts each well-formed row into
//! this structure; everything downstream (token extraction, candidate graph,
//! merging) works on an immutable slice of `Record`s addressed by index.
//!
//! # Overview
//!
//! A record consists of:
//! - **Identity**: `phone` — the only key fragments are ever compared under
//! - **Ordering**: `timestamp` — parsed from an ISO-like textual field
//! - **Content**: `text` — the free-form message body
//! - **Round-trip payload**: `row` — every original field, kept verbatim so
//!   pass-through records can be re-emitted untouched
//!
//! # Examples
//!
//! ```
//! use smstitch::Record;
//!
//! let rec = Record::new(
//!     "77010000001",
//!     "2025-05-01T12:00:00".parse().unwrap(),
//!     "Sizge 123456 kody bar",
//!     vec!["77010000001".into(), "2025-05-01T12:00:00".into(), "Sizge 123456 kody bar".into()],
//! );
//! assert_eq!(rec.phone(), "77010000001");
//! ```

use chrono::NaiveDateTime;

/// Textual timestamp formats accepted by [`parse_timestamp`], tried in order.
///
/// The logs use ISO-8601-like timestamps with either a `T` or a space
/// separator, with or without fractional seconds.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parses a delivery-log timestamp field.
///
/// Returns `None` when no known format matches; the readers treat that row
/// as malformed and exclude it from clustering entirely.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// One row of a delivery log, normalized for reassembly.
///
/// Records are immutable once loaded: no component ever mutates a `Record`
/// in place. The merger builds fresh output rows instead.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `phone` | `String` | Recipient identity key; fragments never cross phones |
/// | `timestamp` | `NaiveDateTime` | Delivery instant, parsed from the date column |
/// | `text` | `String` | Trimmed message body |
/// | `row` | `Vec<String>` | All original fields, in header order |
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Recipient phone number. The candidate graph only ever proposes edges
    /// between records sharing this value.
    pub phone: String,

    /// Delivery timestamp.
    pub timestamp: NaiveDateTime,

    /// Trimmed message body.
    pub text: String,

    /// The full original row, preserved for round-trip output. Pass-through
    /// records are emitted from this field byte-for-byte.
    pub row: Vec<String>,
}

impl Record {
    /// Creates a record from its parts.
    pub fn new(
        phone: impl Into<String>,
        timestamp: NaiveDateTime,
        text: impl Into<String>,
        row: Vec<String>,
    ) -> Self {
        Self {
            phone: phone.into(),
            timestamp,
            text: text.into(),
            row,
        }
    }

    /// Returns the phone number.
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Returns the delivery timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the message body.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the original row fields, in header order.
    pub fn row(&self) -> &[String] {
        &self.row
    }
}
