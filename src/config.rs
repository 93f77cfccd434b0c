//! Configuration types for the reassembly engine and the tabular readers.
//!
//! This module provides clean configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! # Example
//!
//! ```rust
//! use smstitch::config::ReassemblyConfig;
//!
//! let config = ReassemblyConfig::new()
//!     .with_time_window(20)
//!     .with_min_shared_tokens(2);
//! ```

use serde::{Deserialize, Serialize};

/// Column names used to locate the required fields in a delivery log header.
///
/// All other columns are passed through opaquely in the original-row
/// template.
///
/// # Example
///
/// ```rust
/// use smstitch::config::ColumnSpec;
///
/// let columns = ColumnSpec::new()
///     .with_date("submission_date");
/// assert_eq!(columns.date, "submission_date");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Phone identifier column (default: `phone`)
    pub phone: String,

    /// Timestamp column (default: `send_date`)
    pub date: String,

    /// Message body column (default: `message`)
    pub message: String,

    /// Traffic type column, used by the reports (default: `traffic_type`)
    pub traffic_type: String,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            phone: "phone".to_string(),
            date: "send_date".to_string(),
            message: "message".to_string(),
            traffic_type: "traffic_type".to_string(),
        }
    }
}

impl ColumnSpec {
    /// Creates a spec with the default column names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the phone column name.
    #[must_use]
    pub fn with_phone(mut self, name: impl Into<String>) -> Self {
        self.phone = name.into();
        self
    }

    /// Sets the timestamp column name.
    #[must_use]
    pub fn with_date(mut self, name: impl Into<String>) -> Self {
        self.date = name.into();
        self
    }

    /// Sets the message column name.
    #[must_use]
    pub fn with_message(mut self, name: impl Into<String>) -> Self {
        self.message = name.into();
        self
    }

    /// Sets the traffic type column name.
    #[must_use]
    pub fn with_traffic_type(mut self, name: impl Into<String>) -> Self {
        self.traffic_type = name.into();
        self
    }
}

/// Configuration for the fragment reassembly engine.
///
/// The defaults reproduce the observed transport behavior; the opener-marker
/// list in particular is a closed, small set and should not be extended
/// without evidence from real traffic.
///
/// # Example
///
/// ```rust
/// use smstitch::config::ReassemblyConfig;
///
/// let config = ReassemblyConfig::new().with_time_window(30);
/// assert_eq!(config.time_window_secs, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReassemblyConfig {
    /// Maximum timestamp distance, in seconds, between two records that may
    /// still be fragments of one message (default: 20)
    pub time_window_secs: i64,

    /// Minimum number of shared structured tokens that counts as strong
    /// same-message evidence (default: 2)
    pub min_shared_tokens: usize,

    /// Message-opener prefixes used by the two-part swap correction.
    ///
    /// When a two-fragment cluster arrives with the continuation first, the
    /// fragment starting with one of these markers is moved to the front
    /// (default: `Sizge`, `Salemdeme`, `/t/`).
    pub opener_markers: Vec<String>,
}

impl Default for ReassemblyConfig {
    fn default() -> Self {
        Self {
            time_window_secs: 20,
            min_shared_tokens: 2,
            opener_markers: vec![
                "Sizge".to_string(),
                "Salemdeme".to_string(),
                "/t/".to_string(),
            ],
        }
    }
}

impl ReassemblyConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pairing time window, in seconds.
    #[must_use]
    pub fn with_time_window(mut self, secs: i64) -> Self {
        self.time_window_secs = secs;
        self
    }

    /// Sets the shared-token threshold.
    #[must_use]
    pub fn with_min_shared_tokens(mut self, count: usize) -> Self {
        self.min_shared_tokens = count;
        self
    }

    /// Replaces the opener-marker list.
    #[must_use]
    pub fn with_opener_markers(mut self, markers: Vec<String>) -> Self {
        self.opener_markers = markers;
        self
    }

    /// Returns `true` if `text` begins with one of the opener markers.
    pub fn starts_with_opener(&self, text: &str) -> bool {
        self.opener_markers.iter().any(|m| text.starts_with(m))
    }
}
