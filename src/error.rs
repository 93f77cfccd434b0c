//! Unified error types for smstitch.
//!
//! This module provides a single [`SmstitchError`] enum that covers all error
//! cases in the library.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Developers** get source error chains for debugging
//!
//! Malformed *rows* (missing phone/message, unparseable timestamp) are not
//! errors: the readers skip them and the pipeline continues with reduced
//! input. Errors here are reserved for conditions that make the whole run
//! meaningless — unreadable files, a missing required column, a broken
//! report header.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for smstitch operations.
///
/// # Example
///
/// ```rust
/// use smstitch::error::Result;
/// use smstitch::Record;
///
/// fn my_function() -> Result<Vec<Record>> {
///     // ... operations that may fail
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, SmstitchError>;

/// The error type for all smstitch operations.
///
/// Each variant contains context about what went wrong and, where applicable,
/// the underlying source error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SmstitchError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV reading/writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is missing from the input header.
    ///
    /// The readers resolve columns by name from the header row; without the
    /// named column the file cannot be processed at all.
    #[error("Missing required column '{column}'{}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    MissingColumn {
        /// The column name that was expected
        column: String,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The file doesn't match the expected tabular structure.
    ///
    /// This occurs when:
    /// - The input has no header row
    /// - A report file carries an unrecognized header
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected (e.g. "delivery log", "pattern report")
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// A numeric report field could not be parsed.
    ///
    /// Report aggregation requires the `Total Count`, `Length` and
    /// `SMS Segments` columns to hold integers.
    #[error("Invalid number '{input}' in column '{column}'")]
    InvalidNumber {
        /// The value that failed to parse
        input: String,
        /// The column it came from
        column: String,
    },
}

impl SmstitchError {
    /// Creates a missing-column error.
    pub fn missing_column(column: impl Into<String>, path: Option<PathBuf>) -> Self {
        SmstitchError::MissingColumn {
            column: column.into(),
            path,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        SmstitchError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid number error.
    pub fn invalid_number(input: impl Into<String>, column: impl Into<String>) -> Self {
        SmstitchError::InvalidNumber {
            input: input.into(),
            column: column.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, SmstitchError::Io(_))
    }

    /// Returns `true` if this is a missing-column error.
    pub fn is_missing_column(&self) -> bool {
        matches!(self, SmstitchError::MissingColumn { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, SmstitchError::InvalidFormat { .. })
    }
}
