//! Delivery log reader.
//!
//! Resolves the required columns by name from the header row and converts
//! each well-formed data row into a [`Record`]. Rows missing a phone,
//! message or parseable timestamp are excluded from clustering entirely —
//! they are treated as absent, not as error records. That exclusion is
//! intentional, observed behavior of the system, not something to repair.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;

use crate::config::ColumnSpec;
use crate::error::{Result, SmstitchError};
use crate::record::{parse_timestamp, Record};

/// A loaded delivery log: the header, the usable records, and how many rows
/// were dropped as malformed.
#[derive(Debug)]
pub struct LogData {
    /// Header fields, in file order.
    pub header: Vec<String>,
    /// Records that passed validation, in file order.
    pub records: Vec<Record>,
    /// Index of the date column within the header.
    pub date_idx: usize,
    /// Index of the message column within the header.
    pub msg_idx: usize,
    /// Rows excluded for missing fields or unparseable timestamps.
    pub skipped: usize,
}

/// Reads a tab-delimited delivery log from `path`.
///
/// # Errors
///
/// Fails when the file cannot be opened, the header row is absent, or one
/// of the columns named in `columns` is missing from the header. Malformed
/// *data* rows never fail the read; they are counted in
/// [`LogData::skipped`].
pub fn read_log(path: &Path, columns: &ColumnSpec) -> Result<LogData> {
    let file = File::open(path)?;
    read_log_from(BufReader::new(file), columns, Some(path))
}

/// Reads a delivery log from any reader. See [`read_log`].
pub fn read_log_from<R: Read>(
    input: R,
    columns: &ColumnSpec,
    path: Option<&Path>,
) -> Result<LogData> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .flexible(true)
        .from_reader(input);

    let header: Vec<String> = reader
        .headers()?
        .iter()
        .map(|field| field.to_string())
        .collect();
    if header.is_empty() || (header.len() == 1 && header[0].is_empty()) {
        return Err(SmstitchError::invalid_format(
            "delivery log",
            "input has no header row",
        ));
    }

    let column_index = |name: &str| -> Result<usize> {
        header
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| SmstitchError::missing_column(name, path.map(Path::to_path_buf)))
    };
    let phone_idx = column_index(&columns.phone)?;
    let date_idx = column_index(&columns.date)?;
    let msg_idx = column_index(&columns.message)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let row = result?;
        let field = |idx: usize| row.get(idx).unwrap_or("").trim();

        let phone = field(phone_idx);
        let date = field(date_idx);
        let text = field(msg_idx);
        if phone.is_empty() || date.is_empty() || text.is_empty() {
            skipped += 1;
            continue;
        }
        let Some(timestamp) = parse_timestamp(date) else {
            skipped += 1;
            continue;
        };

        // Pad short rows so the original-row template always spans the
        // header width.
        let mut fields: Vec<String> = row.iter().map(|f| f.to_string()).collect();
        fields.resize(header.len(), String::new());

        records.push(Record::new(phone, timestamp, text, fields));
    }

    Ok(LogData {
        header,
        records,
        date_idx,
        msg_idx,
        skipped,
    })
}
