//! Delivery log writer.
//!
//! Emits the same field set as the input, one row per final record, tab
//! delimited with a header row.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use crate::error::Result;

/// Writes a header plus data rows as a tab-delimited file at `path`.
pub fn write_rows(path: &Path, header: &[String], rows: &[Vec<String>]) -> Result<()> {
    let file = File::create(path)?;
    write_rows_to(file, header, rows)
}

/// Writes a header plus data rows to any writer. See [`write_rows`].
pub fn write_rows_to<W: Write>(output: W, header: &[String], rows: &[Vec<String>]) -> Result<()> {
    let mut writer = WriterBuilder::new().delimiter(b'\t').from_writer(output);

    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
