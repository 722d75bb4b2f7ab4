//! CSV dataset reading and writing.
//!
//! Reading yields a [`RawTable`] with blank cells as `None`, so the
//! pipeline's empty-row and duplicate-row passes see the file as-is.
//! Writing emits corrected records in the original column order.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, Writer};
use tracing::debug;

use crate::error::{CorrectorError, CorrectorResult};
use crate::models::{RawTable, Record, text_cell};

/// Reads a CSV file with a header row into a raw table.
///
/// # Errors
///
/// Returns `DatasetRead` if the file cannot be opened or is not valid CSV.
pub fn read_csv<P: AsRef<Path>>(path: P) -> CorrectorResult<RawTable> {
    let path = path.as_ref();
    let source = path.display().to_string();
    let file = File::open(path).map_err(|e| CorrectorError::DatasetRead {
        path: source.clone(),
        message: e.to_string(),
    })?;
    read_csv_from(file, &source)
}

/// Reads CSV from any reader; `source` names it in error messages.
///
/// Rows may be shorter or longer than the header; they are padded or
/// truncated to the header width.
///
/// # Examples
///
/// ```
/// use premium_cleaner::io::read_csv_from;
///
/// let data = "Age,Region\n30,Gauteng\n,\n";
/// let table = read_csv_from(data.as_bytes(), "inline")?;
/// assert_eq!(table.columns, vec!["Age", "Region"]);
/// assert_eq!(table.rows[1], vec![None, None]);
/// # Ok::<(), premium_cleaner::error::CorrectorError>(())
/// ```
pub fn read_csv_from<R: Read>(reader: R, source: &str) -> CorrectorResult<RawTable> {
    let read_error = |e: csv::Error| CorrectorError::DatasetRead {
        path: source.to_string(),
        message: e.to_string(),
    };

    let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns: Vec<String> = csv_reader
        .headers()
        .map_err(read_error)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut table = RawTable::new(columns);
    for record in csv_reader.records() {
        let record = record.map_err(read_error)?;
        table.push_row(record.iter().map(text_cell).collect());
    }

    debug!(
        source,
        columns = table.columns.len(),
        rows = table.len(),
        "Read CSV dataset"
    );
    Ok(table)
}

/// Writes records to a CSV file under the given header.
///
/// # Errors
///
/// Returns `DatasetWrite` if the file cannot be created or written.
pub fn write_csv<P: AsRef<Path>>(
    path: P,
    columns: &[String],
    records: &[Record],
) -> CorrectorResult<()> {
    let path = path.as_ref();
    let destination = path.display().to_string();
    let file = File::create(path).map_err(|e| CorrectorError::DatasetWrite {
        path: destination.clone(),
        message: e.to_string(),
    })?;
    write_csv_to(file, columns, records, &destination)
}

/// Writes records as CSV to any writer; `destination` names it in error
/// messages.
pub fn write_csv_to<W: Write>(
    writer: W,
    columns: &[String],
    records: &[Record],
    destination: &str,
) -> CorrectorResult<()> {
    let write_error = |message: String| CorrectorError::DatasetWrite {
        path: destination.to_string(),
        message,
    };

    let mut csv_writer = Writer::from_writer(writer);
    csv_writer
        .write_record(columns)
        .map_err(|e| write_error(e.to_string()))?;
    for record in records {
        csv_writer
            .write_record(record.to_cells(columns))
            .map_err(|e| write_error(e.to_string()))?;
    }
    csv_writer.flush().map_err(|e| write_error(e.to_string()))?;

    debug!(destination, rows = records.len(), "Wrote CSV dataset");
    Ok(())
}
