//! Quote-aware splitting of uploaded text into rows of fields
//!
//! Records are separated by newlines and fields by commas. A field that starts
//! with a double quote may contain commas, and a doubled quote inside it stands
//! for one literal quote. Quoted fields never span lines.

use csv::{ReaderBuilder, StringRecord, Terminator};
use tracing::debug;

use crate::constants::{FIELD_DELIMITER, MIN_ROWS, QUOTE_CHAR};
use crate::{Error, Result};

/// Ordered fields of one line, with no meaning until mapped
pub type RawRow = Vec<String>;

/// Split the full text of an upload into rows, dropping blank lines
///
/// Fails with a malformed input error when fewer than two non-blank rows
/// remain, since an import needs a header and at least one data row.
pub fn parse_rows(text: &str) -> Result<Vec<RawRow>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut rows = Vec::new();

    for (line_index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let row = parse_line(line).map_err(|e| {
            Error::csv_parsing(format!("Failed to split line {}", line_index + 1), Some(e))
        })?;
        rows.push(row);
    }

    if rows.len() < MIN_ROWS {
        return Err(Error::malformed_input(format!(
            "File must contain a header row and at least one data row (found {} non-empty rows)",
            rows.len()
        )));
    }

    debug!("Split input into {} rows", rows.len());
    Ok(rows)
}

/// Split a single line into fields
pub fn parse_line(line: &str) -> std::result::Result<RawRow, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(FIELD_DELIMITER)
        .quote(QUOTE_CHAR)
        .double_quote(true)
        .terminator(Terminator::Any(b'\n'))
        .from_reader(line.as_bytes());

    let mut record = StringRecord::new();
    if reader.read_record(&mut record)? {
        Ok(record.iter().map(str::to_string).collect())
    } else {
        Ok(Vec::new())
    }
}
