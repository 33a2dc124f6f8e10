//! Header row resolution for product uploads
//!
//! This module maps the first row of an upload to column positions and checks
//! that every mandatory product column is present before any data row is read.

use std::collections::HashMap;
use tracing::debug;

use crate::constants::headers;
use crate::{Error, Result};

/// Column positions resolved from the header row
///
/// Built once per upload and never modified. Columns that are not part of the
/// product vocabulary are kept so that the row width check still counts them.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderMap {
    /// Normalized header cells in file order
    columns: Vec<String>,

    /// Normalized column name to index mapping (first occurrence wins)
    name_to_index: HashMap<String, usize>,
}

impl HeaderMap {
    /// Resolve a header row, failing if any mandatory column is absent
    ///
    /// The error lists every missing mandatory column, not just the first.
    pub fn resolve(header_row: &[String]) -> Result<Self> {
        let columns: Vec<String> = header_row.iter().map(|cell| normalize_header(cell)).collect();

        let mut name_to_index = HashMap::new();
        for (index, column) in columns.iter().enumerate() {
            if column.is_empty() {
                continue;
            }
            name_to_index.entry(column.clone()).or_insert(index);
        }

        let missing: Vec<String> = headers::REQUIRED
            .iter()
            .filter(|required| !name_to_index.contains_key(**required))
            .map(|required| headers::display_name(required).to_string())
            .collect();

        if !missing.is_empty() {
            return Err(Error::missing_headers(missing));
        }

        let header = Self {
            columns,
            name_to_index,
        };

        let unrecognized = header.unrecognized_columns();
        if !unrecognized.is_empty() {
            debug!("Ignoring unrecognized columns: {:?}", unrecognized);
        }

        Ok(header)
    }

    /// Get the index for a normalized column name
    pub fn get_index(&self, column_name: &str) -> Option<usize> {
        self.name_to_index.get(column_name).copied()
    }

    /// Check if a column exists in the mapping
    pub fn has_column(&self, column_name: &str) -> bool {
        self.name_to_index.contains_key(column_name)
    }

    /// Number of header cells; data rows shorter than this are rejected
    pub fn width(&self) -> usize {
        self.columns.len()
    }


    /// Header cells that are neither required nor optional product columns
    pub fn unrecognized_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(String::as_str)
            .filter(|column| {
                !headers::REQUIRED.contains(column) && !headers::OPTIONAL.contains(column)
            })
            .collect()
    }
}

/// Normalize a header cell: trimmed and lower-cased
pub fn normalize_header(cell: &str) -> String {
    cell.trim().to_lowercase()
}
