//! Field parsing utilities for product rows
//!
//! Best-effort coercion helpers. None of them fail: values that cannot be
//! coerced come back as `None` so the mapper can flag them for validation.

use super::header::HeaderMap;
use crate::constants::TRUE_LITERAL;

/// Get a trimmed field value by normalized column name
///
/// Returns `None` when the column is absent from the header or the row.
pub fn get_field<'a>(fields: &'a [String], header: &HeaderMap, column_name: &str) -> Option<&'a str> {
    header
        .get_index(column_name)
        .and_then(|index| fields.get(index))
        .map(|value| value.trim())
}

/// Get a trimmed field value, treating absent and empty alike
pub fn get_non_empty_field<'a>(
    fields: &'a [String],
    header: &HeaderMap,
    column_name: &str,
) -> Option<&'a str> {
    get_field(fields, header, column_name).filter(|value| !value.is_empty())
}

/// Parse a finite floating point number
pub fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

/// True only for the literal `true`, compared case-insensitively
pub fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case(TRUE_LITERAL)
}

/// Split a multi-value cell, trimming tokens and dropping empty ones
pub fn split_list(value: &str, separator: char) -> Vec<String> {
    value
        .split(separator)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
