//! Projection of data rows onto candidate product records
//!
//! The mapper never rejects a row for bad values. Numbers that cannot be read
//! are replaced by defaults and flagged on the candidate so the validator can
//! report them. The only structural failure is a row with fewer fields than
//! the header.

use tracing::debug;

use super::field_parsers::{get_non_empty_field, parse_flag, parse_number, split_list};
use super::header::HeaderMap;
use crate::app::models::{CandidateRecord, CoercionIssue, Verdict};
use crate::constants::{IMAGE_SEPARATOR, LIST_SEPARATOR, headers};

/// A row that cannot be mapped at all
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowDefect {
    /// The row has fewer fields than the header row
    InsufficientColumns {
        row: usize,
        found: usize,
        expected: usize,
    },
}

impl RowDefect {
    pub fn row(&self) -> usize {
        match self {
            RowDefect::InsufficientColumns { row, .. } => *row,
        }
    }

    /// User-facing message for the defect
    pub fn message(&self) -> String {
        match self {
            RowDefect::InsufficientColumns { row, .. } => {
                format!("Row {}: Insufficient columns", row)
            }
        }
    }

    /// Automatic invalid verdict for the defective row
    pub fn to_verdict(&self) -> Verdict {
        Verdict::rejected(self.row(), self.message())
    }
}

/// Map one data row onto a candidate record
///
/// `row` is the 1-based data row number carried into every later message.
pub fn map_record(
    header: &HeaderMap,
    fields: &[String],
    row: usize,
) -> Result<CandidateRecord, RowDefect> {
    if fields.len() < header.width() {
        debug!(
            "Row {} has {} fields, header has {}",
            row,
            fields.len(),
            header.width()
        );
        return Err(RowDefect::InsufficientColumns {
            row,
            found: fields.len(),
            expected: header.width(),
        });
    }

    let text = |column: &str| get_non_empty_field(fields, header, column);
    let mut candidate = CandidateRecord::empty(row);

    candidate.name = text(headers::NAME).unwrap_or_default().to_string();
    candidate.description = text(headers::DESCRIPTION).unwrap_or_default().to_string();
    candidate.category = text(headers::CATEGORY).unwrap_or_default().to_string();
    candidate.product_type = text(headers::PRODUCT_TYPE).unwrap_or_default().to_string();

    if let Some(raw) = text(headers::PRICE) {
        match parse_number(raw) {
            Some(price) => candidate.price = price,
            None => candidate
                .issues
                .push(CoercionIssue::UnparsablePrice(raw.to_string())),
        }
    }

    if let Some(raw) = text(headers::ORIGINAL_PRICE) {
        match parse_number(raw) {
            Some(original_price) => candidate.original_price = Some(original_price),
            None => candidate
                .issues
                .push(CoercionIssue::UnparsableOriginalPrice(raw.to_string())),
        }
    }

    candidate.sizes = text(headers::SIZES)
        .map(|raw| split_list(raw, LIST_SEPARATOR))
        .unwrap_or_default();
    candidate.colors = text(headers::COLORS)
        .map(|raw| split_list(raw, LIST_SEPARATOR))
        .unwrap_or_default();
    candidate.images = text(headers::IMAGES)
        .map(|raw| split_list(raw, IMAGE_SEPARATOR))
        .unwrap_or_default();

    candidate.in_stock = text(headers::IN_STOCK).is_some_and(parse_flag);
    candidate.featured = text(headers::FEATURED).is_some_and(parse_flag);

    if let Some(status) = text(headers::STATUS) {
        candidate.status = status.to_string();
    }

    Ok(candidate)
}
