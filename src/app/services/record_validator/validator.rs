//! Per-record validation checks
//!
//! Blocking checks cover the fields a product cannot be created without.
//! Warnings flag data that will import but probably displays wrongly.

use tracing::debug;

use crate::app::models::{CandidateRecord, CoercionIssue, Verdict};
use crate::app::services::csv_parser::{HeaderMap, RawRow, RowDefect, map_record};
use crate::constants::{IMAGE_URL_PREFIXES, VALID_STATUSES};

/// A data row after mapping and validation
///
/// `candidate` is `None` when the row could not be mapped at all; such rows
/// always carry an invalid verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRow {
    pub candidate: Option<CandidateRecord>,
    pub verdict: Verdict,
}

impl ValidatedRow {
    pub fn row(&self) -> usize {
        self.verdict.row()
    }

    pub fn is_valid(&self) -> bool {
        self.verdict.is_valid()
    }

    /// The candidate, if the row is valid and ready for submission
    pub fn valid_candidate(&self) -> Option<&CandidateRecord> {
        self.candidate.as_ref().filter(|_| self.verdict.is_valid())
    }
}

/// Validate a single candidate record
///
/// # Arguments
///
/// * `candidate` - Candidate record carrying its 1-based row number
///
/// # Returns
///
/// A verdict whose validity is true exactly when no error was found
pub fn validate_record(candidate: &CandidateRecord) -> Verdict {
    let row = candidate.row;
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if candidate.name.trim().is_empty() {
        errors.push(format!("Row {}: Name is required", row));
    }

    if candidate.price_unparsable() {
        errors.push(format!("Row {}: Price must be a valid number", row));
    } else if candidate.price <= 0.0 {
        errors.push(format!("Row {}: Price must be greater than 0", row));
    }

    if candidate.category.trim().is_empty() {
        errors.push(format!("Row {}: Category is required", row));
    }

    if candidate.product_type.trim().is_empty() {
        errors.push(format!("Row {}: Product type is required", row));
    }

    if !is_valid_status(&candidate.status) {
        errors.push(format!(
            "Row {}: Status must be one of: {}",
            row,
            VALID_STATUSES.join(", ")
        ));
    }

    if let Some(original_price) = candidate.original_price {
        if original_price <= candidate.price {
            warnings.push(format!(
                "Row {}: Original price should be greater than price",
                row
            ));
        }
    }

    for issue in &candidate.issues {
        if let CoercionIssue::UnparsableOriginalPrice(raw) = issue {
            warnings.push(format!(
                "Row {}: Original price '{}' is not a number and was ignored",
                row, raw
            ));
        }
    }

    for image in &candidate.images {
        if !IMAGE_URL_PREFIXES
            .iter()
            .any(|prefix| image.starts_with(prefix))
        {
            warnings.push(format!("Row {}: Image URL may be invalid: {}", row, image));
        }
    }

    Verdict::new(row, errors, warnings)
}

/// Map and validate every data row against a resolved header
///
/// Rows are numbered from 1 in the order given. A row that cannot be mapped
/// gets an automatic invalid verdict and does not stop the others.
pub fn validate_rows(header: &HeaderMap, data_rows: &[RawRow]) -> Vec<ValidatedRow> {
    data_rows
        .iter()
        .enumerate()
        .map(|(index, fields)| match map_record(header, fields, index + 1) {
            Ok(candidate) => {
                let verdict = validate_record(&candidate);
                if !verdict.is_valid() {
                    debug!("Row {} rejected: {:?}", verdict.row(), verdict.errors());
                }
                ValidatedRow {
                    candidate: Some(candidate),
                    verdict,
                }
            }
            Err(defect) => defect_row(&defect),
        })
        .collect()
}

fn defect_row(defect: &RowDefect) -> ValidatedRow {
    debug!("Row {} rejected: {}", defect.row(), defect.message());
    ValidatedRow {
        candidate: None,
        verdict: defect.to_verdict(),
    }
}

fn is_valid_status(status: &str) -> bool {
    let status = status.trim();
    VALID_STATUSES
        .iter()
        .any(|valid| valid.eq_ignore_ascii_case(status))
}
