//! Data models for product import
//!
//! This module contains the record types that flow through the import pipeline:
//! candidate records produced by the mapper, verdicts produced by the validator,
//! and the normalized products exchanged with the product gateway.

use crate::constants::{DEFAULT_STATUS, VALID_STATUSES};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Product Status
// =============================================================================

/// Publication status of a catalog product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    /// Visible in the storefront
    #[default]
    Active,
    /// Hidden from the storefront
    Inactive,
    /// Work in progress, never shown
    Draft,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "active",
            ProductStatus::Inactive => "inactive",
            ProductStatus::Draft => "draft",
        }
    }
}

impl FromStr for ProductStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(ProductStatus::Active),
            "inactive" => Ok(ProductStatus::Inactive),
            "draft" => Ok(ProductStatus::Draft),
            other => Err(Error::malformed_input(format!(
                "Unknown product status '{}' (expected one of: {})",
                other,
                VALID_STATUSES.join(", ")
            ))),
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Candidate Record
// =============================================================================

/// A value the mapper could not coerce, left for the validator to report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "field", content = "raw", rename_all = "camelCase")]
pub enum CoercionIssue {
    /// `price` text was not a finite number; price was set to 0
    UnparsablePrice(String),
    /// `originalPrice` text was not a finite number; it was dropped
    UnparsableOriginalPrice(String),
}

/// One data row projected onto canonical product fields, before validation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    /// 1-based data row number (the header row is not counted)
    pub row: usize,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub category: String,
    pub product_type: String,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub images: Vec<String>,
    pub in_stock: bool,
    /// Raw status text; checked against the status vocabulary by the validator
    pub status: String,
    pub featured: bool,
    /// Coercion failures flagged by the mapper
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<CoercionIssue>,
}

impl CandidateRecord {
    /// Create an empty candidate for the given row with mapper defaults applied
    pub fn empty(row: usize) -> Self {
        Self {
            row,
            name: String::new(),
            description: String::new(),
            price: 0.0,
            original_price: None,
            category: String::new(),
            product_type: String::new(),
            sizes: Vec::new(),
            colors: Vec::new(),
            images: Vec::new(),
            in_stock: false,
            status: DEFAULT_STATUS.to_string(),
            featured: false,
            issues: Vec::new(),
        }
    }

    /// Whether the mapper could not read the price text as a number
    pub fn price_unparsable(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| matches!(issue, CoercionIssue::UnparsablePrice(_)))
    }
}

// =============================================================================
// Validation Verdict
// =============================================================================

/// Validity verdict for exactly one candidate record
///
/// Validity is derived from the error list at construction and cannot be set
/// independently: a verdict with errors is always invalid, and warnings never
/// change the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    row: usize,
    valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Verdict {
    pub fn new(row: usize, errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            row,
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Automatic verdict for a row that could not be mapped at all
    pub fn rejected(row: usize, error: impl Into<String>) -> Self {
        Self::new(row, vec![error.into()], Vec::new())
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

// =============================================================================
// Gateway Records
// =============================================================================

/// Normalized product submitted to the product gateway
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub category: String,
    pub product_type: String,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub images: Vec<String>,
    pub in_stock: bool,
    pub status: ProductStatus,
    pub featured: bool,
}

impl TryFrom<&CandidateRecord> for NewProduct {
    type Error = Error;

    fn try_from(candidate: &CandidateRecord) -> Result<Self> {
        Ok(Self {
            name: candidate.name.clone(),
            description: candidate.description.clone(),
            price: candidate.price,
            original_price: candidate.original_price,
            category: candidate.category.clone(),
            product_type: candidate.product_type.clone(),
            sizes: candidate.sizes.clone(),
            colors: candidate.colors.clone(),
            images: candidate.images.clone(),
            in_stock: candidate.in_stock,
            status: candidate.status.parse()?,
            featured: candidate.featured,
        })
    }
}

/// Confirmation returned by the gateway for a created product
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedProduct {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing_is_case_insensitive() {
        assert_eq!("ACTIVE".parse::<ProductStatus>().unwrap(), ProductStatus::Active);
        assert_eq!(" Draft ".parse::<ProductStatus>().unwrap(), ProductStatus::Draft);
        assert_eq!(
            "inactive".parse::<ProductStatus>().unwrap(),
            ProductStatus::Inactive
        );
        assert!("archived".parse::<ProductStatus>().is_err());
    }

    #[test]
    fn test_verdict_validity_follows_errors() {
        let valid = Verdict::new(3, Vec::new(), vec!["Row 3: warning".to_string()]);
        assert!(valid.is_valid());
        assert_eq!(valid.warnings().len(), 1);

        let invalid = Verdict::rejected(4, "Row 4: Insufficient columns");
        assert!(!invalid.is_valid());
        assert_eq!(invalid.row(), 4);
        assert_eq!(invalid.errors(), ["Row 4: Insufficient columns"]);
    }

    #[test]
    fn test_new_product_from_candidate() {
        let mut candidate = CandidateRecord::empty(1);
        candidate.name = "Linen Shirt".to_string();
        candidate.price = 49.5;
        candidate.category = "Tops".to_string();
        candidate.product_type = "shirt".to_string();
        candidate.status = "Draft".to_string();

        let product = NewProduct::try_from(&candidate).unwrap();
        assert_eq!(product.name, "Linen Shirt");
        assert_eq!(product.status, ProductStatus::Draft);

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["productType"], "shirt");
        assert_eq!(json["status"], "draft");
        assert!(json.get("originalPrice").is_none());
    }
}
