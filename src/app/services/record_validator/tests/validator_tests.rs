//! Tests for per-record validation

use super::*;
use crate::app::models::CoercionIssue;
use crate::app::services::csv_parser::{HeaderMap, parse_rows};
use crate::app::services::record_validator::{validate_record, validate_rows};

#[test]
fn test_valid_candidate_has_no_messages() {
    let verdict = validate_record(&create_valid_candidate(1));

    assert!(verdict.is_valid());
    assert!(verdict.errors().is_empty());
    assert!(verdict.warnings().is_empty());
}

#[test]
fn test_zero_price_is_always_invalid() {
    let mut candidate = create_valid_candidate(2);
    candidate.price = 0.0;

    let verdict = validate_record(&candidate);
    assert!(!verdict.is_valid());
    assert_eq!(verdict.errors(), ["Row 2: Price must be greater than 0"]);
}

#[test]
fn test_negative_price_is_invalid() {
    let mut candidate = create_valid_candidate(1);
    candidate.price = -3.5;
    assert!(!validate_record(&candidate).is_valid());
}

#[test]
fn test_unparsable_price_has_its_own_message() {
    let mut candidate = create_valid_candidate(4);
    candidate
        .issues
        .push(CoercionIssue::UnparsablePrice("abc".to_string()));
    candidate.price = 0.0;

    let verdict = validate_record(&candidate);
    assert_eq!(verdict.errors(), ["Row 4: Price must be a valid number"]);
}

#[test]
fn test_missing_required_fields_are_all_reported() {
    let mut candidate = create_valid_candidate(5);
    candidate.name = "   ".to_string();
    candidate.category = String::new();
    candidate.product_type = String::new();
    candidate.status = "archived".to_string();

    let verdict = validate_record(&candidate);
    assert!(!verdict.is_valid());
    assert_eq!(
        verdict.errors(),
        [
            "Row 5: Name is required",
            "Row 5: Category is required",
            "Row 5: Product type is required",
            "Row 5: Status must be one of: active, inactive, draft",
        ]
    );
}

#[test]
fn test_status_is_case_insensitive() {
    for status in ["ACTIVE", "Inactive", "draft"] {
        let mut candidate = create_valid_candidate(1);
        candidate.status = status.to_string();
        assert!(validate_record(&candidate).is_valid(), "status {}", status);
    }
}

#[test]
fn test_non_discount_original_price_warns_once() {
    let mut candidate = create_valid_candidate(3);
    candidate.original_price = Some(candidate.price);

    let verdict = validate_record(&candidate);
    assert!(verdict.is_valid());
    assert_eq!(verdict.warnings().len(), 1);
    assert!(verdict.warnings()[0].starts_with("Row 3:"));
    assert!(verdict.warnings()[0].contains("Original price"));
}

#[test]
fn test_discount_original_price_does_not_warn() {
    let mut candidate = create_valid_candidate(1);
    candidate.original_price = Some(30.0);
    assert!(validate_record(&candidate).warnings().is_empty());
}

#[test]
fn test_relative_image_urls_warn_per_url() {
    let mut candidate = create_valid_candidate(6);
    candidate.images = vec![
        "https://cdn.example.com/ok.jpg".to_string(),
        "/uploads/beanie.jpg".to_string(),
        "ftp://files.example.com/x.png".to_string(),
        "http://cdn.example.com/ok2.jpg".to_string(),
    ];

    let verdict = validate_record(&candidate);
    assert!(verdict.is_valid());
    assert_eq!(
        verdict.warnings(),
        [
            "Row 6: Image URL may be invalid: /uploads/beanie.jpg",
            "Row 6: Image URL may be invalid: ftp://files.example.com/x.png",
        ]
    );
}

#[test]
fn test_warnings_do_not_rescue_invalid_records() {
    let mut candidate = create_valid_candidate(8);
    candidate.price = 0.0;
    candidate.original_price = Some(0.0);
    candidate
        .issues
        .push(CoercionIssue::UnparsableOriginalPrice("soon".to_string()));

    let verdict = validate_record(&candidate);
    assert!(!verdict.is_valid());
    assert_eq!(verdict.warnings().len(), 2);
}

#[test]
fn test_validation_is_idempotent() {
    let mut candidate = create_valid_candidate(9);
    candidate.name = String::new();
    candidate.images = vec!["beanie.jpg".to_string()];

    let first = validate_record(&candidate);
    let second = validate_record(&candidate);
    assert_eq!(first, second);
}

#[test]
fn test_validate_rows_numbers_rows_and_isolates_defects() {
    let rows = parse_rows(
        "name,price,category,productType\n\
         Tee,10,Tops,shirt\n\
         Cap,0,Hats,hat\n\
         Short,5\n\
         Sock,3,Feet,sock",
    )
    .unwrap();
    let header = HeaderMap::resolve(&rows[0]).unwrap();

    let validated = validate_rows(&header, &rows[1..]);

    assert_eq!(validated.len(), 4);
    assert_eq!(
        validated.iter().map(|row| row.row()).collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );
    assert!(validated[0].is_valid());
    assert!(!validated[1].is_valid());
    assert!(validated[2].candidate.is_none());
    assert_eq!(validated[2].verdict.errors(), ["Row 3: Insufficient columns"]);
    assert!(validated[3].valid_candidate().is_some());
    assert!(validated[1].valid_candidate().is_none());
}
