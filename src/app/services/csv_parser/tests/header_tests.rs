//! Tests for header row resolution

use super::super::header::{HeaderMap, normalize_header};
use super::*;
use crate::Error;

#[test]
fn test_header_resolution_is_case_insensitive() {
    let header = HeaderMap::resolve(&fields(&[" NAME ", "Price", "category", "ProductType"])).unwrap();

    assert_eq!(header.get_index("name"), Some(0));
    assert_eq!(header.get_index("price"), Some(1));
    assert_eq!(header.get_index("producttype"), Some(3));
    assert_eq!(header.width(), 4);
}

#[test]
fn test_missing_price_is_reported() {
    let result = HeaderMap::resolve(&fields(&["name", "category", "productType"]));

    match result {
        Err(Error::MissingHeaders { missing }) => assert_eq!(missing, vec!["price"]),
        other => panic!("expected missing headers error, got {:?}", other),
    }
}

#[test]
fn test_every_missing_header_is_listed() {
    let error = HeaderMap::resolve(&fields(&["description", "sizes"])).unwrap_err();

    match &error {
        Error::MissingHeaders { missing } => {
            assert_eq!(missing, &["name", "price", "category", "productType"]);
        }
        other => panic!("expected missing headers error, got {:?}", other),
    }
    assert!(error.is_input_format_error());
    assert_eq!(
        error.to_string(),
        "Missing required headers: name, price, category, productType"
    );
}

#[test]
fn test_missing_header_uses_template_spelling() {
    let error = HeaderMap::resolve(&fields(&["Name", "PRICE", "category"])).unwrap_err();
    assert_eq!(error.to_string(), "Missing required headers: productType");
}

#[test]
fn test_separated_product_type_is_not_recognized() {
    let result = HeaderMap::resolve(&fields(&["name", "price", "category", "product_type"]));
    assert!(matches!(result, Err(Error::MissingHeaders { .. })));
}

#[test]
fn test_unknown_columns_are_retained() {
    let header = header_from("sku,name,price,category,productType,warehouse");

    assert_eq!(header.width(), 6);
    assert!(header.has_column("sku"));
    assert_eq!(header.get_index("name"), Some(1));
    assert_eq!(header.unrecognized_columns(), vec!["sku", "warehouse"]);
}

#[test]
fn test_first_duplicate_column_wins() {
    let header = header_from("name,price,category,productType,Name");
    assert_eq!(header.get_index("name"), Some(0));
    assert_eq!(header.width(), 5);
}

#[test]
fn test_normalize_header() {
    assert_eq!(normalize_header("  OriginalPrice "), "originalprice");
    assert_eq!(normalize_header("inStock"), "instock");
}
