//! Test utilities and fixtures for product CSV parsing
//!
//! This module provides shared fixtures and helper functions used across the
//! parser, header and mapper test modules.

use super::header::HeaderMap;

// Test modules
mod header_tests;

/// Header row with every recognized column, in a mixed-case spelling
pub const FULL_HEADER: &str =
    "Name,Description,Price,OriginalPrice,Category,ProductType,Sizes,Colors,Images,InStock,Status,Featured";

/// Complete upload with one fully populated product and one minimal product
pub fn create_full_product_csv() -> String {
    format!(
        "{FULL_HEADER}\n\
         \"Linen Shirt, Relaxed\",\"Soft \"\"washed\"\" linen\",49.99,69.99,Tops,shirt,\"S, M ,L\",\"White,Sand\",\"https://cdn.example.com/a.jpg;https://cdn.example.com/b,1.jpg\",TRUE,Draft,true\n\
         Canvas Tote,,15,,Bags,bag,,,,no,,\n"
    )
}

/// Build raw fields from string slices
pub fn fields(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Resolve a header from a comma-separated list of names
pub fn header_from(names: &str) -> HeaderMap {
    let cells: Vec<String> = names.split(',').map(str::to_string).collect();
    HeaderMap::resolve(&cells).unwrap()
}
