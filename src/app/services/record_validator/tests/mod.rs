//! Test utilities for record validation

use crate::app::models::CandidateRecord;

mod validator_tests;

/// A candidate that passes every check without warnings
pub fn create_valid_candidate(row: usize) -> CandidateRecord {
    let mut candidate = CandidateRecord::empty(row);
    candidate.name = "Merino Beanie".to_string();
    candidate.price = 24.0;
    candidate.category = "Accessories".to_string();
    candidate.product_type = "hat".to_string();
    candidate.images = vec!["https://cdn.example.com/beanie.jpg".to_string()];
    candidate
}
