//! Record validation for candidate products
//!
//! Each candidate record is checked in isolation and receives a [`Verdict`]
//! holding blocking errors and informational warnings. Validation is pure:
//! checking the same candidate twice yields identical messages.
//!
//! [`Verdict`]: crate::app::models::Verdict

pub mod validator;

#[cfg(test)]
pub mod tests;

pub use validator::{ValidatedRow, validate_record, validate_rows};
