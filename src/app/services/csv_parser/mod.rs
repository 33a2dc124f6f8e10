//! CSV parser for bulk product uploads
//!
//! This module turns the raw text of an uploaded product file into candidate
//! records. Each stage is a pure function and can be tested on its own.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`tabular`] - Quote-aware splitting of text into rows of fields
//! - [`header`] - Header row resolution and mandatory column checks
//! - [`record_mapper`] - Projection of a data row onto canonical product fields
//! - [`field_parsers`] - Coercion helpers for numbers, flags and lists
//!
//! ## Usage
//!
//! ```rust
//! use product_import::app::services::csv_parser::{HeaderMap, map_record, parse_rows};
//!
//! # fn example() -> product_import::Result<()> {
//! let rows = parse_rows("name,price,category,productType\nTee,19.99,Tops,shirt")?;
//! let header = HeaderMap::resolve(&rows[0])?;
//! let candidate = map_record(&header, &rows[1], 1).expect("row has all columns");
//!
//! assert_eq!(candidate.name, "Tee");
//! assert_eq!(candidate.price, 19.99);
//! # Ok(())
//! # }
//! ```

pub mod field_parsers;
pub mod header;
pub mod record_mapper;
pub mod tabular;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use header::HeaderMap;
pub use record_mapper::{RowDefect, map_record};
pub use tabular::{RawRow, parse_line, parse_rows};
