//! Batch submission of validated products
//!
//! This module sends valid candidate records to the product gateway in
//! fixed-size batches and accumulates the ingestion report.
//!
//! # Architecture
//!
//! - [`submitter`] - Sequential batch loop over the product gateway
//! - [`report`] - Ingestion report accumulator with bounded diagnostics
//! - [`progress`] - Progress snapshots, progress bar and watch channel
//!
//! # Failure Model
//!
//! Submission is partial-success oriented. A record the store rejects counts
//! as one failure; a batch the store cannot accept at all counts every record
//! in it as failed. Neither stops the next batch. Batches never overlap, so the
//! progress fraction only ever grows.
//!
//! # Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use product_import::app::adapters::memory_store::InMemoryProductStore;
//! use product_import::app::services::batch_submitter::{BatchSubmitter, IngestionReport};
//! use product_import::app::services::csv_parser::{HeaderMap, parse_rows};
//! use product_import::app::services::record_validator::validate_rows;
//!
//! # async fn example() -> product_import::Result<()> {
//! let rows = parse_rows("name,price,category,productType\nTee,10,Tops,shirt")?;
//! let header = HeaderMap::resolve(&rows[0])?;
//! let validated = validate_rows(&header, &rows[1..]);
//!
//! let mut report = IngestionReport::new(10);
//! report.record_validation(&validated);
//!
//! let submitter = BatchSubmitter::new(Arc::new(InMemoryProductStore::new()), 10);
//! submitter.submit(&validated, &mut report).await?;
//!
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```

pub mod progress;
pub mod report;
pub mod submitter;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use progress::{ImportProgress, ProgressReporter};
pub use report::IngestionReport;
pub use submitter::BatchSubmitter;
