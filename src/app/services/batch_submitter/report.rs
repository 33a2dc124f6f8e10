//! Ingestion report accumulator
//!
//! The report is created empty before an import, filled with validation tallies,
//! updated after every batch and returned once all batches are attempted or the
//! import is cancelled.

use serde::Serialize;

use crate::app::services::record_validator::ValidatedRow;

/// Final tallies and diagnostics for one file submission
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionReport {
    /// Data rows seen in the file
    pub total_records: usize,
    /// Rows that passed validation
    pub valid_records: usize,
    /// Rows rejected by validation
    pub invalid_records: usize,
    /// Products the gateway created
    pub persisted: usize,
    /// Valid products the gateway did not create
    pub failed: usize,
    /// Valid products skipped because the import was cancelled
    pub not_attempted: usize,
    pub batches_total: usize,
    pub batches_completed: usize,
    pub cancelled: bool,
    /// Earliest diagnostic messages, up to the configured cap
    pub diagnostics: Vec<String>,
    /// Messages discarded once the cap was reached
    pub diagnostics_dropped: usize,
    #[serde(skip)]
    max_diagnostics: usize,
}

impl IngestionReport {
    /// Create an empty report keeping at most `max_diagnostics` messages
    pub fn new(max_diagnostics: usize) -> Self {
        Self {
            total_records: 0,
            valid_records: 0,
            invalid_records: 0,
            persisted: 0,
            failed: 0,
            not_attempted: 0,
            batches_total: 0,
            batches_completed: 0,
            cancelled: false,
            diagnostics: Vec::new(),
            diagnostics_dropped: 0,
            max_diagnostics,
        }
    }

    /// Record validation tallies and the error messages of invalid rows
    pub fn record_validation(&mut self, rows: &[ValidatedRow]) {
        self.total_records = rows.len();
        self.valid_records = rows.iter().filter(|row| row.is_valid()).count();
        self.invalid_records = self.total_records - self.valid_records;

        for row in rows.iter().filter(|row| !row.is_valid()) {
            for error in row.verdict.errors() {
                self.add_diagnostic(error.clone());
            }
        }
    }

    /// Keep a diagnostic message if the cap has not been reached
    ///
    /// The cap keeps the oldest messages; later ones are only counted.
    pub fn add_diagnostic(&mut self, message: impl Into<String>) {
        if self.diagnostics.len() < self.max_diagnostics {
            self.diagnostics.push(message.into());
        } else {
            self.diagnostics_dropped += 1;
        }
    }

    pub fn begin_submission(&mut self, batches_total: usize) {
        self.batches_total = batches_total;
        self.batches_completed = 0;
    }

    /// Add the outcome tallies of one completed batch
    pub fn record_batch(&mut self, succeeded: usize, failed: usize) {
        self.persisted += succeeded;
        self.failed += failed;
        self.batches_completed += 1;
    }

    /// Stop the import, leaving `remaining` valid records unattempted
    pub fn mark_cancelled(&mut self, remaining: usize) {
        self.cancelled = true;
        self.not_attempted += remaining;
    }

    /// Fraction of batches completed, between 0 and 1
    pub fn progress(&self) -> f64 {
        if self.batches_total == 0 {
            0.0
        } else {
            self.batches_completed as f64 / self.batches_total as f64
        }
    }

    /// All batches attempted without cancellation
    pub fn is_complete(&self) -> bool {
        !self.cancelled && self.batches_total > 0 && self.batches_completed == self.batches_total
    }

    /// Whether every record in the file was validated and persisted
    pub fn is_clean(&self) -> bool {
        self.invalid_records == 0 && self.failed == 0 && self.not_attempted == 0
    }

    /// Persisted records as a percentage of valid records
    pub fn success_rate(&self) -> f64 {
        if self.valid_records == 0 {
            0.0
        } else {
            (self.persisted as f64 / self.valid_records as f64) * 100.0
        }
    }

    pub fn max_diagnostics(&self) -> usize {
        self.max_diagnostics
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Import Summary: {} rows ({} valid, {} invalid) | Persisted: {} | Failed: {}",
            self.total_records,
            self.valid_records,
            self.invalid_records,
            self.persisted,
            self.failed
        );
        if self.cancelled {
            summary.push_str(&format!(
                " | Cancelled after {}/{} batches ({} not attempted)",
                self.batches_completed, self.batches_total, self.not_attempted
            ));
        }
        summary
    }
}
