//! Progress reporting for batch submission
//!
//! Progress is published at batch boundaries only: to an optional terminal
//! progress bar and to an optional watch channel for embedding callers.

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use super::report::IngestionReport;
use crate::constants::{PROGRESS_BAR_TEMPLATE, PROGRESS_CHARS};

/// Snapshot of submission progress after a batch boundary
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportProgress {
    pub batches_completed: usize,
    pub batches_total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl ImportProgress {
    pub fn from_report(report: &IngestionReport) -> Self {
        Self {
            batches_completed: report.batches_completed,
            batches_total: report.batches_total,
            succeeded: report.persisted,
            failed: report.failed,
        }
    }

    /// Completed batches over total batches
    pub fn fraction(&self) -> f64 {
        if self.batches_total == 0 {
            0.0
        } else {
            self.batches_completed as f64 / self.batches_total as f64
        }
    }
}

/// Publishes progress to a progress bar and/or a watch channel
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    sender: Option<watch::Sender<ImportProgress>>,
}

impl ProgressReporter {
    pub fn new(sender: Option<watch::Sender<ImportProgress>>) -> Self {
        Self {
            progress_bar: None,
            sender,
        }
    }

    /// Set up a terminal progress bar counting batches
    pub fn setup_progress_bar(&mut self, total_batches: usize) {
        let pb = ProgressBar::new(total_batches as u64);
        if let Ok(style) = ProgressStyle::default_bar().template(PROGRESS_BAR_TEMPLATE) {
            pb.set_style(style.progress_chars(PROGRESS_CHARS));
        }
        pb.set_message("Submitting products");

        debug!("Progress bar initialized for {} batches", total_batches);
        self.progress_bar = Some(pb);
    }

    /// Publish the state reached at a batch boundary
    pub fn update(&self, report: &IngestionReport) {
        let snapshot = ImportProgress::from_report(report);

        if let Some(ref pb) = self.progress_bar {
            pb.set_position(snapshot.batches_completed as u64);
            pb.set_message(format!(
                "{} created, {} failed",
                snapshot.succeeded, snapshot.failed
            ));
        }

        if let Some(ref sender) = self.sender {
            // send_replace stores the value even with no live receivers
            sender.send_replace(snapshot);
        }
    }

    /// Finish progress reporting with a completion message
    pub fn finish(&self, report: &IngestionReport) {
        self.update(report);
        if let Some(ref pb) = self.progress_bar {
            let message = if report.cancelled {
                format!("Cancelled: {} created, {} failed", report.persisted, report.failed)
            } else {
                format!("Completed: {} created, {} failed", report.persisted, report.failed)
            };
            pb.finish_with_message(message);
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(ref pb) = self.progress_bar {
            if !pb.is_finished() {
                pb.finish_and_clear();
            }
        }
    }
}
