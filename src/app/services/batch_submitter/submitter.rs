//! Sequential batch submission to the product gateway

use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::progress::{ImportProgress, ProgressReporter};
use super::report::IngestionReport;
use crate::app::adapters::gateway::ProductGateway;
use crate::app::models::NewProduct;
use crate::app::services::record_validator::ValidatedRow;
use crate::constants::DEFAULT_MAX_RECORDS;
use crate::{Error, Result};

/// Submits valid records to the product gateway in sequential batches
///
/// Only one batch is in flight at a time. Each batch is awaited in full before
/// the next starts, and cancellation is only observed between batches.
pub struct BatchSubmitter {
    gateway: Arc<dyn ProductGateway>,
    batch_size: usize,
    max_records: usize,
    show_progress: bool,
    progress_sender: Option<watch::Sender<ImportProgress>>,
    cancellation: Option<CancellationToken>,
}

impl BatchSubmitter {
    /// Create a submitter; a batch size of zero is treated as one
    pub fn new(gateway: Arc<dyn ProductGateway>, batch_size: usize) -> Self {
        Self {
            gateway,
            batch_size: batch_size.max(1),
            max_records: DEFAULT_MAX_RECORDS,
            show_progress: false,
            progress_sender: None,
            cancellation: None,
        }
    }

    /// Set the ceiling on valid records per submission
    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = max_records;
        self
    }

    /// Show a terminal progress bar while submitting
    pub fn with_progress_bar(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Publish progress snapshots to a watch channel
    pub fn with_progress_channel(mut self, sender: watch::Sender<ImportProgress>) -> Self {
        self.progress_sender = Some(sender);
        self
    }

    /// Stop between batches once the token is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Submit the valid rows and tally outcomes into `report`
    ///
    /// Fails before any gateway call when no row is valid or when the valid
    /// rows exceed the record ceiling. The no-valid-records error carries a
    /// copy of `report` with the validation tallies and row diagnostics.
    /// Otherwise always returns `Ok`, with rejected records and failed
    /// batches counted in the report.
    pub async fn submit(&self, rows: &[ValidatedRow], report: &mut IngestionReport) -> Result<()> {
        let (row_numbers, products) = collect_submittable(rows, report);

        if products.is_empty() {
            return Err(Error::no_valid_records(report.clone()));
        }
        if products.len() > self.max_records {
            return Err(Error::too_many_records(products.len(), self.max_records));
        }

        let total_batches = products.len().div_ceil(self.batch_size);
        report.begin_submission(total_batches);

        let mut reporter = ProgressReporter::new(self.progress_sender.clone());
        if self.show_progress {
            reporter.setup_progress_bar(total_batches);
        }
        reporter.update(report);

        info!(
            "Submitting {} products in {} batches of up to {}",
            products.len(),
            total_batches,
            self.batch_size
        );

        for (batch_index, (batch, batch_rows)) in products
            .chunks(self.batch_size)
            .zip(row_numbers.chunks(self.batch_size))
            .enumerate()
        {
            if self.is_cancelled() {
                let remaining = products.len() - batch_index * self.batch_size;
                warn!(
                    "Import cancelled before batch {}/{}; {} products not attempted",
                    batch_index + 1,
                    total_batches,
                    remaining
                );
                report.mark_cancelled(remaining);
                break;
            }

            debug!(
                "Submitting batch {}/{} ({} products)",
                batch_index + 1,
                total_batches,
                batch.len()
            );

            let (succeeded, failed) = self
                .submit_batch(batch_index, total_batches, batch, batch_rows, report)
                .await;
            report.record_batch(succeeded, failed);
            reporter.update(report);
        }

        reporter.finish(report);
        info!("{}", report.summary());
        Ok(())
    }

    /// Send one batch and return its (succeeded, failed) counts
    async fn submit_batch(
        &self,
        batch_index: usize,
        total_batches: usize,
        batch: &[NewProduct],
        batch_rows: &[usize],
        report: &mut IngestionReport,
    ) -> (usize, usize) {
        let outcomes = match self.gateway.create_batch(batch).await {
            Ok(outcomes) => outcomes,
            Err(e) => {
                warn!("Batch {}/{} failed: {}", batch_index + 1, total_batches, e);
                report.add_diagnostic(format!(
                    "Batch {} of {} failed (rows {}-{}): {}",
                    batch_index + 1,
                    total_batches,
                    batch_rows.first().copied().unwrap_or_default(),
                    batch_rows.last().copied().unwrap_or_default(),
                    e
                ));
                return (0, batch.len());
            }
        };

        if outcomes.len() != batch.len() {
            warn!(
                "Product store returned {} outcomes for {} products",
                outcomes.len(),
                batch.len()
            );
        }

        let mut succeeded = 0;
        let mut failed = 0;
        for (position, (product, row)) in batch.iter().zip(batch_rows).enumerate() {
            match outcomes.get(position) {
                Some(Ok(created)) => {
                    debug!("Row {} created as {}", row, created.id);
                    succeeded += 1;
                }
                Some(Err(e)) => {
                    debug!("Row {} rejected by product store: {}", row, e);
                    report.add_diagnostic(format!(
                        "Row {}: Failed to create '{}': {}",
                        row, product.name, e
                    ));
                    failed += 1;
                }
                None => {
                    report.add_diagnostic(format!(
                        "Row {}: No outcome returned by product store",
                        row
                    ));
                    failed += 1;
                }
            }
        }

        (succeeded, failed)
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }
}

/// Convert valid rows into gateway records, keeping their row numbers
fn collect_submittable(
    rows: &[ValidatedRow],
    report: &mut IngestionReport,
) -> (Vec<usize>, Vec<NewProduct>) {
    let mut row_numbers = Vec::new();
    let mut products = Vec::new();

    for row in rows {
        let Some(candidate) = row.valid_candidate() else {
            continue;
        };
        match NewProduct::try_from(candidate) {
            Ok(product) => {
                row_numbers.push(candidate.row);
                products.push(product);
            }
            Err(e) => {
                warn!("Row {} could not be normalized: {}", candidate.row, e);
                report.add_diagnostic(format!("Row {}: {}", candidate.row, e));
                report.failed += 1;
            }
        }
    }

    (row_numbers, products)
}
