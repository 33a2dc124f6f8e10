//! Test utilities for batch submission
//!
//! Provides scripted product gateways that record how they were called.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::app::adapters::gateway::{GatewayError, ProductGateway, RecordOutcome};
use crate::app::models::{CreatedProduct, NewProduct, Verdict};
use crate::app::services::record_validator::{ValidatedRow, validate_record};
use crate::app::services::record_validator::tests::create_valid_candidate;


/// Gateway that accepts everything and records the size of each batch
#[derive(Debug, Default)]
pub struct CountingGateway {
    pub batch_sizes: Mutex<Vec<usize>>,
    pub created: AtomicUsize,
}

impl CountingGateway {
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batch_sizes.lock().unwrap().clone()
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductGateway for CountingGateway {
    async fn create_product(&self, product: &NewProduct) -> RecordOutcome {
        let sequence = self.created.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(created(sequence, product))
    }

    async fn create_batch(
        &self,
        batch: &[NewProduct],
    ) -> std::result::Result<Vec<RecordOutcome>, GatewayError> {
        self.batch_sizes.lock().unwrap().push(batch.len());
        let mut outcomes = Vec::with_capacity(batch.len());
        for product in batch {
            outcomes.push(self.create_product(product).await);
        }
        Ok(outcomes)
    }
}

/// Gateway whose batch call fails outright for the given 1-based batch numbers
#[derive(Debug)]
pub struct FailingBatchGateway {
    pub failing_batches: Vec<usize>,
    pub calls: AtomicUsize,
}

impl FailingBatchGateway {
    pub fn new(failing_batches: Vec<usize>) -> Self {
        Self {
            failing_batches,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ProductGateway for FailingBatchGateway {
    async fn create_product(&self, product: &NewProduct) -> RecordOutcome {
        Ok(created(1, product))
    }

    async fn create_batch(
        &self,
        batch: &[NewProduct],
    ) -> std::result::Result<Vec<RecordOutcome>, GatewayError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.failing_batches.contains(&call) {
            return Err(GatewayError::unavailable("connection reset"));
        }
        Ok(batch.iter().map(|product| Ok(created(call, product))).collect())
    }
}

/// Gateway that rejects products whose name contains a marker
#[derive(Debug)]
pub struct RejectingGateway {
    pub marker: &'static str,
}

#[async_trait]
impl ProductGateway for RejectingGateway {
    async fn create_product(&self, product: &NewProduct) -> RecordOutcome {
        if product.name.contains(self.marker) {
            Err(GatewayError::rejected("Duplicate product name"))
        } else {
            Ok(created(1, product))
        }
    }
}

/// Gateway that returns one outcome fewer than it was given
#[derive(Debug, Default)]
pub struct ShortOutcomeGateway;

#[async_trait]
impl ProductGateway for ShortOutcomeGateway {
    async fn create_product(&self, product: &NewProduct) -> RecordOutcome {
        Ok(created(1, product))
    }

    async fn create_batch(
        &self,
        batch: &[NewProduct],
    ) -> std::result::Result<Vec<RecordOutcome>, GatewayError> {
        Ok(batch
            .iter()
            .skip(1)
            .map(|product| Ok(created(1, product)))
            .collect())
    }
}

fn created(sequence: usize, product: &NewProduct) -> CreatedProduct {
    CreatedProduct {
        id: format!("test-{}", sequence),
        name: product.name.clone(),
        created_at: Utc::now(),
    }
}

/// `count` valid rows numbered from 1, named "Product N"
pub fn create_valid_rows(count: usize) -> Vec<ValidatedRow> {
    (1..=count)
        .map(|row| {
            let mut candidate = create_valid_candidate(row);
            candidate.name = format!("Product {}", row);
            let verdict = validate_record(&candidate);
            ValidatedRow {
                candidate: Some(candidate),
                verdict,
            }
        })
        .collect()
}

/// An invalid row carrying a single error message
pub fn create_invalid_row(row: usize) -> ValidatedRow {
    ValidatedRow {
        candidate: None,
        verdict: Verdict::rejected(row, format!("Row {}: Insufficient columns", row)),
    }
}
