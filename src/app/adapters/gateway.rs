//! Product gateway contract
//!
//! The gateway is the only door into the product store. It creates products
//! one at a time; a batch call reports an independent outcome for every record
//! so that one rejection never discards its siblings' results.

use async_trait::async_trait;
use futures::future::join_all;
use thiserror::Error;

use crate::app::models::{CreatedProduct, NewProduct};

/// Failure to create one product, or to reach the store at all
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The store refused this record (constraint violation and the like)
    #[error("{reason}")]
    Rejected { reason: String },

    /// The store could not be reached or failed internally
    #[error("product store unavailable: {message}")]
    Unavailable { message: String },
}

impl GatewayError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Outcome of creating one product
pub type RecordOutcome = std::result::Result<CreatedProduct, GatewayError>;

/// Persistence gateway for catalog products
#[async_trait]
pub trait ProductGateway: Send + Sync {
    /// Create a single product
    async fn create_product(&self, product: &NewProduct) -> RecordOutcome;

    /// Create every product in the batch independently
    ///
    /// Returns one outcome per input record, in input order. Records may be
    /// created concurrently; every outcome is awaited even if siblings fail.
    /// An `Err` means the batch as a whole could not be attempted.
    async fn create_batch(
        &self,
        batch: &[NewProduct],
    ) -> std::result::Result<Vec<RecordOutcome>, GatewayError> {
        Ok(join_all(batch.iter().map(|product| self.create_product(product))).await)
    }
}
