//! In-memory product store
//!
//! Keeps created products in process memory. Used by previews, tests and any
//! embedding that brings its own persistence later.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;

use super::gateway::{GatewayError, ProductGateway, RecordOutcome};
use crate::app::models::{CreatedProduct, NewProduct};
use crate::constants::MAX_PRODUCT_NAME_LENGTH;

/// Product store held in memory
///
/// Enforces the same constraints as the file-backed store: product names are
/// unique (case-insensitively) and at most 200 characters long.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    products: Mutex<Vec<(CreatedProduct, NewProduct)>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of products created so far
    pub async fn len(&self) -> usize {
        self.products.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.lock().await.is_empty()
    }

    /// Snapshot of created products in creation order
    pub async fn products(&self) -> Vec<NewProduct> {
        self.products
            .lock()
            .await
            .iter()
            .map(|(_, product)| product.clone())
            .collect()
    }
}

#[async_trait]
impl ProductGateway for InMemoryProductStore {
    async fn create_product(&self, product: &NewProduct) -> RecordOutcome {
        check_store_constraints(product)?;

        let mut products = self.products.lock().await;
        if products
            .iter()
            .any(|(_, existing)| existing.name.eq_ignore_ascii_case(&product.name))
        {
            return Err(GatewayError::rejected(format!(
                "A product named '{}' already exists",
                product.name
            )));
        }

        let created = CreatedProduct {
            id: format_product_id(products.len() + 1),
            name: product.name.clone(),
            created_at: Utc::now(),
        };
        debug!("Created product {} ({})", created.id, created.name);
        products.push((created.clone(), product.clone()));

        Ok(created)
    }
}

/// Constraints every bundled store applies before writing
pub(crate) fn check_store_constraints(product: &NewProduct) -> Result<(), GatewayError> {
    if product.name.chars().count() > MAX_PRODUCT_NAME_LENGTH {
        return Err(GatewayError::rejected(format!(
            "Product name exceeds {} characters",
            MAX_PRODUCT_NAME_LENGTH
        )));
    }
    Ok(())
}

pub(crate) fn format_product_id(sequence: usize) -> String {
    format!("prod-{:06}", sequence)
}

/// Sequence number of an id produced by `format_product_id`
pub(crate) fn parse_product_id(id: &str) -> Option<usize> {
    id.strip_prefix("prod-")?.parse().ok()
}
