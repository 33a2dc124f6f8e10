//! File-backed product store
//!
//! Appends one JSON document per created product to a JSON-lines file. Names
//! already present in the file are loaded on open so the uniqueness constraint
//! holds across runs. New ids continue after the highest id or line count
//! already in the file, so skipped corrupt lines never cause id reuse.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::gateway::{GatewayError, ProductGateway, RecordOutcome};
use super::memory_store::{check_store_constraints, format_product_id, parse_product_id};
use crate::app::models::{CreatedProduct, NewProduct};
use crate::{Error, Result};

/// One line of the store file
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProduct {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub product: NewProduct,
}

#[derive(Debug)]
struct StoreState {
    file: File,
    names: HashSet<String>,
    next_sequence: usize,
    /// The file does not end in a newline (truncated line or failed write)
    needs_separator: bool,
}

/// What `open` learns from an existing store file
#[derive(Debug, Default)]
struct StoreContents {
    products: Vec<StoredProduct>,
    non_empty_lines: usize,
    needs_separator: bool,
}

impl StoreContents {
    fn next_sequence(&self) -> usize {
        let highest_id = self
            .products
            .iter()
            .filter_map(|stored| parse_product_id(&stored.id))
            .max()
            .unwrap_or(0);
        highest_id.max(self.non_empty_lines) + 1
    }
}

/// Product store persisted as JSON lines
#[derive(Debug)]
pub struct JsonlProductStore {
    path: PathBuf,
    state: Mutex<StoreState>,
}

impl JsonlProductStore {
    /// Open (or create) the store file, creating parent directories as needed
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                Error::io(
                    format!("Failed to create store directory {}", parent.display()),
                    e,
                )
            })?;
        }

        let existing = read_store(&path).await?;
        let names = existing
            .products
            .iter()
            .map(|stored| normalize_name(&stored.product.name))
            .collect();
        let next_sequence = existing.next_sequence();
        if existing.needs_separator {
            warn!(
                "{} does not end with a newline; next write starts a new line",
                path.display()
            );
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| Error::store(format!("Failed to open {}: {}", path.display(), e)))?;

        info!(
            "Opened product store {} ({} existing products)",
            path.display(),
            existing.products.len()
        );

        Ok(Self {
            path,
            state: Mutex::new(StoreState {
                file,
                names,
                next_sequence,
                needs_separator: existing.needs_separator,
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every product currently in the store file
    pub async fn load_all(&self) -> Result<Vec<StoredProduct>> {
        Ok(read_store(&self.path).await?.products)
    }
}

#[async_trait]
impl ProductGateway for JsonlProductStore {
    async fn create_product(&self, product: &NewProduct) -> RecordOutcome {
        check_store_constraints(product)?;

        let mut state = self.state.lock().await;
        let key = normalize_name(&product.name);
        if state.names.contains(&key) {
            return Err(GatewayError::rejected(format!(
                "A product named '{}' already exists",
                product.name
            )));
        }

        let stored = StoredProduct {
            id: format_product_id(state.next_sequence),
            created_at: Utc::now(),
            product: product.clone(),
        };

        let encoded = serde_json::to_string(&stored)
            .map_err(|e| GatewayError::rejected(format!("Failed to encode product: {}", e)))?;
        let mut line = String::with_capacity(encoded.len() + 2);
        if state.needs_separator {
            line.push('\n');
        }
        line.push_str(&encoded);
        line.push('\n');

        // A partial write may leave an unterminated fragment behind
        let written = match state.file.write_all(line.as_bytes()).await {
            Ok(()) => state.file.flush().await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            state.needs_separator = true;
            return Err(GatewayError::unavailable(e.to_string()));
        }

        state.needs_separator = false;
        state.names.insert(key);
        state.next_sequence += 1;
        debug!("Stored product {} ({})", stored.id, product.name);

        Ok(CreatedProduct {
            id: stored.id,
            name: product.name.clone(),
            created_at: stored.created_at,
        })
    }
}

async fn read_store(path: &Path) -> Result<StoreContents> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(StoreContents::default()),
        Err(e) => {
            return Err(Error::io(
                format!("Failed to read store {}", path.display()),
                e,
            ));
        }
    };

    let mut contents = StoreContents {
        needs_separator: !content.is_empty() && !content.ends_with('\n'),
        ..StoreContents::default()
    };
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        contents.non_empty_lines += 1;
        match serde_json::from_str::<StoredProduct>(line) {
            Ok(product) => contents.products.push(product),
            Err(e) => warn!(
                "Skipping unreadable line {} in {}: {}",
                index + 1,
                path.display(),
                e
            ),
        }
    }

    Ok(contents)
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
