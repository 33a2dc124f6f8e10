//! Import pipeline orchestration
//!
//! Composes parsing, header resolution, mapping, validation and batch
//! submission into a single service holding its gateway and configuration.

use std::path::Path;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::app::adapters::gateway::ProductGateway;
use crate::app::services::batch_submitter::{BatchSubmitter, ImportProgress, IngestionReport};
use crate::app::services::csv_parser::{HeaderMap, parse_rows};
use crate::app::services::record_validator::{ValidatedRow, validate_rows};
use crate::config::Config;
use crate::constants::CSV_EXTENSION;
use crate::{Error, Result};

/// Parse and validation outcome of an upload, before any persistence
#[derive(Debug, Clone)]
pub struct ImportPreview {
    pub header: HeaderMap,
    pub rows: Vec<ValidatedRow>,
}

impl ImportPreview {
    pub fn total_records(&self) -> usize {
        self.rows.len()
    }

    pub fn valid_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_valid()).count()
    }

    pub fn invalid_count(&self) -> usize {
        self.total_records() - self.valid_count()
    }

    /// Every error message, in row order
    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .flat_map(|row| row.verdict.errors())
            .map(String::as_str)
    }

    /// Every warning message, in row order
    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .flat_map(|row| row.verdict.warnings())
            .map(String::as_str)
    }
}

/// Product import pipeline
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use product_import::{Config, ProductImporter};
/// use product_import::app::adapters::memory_store::InMemoryProductStore;
///
/// # async fn example() -> product_import::Result<()> {
/// let importer = ProductImporter::new(Arc::new(InMemoryProductStore::new()), Config::default());
/// let report = importer
///     .import("name,price,category,productType\nTee,18,Tops,shirt")
///     .await?;
/// assert_eq!(report.persisted, 1);
/// # Ok(())
/// # }
/// ```
pub struct ProductImporter {
    gateway: Arc<dyn ProductGateway>,
    config: Config,
    cancellation: Option<CancellationToken>,
    progress_sender: Option<watch::Sender<ImportProgress>>,
}

impl ProductImporter {
    pub fn new(gateway: Arc<dyn ProductGateway>, config: Config) -> Self {
        Self {
            gateway,
            config,
            cancellation: None,
            progress_sender: None,
        }
    }

    /// Stop between batches once the token is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Publish batch progress to a watch channel
    pub fn with_progress_channel(mut self, sender: watch::Sender<ImportProgress>) -> Self {
        self.progress_sender = Some(sender);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse and validate upload text without touching the gateway
    ///
    /// Fails only for input-format problems: too few rows, a broken tokenizer
    /// state or missing mandatory headers. Row problems are carried in the
    /// returned verdicts.
    pub fn preview(&self, text: &str) -> Result<ImportPreview> {
        let rows = parse_rows(text)?;
        let header = HeaderMap::resolve(&rows[0])?;
        let validated = validate_rows(&header, &rows[1..]);

        let preview = ImportPreview {
            header,
            rows: validated,
        };
        info!(
            "Validated {} rows: {} valid, {} invalid",
            preview.total_records(),
            preview.valid_count(),
            preview.invalid_count()
        );
        Ok(preview)
    }

    /// Read an upload from disk and preview it
    pub async fn preview_file(&self, path: &Path) -> Result<ImportPreview> {
        let text = read_upload(path).await?;
        self.preview(&text)
    }

    /// Validate upload text and submit every valid record
    pub async fn import(&self, text: &str) -> Result<IngestionReport> {
        let preview = self.preview(text)?;
        self.submit(&preview).await
    }

    /// Read an upload from disk and import it
    pub async fn import_file(&self, path: &Path) -> Result<IngestionReport> {
        let text = read_upload(path).await?;
        self.import(&text).await
    }

    /// Submit the valid rows of an already validated upload
    pub async fn submit(&self, preview: &ImportPreview) -> Result<IngestionReport> {
        let mut report = IngestionReport::new(self.config.max_diagnostics);
        report.record_validation(&preview.rows);

        for warning in preview.warnings() {
            debug!("{}", warning);
        }

        let mut submitter = BatchSubmitter::new(self.gateway.clone(), self.config.batch_size)
            .with_max_records(self.config.max_records)
            .with_progress_bar(self.config.show_progress);
        if let Some(ref token) = self.cancellation {
            submitter = submitter.with_cancellation(token.clone());
        }
        if let Some(ref sender) = self.progress_sender {
            submitter = submitter.with_progress_channel(sender.clone());
        }

        submitter.submit(&preview.rows, &mut report).await?;

        if report.cancelled {
            warn!("Import cancelled: {}", report.summary());
        }
        Ok(report)
    }
}

/// Read an upload file, requiring a `.csv` extension and UTF-8 content
pub async fn read_upload(path: &Path) -> Result<String> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(CSV_EXTENSION));
    if !is_csv {
        return Err(Error::unsupported_file_type(path.display().to_string()));
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| Error::io(format!("Failed to read upload {}", path.display()), e))?;

    String::from_utf8(bytes).map_err(|e| {
        Error::malformed_input(format!(
            "{} is not valid UTF-8 text (invalid byte at offset {})",
            path.display(),
            e.utf8_error().valid_up_to()
        ))
    })
}
