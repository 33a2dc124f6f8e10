//! Validate command implementation
//!
//! Runs parsing, header resolution and record validation only. No product
//! store is opened.

use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use super::shared::{
    CliOverrides, load_configuration, print_row_messages, print_validation_summary, setup_logging,
};
use crate::Result;
use crate::app::adapters::memory_store::InMemoryProductStore;
use crate::app::services::import_pipeline::{ImportPreview, ProductImporter};
use crate::cli::args::{OutputFormat, ValidateArgs};

/// Machine-readable validation result
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationOutput<'a> {
    total_records: usize,
    valid_records: usize,
    invalid_records: usize,
    errors: Vec<&'a str>,
    warnings: Vec<&'a str>,
    unrecognized_columns: Vec<&'a str>,
}

impl<'a> ValidationOutput<'a> {
    fn from_preview(preview: &'a ImportPreview) -> Self {
        Self {
            total_records: preview.total_records(),
            valid_records: preview.valid_count(),
            invalid_records: preview.invalid_count(),
            errors: preview.errors().collect(),
            warnings: preview.warnings().collect(),
            unrecognized_columns: preview.header.unrecognized_columns(),
        }
    }
}

/// Validate a file and print every row problem
pub async fn run_validate(args: ValidateArgs) -> Result<()> {
    setup_logging(args.get_log_level(), false)?;
    args.validate()?;

    let overrides = CliOverrides {
        show_progress: Some(false),
        ..Default::default()
    };
    let config = load_configuration(args.config_file.as_deref(), &overrides)?;

    let importer = ProductImporter::new(Arc::new(InMemoryProductStore::new()), config);
    info!("Validating {}", args.file.display());
    let preview = importer.preview_file(&args.file).await?;

    match args.output_format {
        OutputFormat::Human => {
            print_row_messages(&preview);
            print_validation_summary(&args.file, &preview);
        }
        OutputFormat::Json => {
            let output = ValidationOutput::from_preview(&preview);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
