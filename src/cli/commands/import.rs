//! Import command implementation

use colored::*;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::shared::{
    CliOverrides, load_configuration, print_import_report, print_row_messages, setup_logging,
};
use crate::{Error, IngestionReport, Result};
use crate::app::adapters::filesystem::JsonlProductStore;
use crate::app::services::import_pipeline::ProductImporter;
use crate::cli::args::{ImportArgs, OutputFormat};

/// Validate the file, create its valid products and print the report
pub async fn run_import(args: ImportArgs, cancellation_token: CancellationToken) -> Result<()> {
    setup_logging(args.get_log_level(), args.quiet)?;
    args.validate()?;

    let overrides = CliOverrides {
        store: args.store.clone(),
        batch_size: args.batch_size,
        show_progress: Some(args.show_progress() && args.output_format == OutputFormat::Human),
    };
    let config = load_configuration(args.config_file.as_deref(), &overrides)?;

    let store = Arc::new(JsonlProductStore::open(&config.store_path).await?);
    let importer = ProductImporter::new(store, config).with_cancellation(cancellation_token);

    let start = Instant::now();
    info!("Importing {}", args.file.display());

    let preview = importer.preview_file(&args.file).await?;
    if args.output_format == OutputFormat::Human && !args.quiet {
        print_row_messages(&preview);
    }

    let report = match importer.submit(&preview).await {
        Ok(report) => report,
        Err(e) => {
            // Row diagnostics still reach the caller before the non-zero exit
            if let Some(report) = e.report() {
                emit_report(report, args.output_format)?;
            }
            return Err(e);
        }
    };
    info!("Import finished in {:.2?}", start.elapsed());

    emit_report(&report, args.output_format)?;

    if report.cancelled {
        return Err(Error::processing_interrupted(format!(
            "Import cancelled by user; {} products not attempted",
            report.not_attempted
        )));
    }

    Ok(())
}

fn emit_report(report: &IngestionReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            print_import_report(report);
            if report.is_clean() {
                println!("\n{}", "All products imported".bright_green().bold());
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
    }
    Ok(())
}
