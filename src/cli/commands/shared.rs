//! Shared components for CLI commands
//!
//! Logging setup, configuration loading and report rendering used by both
//! subcommands.

use colored::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::Result;
use crate::app::services::batch_submitter::IngestionReport;
use crate::app::services::import_pipeline::ImportPreview;
use crate::config::{Config, default_config_path};

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over the level derived from the flags.
pub fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("product_import={}", log_level)));

    if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Settings given on the command line, applied over file and environment
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub store: Option<PathBuf>,
    pub batch_size: Option<usize>,
    pub show_progress: Option<bool>,
}

/// Load configuration using the layered approach (defaults -> file -> env -> args)
pub fn load_configuration(config_file: Option<&Path>, overrides: &CliOverrides) -> Result<Config> {
    match config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => match default_config_path().filter(|path| path.is_file()) {
            Some(path) => info!("Using config file: {}", path.display()),
            None => info!("No config file found, using defaults and environment variables"),
        },
    }

    let mut config = Config::load_layered(config_file)?;
    apply_cli_overrides(&mut config, overrides);
    config.validate()?;

    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut Config, overrides: &CliOverrides) {
    if let Some(store) = &overrides.store {
        config.store_path = store.clone();
    }
    if let Some(batch_size) = overrides.batch_size {
        config.batch_size = batch_size;
    }
    if let Some(show_progress) = overrides.show_progress {
        config.show_progress = config.show_progress && show_progress;
    }
}

/// Print per-row validation messages
pub fn print_row_messages(preview: &ImportPreview) {
    for row in &preview.rows {
        for error in row.verdict.errors() {
            println!("  {} {}", "error:".bright_red().bold(), error);
        }
        for warning in row.verdict.warnings() {
            println!("  {} {}", "warning:".bright_yellow(), warning);
        }
    }
}

/// Print the validation tallies of a preview
pub fn print_validation_summary(file: &Path, preview: &ImportPreview) {
    println!("\n{}", "Validation Summary".bright_green().bold());
    println!("  {} {}", "File:".bright_cyan(), file.display());
    println!(
        "  {} {}",
        "Rows:".bright_cyan(),
        preview.total_records().to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Valid:".bright_cyan(),
        preview.valid_count().to_string().bright_green().bold()
    );
    if preview.invalid_count() > 0 {
        println!(
            "  {} {}",
            "Invalid:".bright_red(),
            preview.invalid_count().to_string().bright_red().bold()
        );
    }
    let warnings = preview.warnings().count();
    if warnings > 0 {
        println!(
            "  {} {}",
            "Warnings:".bright_yellow(),
            warnings.to_string().bright_yellow()
        );
    }
    let unrecognized = preview.header.unrecognized_columns();
    if !unrecognized.is_empty() {
        println!(
            "  {} {}",
            "Ignored columns:".bright_cyan(),
            unrecognized.join(", ")
        );
    }
}

/// Print an ingestion report in human-readable form
pub fn print_import_report(report: &IngestionReport) {
    println!("\n{}", "Import Summary".bright_green().bold());
    println!(
        "  {} {} ({} valid, {} invalid)",
        "Rows:".bright_cyan(),
        report.total_records.to_string().bright_white().bold(),
        report.valid_records,
        report.invalid_records
    );
    println!(
        "  {} {}",
        "Created:".bright_cyan(),
        report.persisted.to_string().bright_green().bold()
    );
    if report.failed > 0 {
        println!(
            "  {} {}",
            "Failed:".bright_red(),
            report.failed.to_string().bright_red().bold()
        );
    }
    if report.cancelled {
        println!(
            "  {} after {}/{} batches, {} products not attempted",
            "Cancelled".bright_yellow().bold(),
            report.batches_completed,
            report.batches_total,
            report.not_attempted
        );
    }
    println!("  {} {:.1}%", "Success rate:".bright_cyan(), report.success_rate());

    if !report.diagnostics.is_empty() {
        println!("\n{}", "Problems".bright_yellow().bold());
        for message in &report.diagnostics {
            println!("  - {}", message);
        }
        if report.diagnostics_dropped > 0 {
            println!(
                "  ... and {} more",
                report.diagnostics_dropped.to_string().bright_white()
            );
        }
    }
}
