//! Command-line argument definitions for the product importer
//!
//! This module defines the CLI interface using the clap derive API.

use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the product importer
///
/// Loads storefront products from CSV uploads into a product store, validating
/// every row and reporting per-row problems.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "product-import",
    version,
    about = "Bulk-load catalog products from CSV files",
    long_about = "Validates a CSV file of storefront products row by row and creates every valid \
                  product in the product store, in sequential batches. Invalid rows and rejected \
                  products are reported without stopping the rest of the import."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Validate a CSV file and create its valid products
    Import(ImportArgs),
    /// Validate a CSV file without creating any products
    Validate(ValidateArgs),
}

/// Arguments for the import command
#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    /// CSV file to import
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Product store file (JSON lines)
    ///
    /// Overrides the store path from the config file and PRODUCT_IMPORT_STORE.
    #[arg(
        short = 's',
        long = "store",
        value_name = "PATH",
        help = "Product store file (JSON lines)"
    )]
    pub store: Option<PathBuf>,

    /// Records per gateway batch
    #[arg(
        short = 'b',
        long = "batch-size",
        value_name = "COUNT",
        help = "Number of products submitted per batch"
    )]
    pub batch_size: Option<usize>,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// product-import/config.toml under the user config directory.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors and the final report
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the import report"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the validate command
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// CSV file to validate
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for validation results"
    )]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Map verbosity flags to a log level
fn log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn check_file_exists(file: &std::path::Path) -> Result<()> {
    if !file.is_file() {
        return Err(Error::configuration(format!(
            "Input file does not exist: {}",
            file.display()
        )));
    }
    Ok(())
}

fn check_config_exists(config_file: Option<&PathBuf>) -> Result<()> {
    if let Some(config_file) = config_file {
        if !config_file.exists() {
            return Err(Error::configuration(format!(
                "Config file does not exist: {}",
                config_file.display()
            )));
        }
    }
    Ok(())
}

impl ImportArgs {
    pub fn validate(&self) -> Result<()> {
        check_file_exists(&self.file)?;

        if self.batch_size == Some(0) {
            return Err(Error::configuration(
                "Batch size must be greater than 0".to_string(),
            ));
        }

        check_config_exists(self.config_file.as_ref())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl ValidateArgs {
    pub fn validate(&self) -> Result<()> {
        check_file_exists(&self.file)?;
        check_config_exists(self.config_file.as_ref())
    }

    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, false)
    }
}
