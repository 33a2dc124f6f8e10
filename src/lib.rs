//! Product Import Library
//!
//! A Rust library for bulk-loading storefront products from CSV uploads into a
//! product catalog, with per-row validation and partial-success persistence.
//!
//! This library provides tools for:
//! - Parsing quote-aware CSV text into rows of fields
//! - Resolving header rows into canonical product fields
//! - Mapping rows into typed candidate records with default values
//! - Validating every record independently with errors and warnings
//! - Submitting valid records in sequential batches to a product gateway
//! - Aggregating an ingestion report with bounded diagnostics

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod batch_submitter;
        pub mod csv_parser;
        pub mod import_pipeline;
        pub mod record_validator;
    }
    pub mod adapters {
        pub mod filesystem;
        pub mod gateway;
        pub mod memory_store;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::adapters::gateway::{GatewayError, ProductGateway, RecordOutcome};
pub use app::models::{CandidateRecord, CreatedProduct, NewProduct, ProductStatus, Verdict};
pub use app::services::batch_submitter::IngestionReport;
pub use app::services::import_pipeline::ProductImporter;
pub use config::Config;

/// Result type alias for the product importer
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for product import operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Uploaded file is not a CSV file
    #[error("Unsupported file type: {path} (expected a .csv file)")]
    UnsupportedFileType { path: String },

    /// Input text cannot be used for an import
    #[error("Malformed input: {message}")]
    MalformedInput { message: String },

    /// CSV tokenizer error
    #[error("CSV parsing error: {message}")]
    CsvParsing {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// One or more mandatory header columns are absent
    #[error("Missing required headers: {}", missing.join(", "))]
    MissingHeaders { missing: Vec<String> },

    /// Nothing survived validation; the report carries every row diagnostic
    #[error("No valid products to import ({invalid} invalid rows)")]
    NoValidRecords {
        invalid: usize,
        report: Box<IngestionReport>,
    },

    /// Submission exceeds the gateway ceiling
    #[error("Too many products in one import: {count} exceeds the limit of {limit}")]
    TooManyRecords { count: usize, limit: usize },

    /// Product store could not be opened or written
    #[error("Product store error: {message}")]
    Store { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// JSON encoding/decoding error
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an unsupported file type error
    pub fn unsupported_file_type(path: impl Into<String>) -> Self {
        Self::UnsupportedFileType { path: path.into() }
    }

    /// Create a malformed input error
    pub fn malformed_input(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(message: impl Into<String>, source: Option<csv::Error>) -> Self {
        Self::CsvParsing {
            message: message.into(),
            source,
        }
    }

    /// Create a missing headers error
    pub fn missing_headers(missing: Vec<String>) -> Self {
        Self::MissingHeaders { missing }
    }

    /// Create a no valid records error holding the validation report
    pub fn no_valid_records(report: IngestionReport) -> Self {
        Self::NoValidRecords {
            invalid: report.invalid_records,
            report: Box::new(report),
        }
    }

    /// Create a too many records error
    pub fn too_many_records(count: usize, limit: usize) -> Self {
        Self::TooManyRecords { count, limit }
    }

    /// Create a product store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// The ingestion report an import produced before failing, if any
    pub fn report(&self) -> Option<&IngestionReport> {
        match self {
            Self::NoValidRecords { report, .. } => Some(&**report),
            _ => None,
        }
    }

    /// Whether this error rejects the whole input file before any row is processed
    pub fn is_input_format_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFileType { .. }
                | Self::MalformedInput { .. }
                | Self::CsvParsing { .. }
                | Self::MissingHeaders { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}
