//! Application constants for the product importer
//!
//! This module contains header names, delimiters, default values and
//! validation vocabularies used throughout the import pipeline.

// =============================================================================
// Input Format
// =============================================================================

/// Accepted upload file extension (compared case-insensitively)
pub const CSV_EXTENSION: &str = "csv";

/// Primary field separator
pub const FIELD_DELIMITER: u8 = b',';

/// Quote character for escaped fields
pub const QUOTE_CHAR: u8 = b'"';

/// Separator for multi-value `sizes` and `colors` cells
pub const LIST_SEPARATOR: char = ',';

/// Separator for the `images` cell (URLs may contain commas)
pub const IMAGE_SEPARATOR: char = ';';

/// Minimum number of non-blank rows: one header plus one data row
pub const MIN_ROWS: usize = 2;

// =============================================================================
// Header Names
// =============================================================================

/// Normalized (trimmed, lower-case) header names
pub mod headers {
    pub const NAME: &str = "name";
    pub const DESCRIPTION: &str = "description";
    pub const PRICE: &str = "price";
    pub const ORIGINAL_PRICE: &str = "originalprice";
    pub const CATEGORY: &str = "category";
    pub const PRODUCT_TYPE: &str = "producttype";
    pub const SIZES: &str = "sizes";
    pub const COLORS: &str = "colors";
    pub const IMAGES: &str = "images";
    pub const IN_STOCK: &str = "instock";
    pub const STATUS: &str = "status";
    pub const FEATURED: &str = "featured";

    /// Columns that must be present for an import to start
    pub const REQUIRED: &[&str] = &[NAME, PRICE, CATEGORY, PRODUCT_TYPE];

    /// Optional columns picked up by the record mapper
    pub const OPTIONAL: &[&str] = &[
        DESCRIPTION,
        ORIGINAL_PRICE,
        SIZES,
        COLORS,
        IMAGES,
        IN_STOCK,
        STATUS,
        FEATURED,
    ];

    /// Spelling used in upload templates and user-facing messages
    pub fn display_name(normalized: &str) -> &str {
        match normalized {
            ORIGINAL_PRICE => "originalPrice",
            PRODUCT_TYPE => "productType",
            IN_STOCK => "inStock",
            other => other,
        }
    }
}

// =============================================================================
// Record Defaults and Vocabularies
// =============================================================================

/// Status applied when the column is absent or empty
pub const DEFAULT_STATUS: &str = "active";

/// Accepted product statuses (compared case-insensitively)
pub const VALID_STATUSES: &[&str] = &["active", "inactive", "draft"];

/// Literal that parses as boolean true (compared case-insensitively)
pub const TRUE_LITERAL: &str = "true";

/// URL prefixes that are not flagged as likely broken image references
pub const IMAGE_URL_PREFIXES: &[&str] = &["http://", "https://"];

// =============================================================================
// Submission Defaults
// =============================================================================

/// Records per gateway call
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Gateway ceiling on records per overall submission
pub const DEFAULT_MAX_RECORDS: usize = 100;

/// Diagnostic messages kept in the ingestion report
pub const DEFAULT_MAX_DIAGNOSTICS: usize = 10;

/// Longest product name accepted by the bundled product stores
pub const MAX_PRODUCT_NAME_LENGTH: usize = 200;

// =============================================================================
// Paths and Environment
// =============================================================================

/// Application directory name under the platform config/data directories
pub const APP_DIR_NAME: &str = "product-import";

/// Config file name inside the application config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default product store file name inside the application data directory
pub const DEFAULT_STORE_FILE_NAME: &str = "products.jsonl";

/// Environment variable overrides
pub mod env {
    pub const BATCH_SIZE: &str = "PRODUCT_IMPORT_BATCH_SIZE";
    pub const MAX_RECORDS: &str = "PRODUCT_IMPORT_MAX_RECORDS";
    pub const STORE_PATH: &str = "PRODUCT_IMPORT_STORE";
}

// =============================================================================
// Progress Display
// =============================================================================

pub const PROGRESS_BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} batches ({percent}%) | {msg}";
pub const PROGRESS_CHARS: &str = "#>-";
