//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment variables, then command-line flags.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_BATCH_SIZE, DEFAULT_MAX_DIAGNOSTICS,
    DEFAULT_MAX_RECORDS, DEFAULT_STORE_FILE_NAME, env,
};
use crate::{Error, Result};

/// Global configuration for product imports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Records per gateway batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Ceiling on valid records in one import
    #[serde(default = "default_max_records")]
    pub max_records: usize,

    /// Diagnostic messages kept in the report
    #[serde(default = "default_max_diagnostics")]
    pub max_diagnostics: usize,

    /// JSON-lines product store file
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Show a progress bar during submission
    #[serde(default = "default_show_progress")]
    pub show_progress: bool,
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_max_records() -> usize {
    DEFAULT_MAX_RECORDS
}

fn default_max_diagnostics() -> usize {
    DEFAULT_MAX_DIAGNOSTICS
}

fn default_show_progress() -> bool {
    true
}

/// Store file under the user data directory, or the working directory
pub fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(DEFAULT_STORE_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE_NAME))
}

/// Config file under the user config directory, if one can be determined
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            max_records: default_max_records(),
            max_diagnostics: default_max_diagnostics(),
            store_path: default_store_path(),
            show_progress: default_show_progress(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read config {}", path.display()), e))?;
        toml::from_str(&content)
            .map_err(|e| Error::configuration(format!("{}: {}", path.display(), e)))
    }

    /// Parse configuration from TOML text; absent keys keep their defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::configuration(e.to_string()))
    }

    /// Build configuration from defaults, config file and process environment
    ///
    /// An explicit `path` must exist. Without one, the default config file is
    /// read only when present.
    pub fn load_layered(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                Self::load(path)?
            }
            None => match default_config_path().filter(|path| path.is_file()) {
                Some(path) => {
                    debug!("Loading configuration from {}", path.display());
                    Self::load(&path)?
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides_from(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply environment overrides using the given variable lookup
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(env::BATCH_SIZE) {
            self.batch_size = parse_env_usize(env::BATCH_SIZE, &value)?;
        }
        if let Some(value) = lookup(env::MAX_RECORDS) {
            self.max_records = parse_env_usize(env::MAX_RECORDS, &value)?;
        }
        if let Some(value) = lookup(env::STORE_PATH).filter(|value| !value.trim().is_empty()) {
            self.store_path = PathBuf::from(value);
        }
        Ok(())
    }

    /// Create configuration with custom batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Create configuration with custom record ceiling
    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = max_records;
        self
    }

    /// Create configuration with custom store path
    pub fn with_store_path(mut self, store_path: impl Into<PathBuf>) -> Self {
        self.store_path = store_path.into();
        self
    }

    /// Create configuration with progress display turned on or off
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::configuration("batch_size must be greater than 0"));
        }
        if self.max_records == 0 {
            return Err(Error::configuration("max_records must be greater than 0"));
        }
        if self.max_diagnostics == 0 {
            return Err(Error::configuration(
                "max_diagnostics must be greater than 0",
            ));
        }
        if self.batch_size > self.max_records {
            return Err(Error::configuration(format!(
                "batch_size ({}) cannot exceed max_records ({})",
                self.batch_size, self.max_records
            )));
        }
        Ok(())
    }
}

fn parse_env_usize(key: &str, value: &str) -> Result<usize> {
    value.trim().parse().map_err(|_| {
        Error::configuration(format!(
            "{} must be a non-negative integer, got '{}'",
            key, value
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.batch_size, 10);
        assert_eq!(config.max_records, 100);
        assert_eq!(config.max_diagnostics, 10);
        assert!(config.show_progress);
        assert!(config.store_path.ends_with(DEFAULT_STORE_FILE_NAME));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml("batch_size = 25\nshow_progress = false\n").unwrap();
        assert_eq!(config.batch_size, 25);
        assert!(!config.show_progress);
        assert_eq!(config.max_records, 100);
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "max_records = 50\nstore_path = \"/tmp/p.jsonl\"\n").unwrap();

        let config = Config::load_layered(Some(path.as_path())).unwrap();
        assert_eq!(config.max_records, 50);

        let missing = Config::load(&temp_dir.path().join("absent.toml"));
        assert!(matches!(missing, Err(Error::Io { .. })));
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        let result = Config::from_toml("batch_size = \"ten\"");
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (env::BATCH_SIZE, "5"),
            (env::STORE_PATH, "/data/products.jsonl"),
        ]);
        let mut config = Config::default();
        config
            .apply_env_overrides_from(|key| vars.get(key).map(|value| value.to_string()))
            .unwrap();

        assert_eq!(config.batch_size, 5);
        assert_eq!(config.max_records, 100);
        assert_eq!(config.store_path, PathBuf::from("/data/products.jsonl"));
    }

    #[test]
    fn test_env_override_rejects_garbage() {
        let mut config = Config::default();
        let result = config.apply_env_overrides_from(|key| {
            (key == env::MAX_RECORDS).then(|| "lots".to_string())
        });
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_validation_rules() {
        assert!(Config::default().with_batch_size(0).validate().is_err());
        assert!(Config::default().with_max_records(0).validate().is_err());
        assert!(
            Config::default()
                .with_batch_size(20)
                .with_max_records(10)
                .validate()
                .is_err()
        );
        assert!(
            Config::default()
                .with_batch_size(100)
                .with_max_records(100)
                .validate()
                .is_ok()
        );
    }
}
