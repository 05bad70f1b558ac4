// ⚙️ Configuration - resolved settings for a registry load
//
// Example config.toml:
//
//   date_format = "%Y.%m.%d"
//
//   [registry]
//   filename = "data/registry.csv"
//   delimiter = ";"

use anyhow::{bail, Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATE_FORMAT: &str = "%Y.%m.%d";
pub const DEFAULT_REGISTRY_FILENAME: &str = "registry.csv";

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// chrono strftime pattern the report expiry dates must match
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default)]
    pub registry: RegistrySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrySettings {
    /// Path of the registry CSV file
    #[serde(default = "default_registry_filename")]
    pub filename: PathBuf,

    /// Single ASCII character separating the columns
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_registry_filename() -> PathBuf {
    PathBuf::from(DEFAULT_REGISTRY_FILENAME)
}

fn default_delimiter() -> String {
    ",".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            date_format: default_date_format(),
            registry: RegistrySettings::default(),
        }
    }
}

impl Default for RegistrySettings {
    fn default() -> Self {
        RegistrySettings {
            filename: default_registry_filename(),
            delimiter: default_delimiter(),
        }
    }
}

impl RegistrySettings {
    /// Delimiter as the byte the CSV reader expects
    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => bail!(
                "Delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            ),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        Config::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {:?}", path.as_ref()))
    }

    /// Load from `path` when given, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(path) => Config::load(path),
            None => Ok(Config::default()),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.date_format.trim().is_empty() {
            bail!("Date format must not be empty");
        }
        self.registry.delimiter_byte()?;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
