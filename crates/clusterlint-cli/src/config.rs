//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (YAML/JSON/TOML)
//! - Environment variables
//! - Command-line arguments

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use clusterlint_core::{MachineTypeCatalog, MachineTypeInfo};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Machine type catalog settings
    pub catalog: CatalogConfig,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: String,

    /// Use colored output by default
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when no `-v` flag is given
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,

    /// Log file path
    pub file: Option<PathBuf>,
}

/// Extra machine types layered over the built-in AWS catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// YAML or JSON file with a list of machine types
    pub file: Option<PathBuf>,

    /// Machine types listed inline
    pub machine_types: Vec<MachineTypeInfo>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
            color: true,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config = match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            _ => serde_json::from_str(&content)?,
        };

        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in &Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        match file {
            Some(path) if !path.exists() => Err(Error::config(format!(
                "config file {} does not exist",
                path.display()
            ))),
            Some(path) => Self::from_file(path),
            None => Self::load(),
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".clusterlint.yaml"),
            PathBuf::from(".clusterlint.json"),
            PathBuf::from(".clusterlint.toml"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let clusterlint_dir = config_dir.join("clusterlint");
            paths.push(clusterlint_dir.join("config.yaml"));
            paths.push(clusterlint_dir.join("config.json"));
            paths.push(clusterlint_dir.join("config.toml"));
        }

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".clusterlint.yaml"));
        }

        paths
    }

    /// The configured output format, if it names a known one
    pub fn output_format(&self) -> Result<OutputFormat> {
        OutputFormat::from_name(&self.output.format).ok_or_else(|| {
            Error::config(format!("unknown output format '{}'", self.output.format))
        })
    }

    /// Build the machine type catalog
    ///
    /// Starts from the built-in AWS table, adds inline entries, then the
    /// catalog file. `override_file` replaces the configured file.
    pub fn machine_type_catalog(&self, override_file: Option<&Path>) -> Result<MachineTypeCatalog> {
        let mut catalog = MachineTypeCatalog::aws();
        catalog.extend(self.catalog.machine_types.iter().cloned());

        if let Some(path) = override_file.or(self.catalog.file.as_deref()) {
            if !path.exists() {
                return Err(Error::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            catalog.load_extra_file(path)?;
        }

        Ok(catalog)
    }
}
