use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::history::ExportFormat;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Export configuration
    #[serde(default)]
    pub export: ExportConfig,

    /// Snapshot data source configuration
    #[serde(default)]
    pub snapshot: SnapshotConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/default.toml".to_string());

        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: MAINTENIX_)
            .add_source(
                config::Environment::with_prefix("MAINTENIX")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory export files are written into
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Filename prefix, joined with a timestamp and extension
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Format used when none is given on the command line
    #[serde(default = "default_format")]
    pub default_format: ExportFormat,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            file_prefix: default_file_prefix(),
            default_format: default_format(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SnapshotConfig {
    /// JSON snapshot to load records from
    pub path: Option<PathBuf>,
}

// Default value functions
fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_file_prefix() -> String {
    "maintenix_history_export".to_string()
}

fn default_format() -> ExportFormat {
    ExportFormat::Csv
}
