//! Service configuration file support.
//!
//! This module provides utilities for reading service configuration from
//! TOML configuration files. Every field has a default, so a missing file
//! yields a fully working local setup.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::db::repository::RepositoryError;

/// Service configuration from file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub ingest: IngestSettings,
    #[serde(default)]
    pub report: ReportSettings,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Dataset ingestion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestSettings {
    /// Directory scanned for the three dataset CSV files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Directory report CSV artifacts are written to.
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,
    /// Stores processed per batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_report_dir() -> PathBuf {
    PathBuf::from("report_data")
}

fn default_batch_size() -> usize {
    crate::services::report::DEFAULT_BATCH_SIZE
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            report_dir: default_report_dir(),
            batch_size: default_batch_size(),
        }
    }
}

impl ServiceConfig {
    /// Load service configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(ServiceConfig)` if successful
    /// * `Err(RepositoryError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!("Failed to read config file: {}", e))
        })?;

        let config: ServiceConfig = toml::from_str(&content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })?;

        Ok(config)
    }

    /// Load service configuration from the default location.
    ///
    /// Searches for `storewatch.toml` in:
    /// 1. Current directory
    /// 2. `config/` directory
    /// 3. Parent directory
    ///
    /// Falls back to the built-in defaults when no file is found.
    pub fn from_default_location() -> Result<Self, RepositoryError> {
        let search_paths = [
            PathBuf::from("storewatch.toml"),
            PathBuf::from("config/storewatch.toml"),
            PathBuf::from("../storewatch.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.ingest.data_dir, PathBuf::from("data"));
        assert_eq!(config.report.report_dir, PathBuf::from("report_data"));
        assert_eq!(config.report.batch_size, 100);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9090

[ingest]
data_dir = "/srv/storewatch/data"

[report]
report_dir = "/srv/storewatch/reports"
batch_size = 250
"#;

        let config: ServiceConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.ingest.data_dir, PathBuf::from("/srv/storewatch/data"));
        assert_eq!(
            config.report.report_dir,
            PathBuf::from("/srv/storewatch/reports")
        );
        assert_eq!(config.report.batch_size, 250);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let toml = r#"
[server]
port = 3000
"#;

        let config: ServiceConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.report.batch_size, 100);
    }

    #[test]
    fn test_empty_config_is_defaults() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.port, ServiceConfig::default().server.port);
    }
}
