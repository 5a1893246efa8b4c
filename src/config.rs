//! Configuration module for depot.

use serde::Deserialize;
use std::path::Path;

use crate::{DepotError, Result};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Storage root directory. All stored files are direct children.
    #[serde(default = "default_root")]
    pub root: String,
    /// Mode bits (octal string) for auto-created storage directories.
    ///
    /// The default reproduces the original deployment's world-writable
    /// directories. Tighten this where the service does not share the
    /// volume with other writers.
    #[serde(default = "default_dir_mode")]
    pub dir_mode: String,
    /// Maximum accepted upload size in megabytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_mb: u64,
}

fn default_root() -> String {
    "data/uploads".to_string()
}

fn default_dir_mode() -> String {
    "777".to_string()
}

fn default_max_upload_size() -> u64 {
    1024
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            dir_mode: default_dir_mode(),
            max_upload_size_mb: default_max_upload_size(),
        }
    }
}

impl StorageConfig {
    /// Parse `dir_mode` as octal mode bits.
    pub fn dir_mode_bits(&self) -> Result<u32> {
        u32::from_str_radix(&self.dir_mode, 8).map_err(|_| {
            DepotError::Config(format!(
                "invalid dir_mode {:?}, expected octal digits",
                self.dir_mode
            ))
        })
    }

    /// Maximum upload size in bytes.
    pub fn max_upload_size_bytes(&self) -> usize {
        (self.max_upload_size_mb as usize) * 1024 * 1024
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/depot.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DepotError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| DepotError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `DEPOT_STORAGE_ROOT`: Override the storage root directory
    pub fn apply_env_overrides(&mut self) {
        if let Ok(root) = std::env::var("DEPOT_STORAGE_ROOT") {
            if !root.is_empty() {
                self.storage.root = root;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if `dir_mode` is not a string of octal digits.
    pub fn validate(&self) -> Result<()> {
        self.storage.dir_mode_bits()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.root, "data/uploads");
        assert_eq!(config.storage.dir_mode, "777");
        assert_eq!(config.storage.max_upload_size_mb, 1024);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/depot.log");
    }

    #[test]
    fn test_parse_empty() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.root, "data/uploads");
    }

    #[test]
    fn test_parse_partial() {
        let config = Config::parse(
            r#"
            [server]
            port = 9000

            [storage]
            root = "/srv/depot"
            dir_mode = "755"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.storage.root, "/srv/depot");
        assert_eq!(config.storage.dir_mode, "755");
        // Untouched sections keep their defaults
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = Config::parse("not [valid toml");
        assert!(matches!(result, Err(DepotError::Config(_))));
    }

    #[test]
    fn test_dir_mode_bits() {
        let mut storage = StorageConfig::default();
        assert_eq!(storage.dir_mode_bits().unwrap(), 0o777);

        storage.dir_mode = "755".to_string();
        assert_eq!(storage.dir_mode_bits().unwrap(), 0o755);

        storage.dir_mode = "rwx".to_string();
        assert!(matches!(
            storage.dir_mode_bits(),
            Err(DepotError::Config(_))
        ));
    }

    #[test]
    fn test_max_upload_size_bytes() {
        let mut storage = StorageConfig::default();
        storage.max_upload_size_mb = 10;
        assert_eq!(storage.max_upload_size_bytes(), 10 * 1024 * 1024);
    }

    #[test]
    fn test_validate_rejects_bad_dir_mode() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.storage.dir_mode = "999".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_override_storage_root() {
        std::env::set_var("DEPOT_STORAGE_ROOT", "/tmp/depot-env-test");

        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.storage.root, "/tmp/depot-env-test");

        std::env::remove_var("DEPOT_STORAGE_ROOT");
    }
}
