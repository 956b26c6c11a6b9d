// Configuration module
use csvdex_core::IndexConfig;
use csvdex_store::RocksDbSettings;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    pub index: IndexConfig,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// HTTP worker threads, 0 = one per CPU core
    #[serde(default)]
    pub workers: usize,
}

/// Storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Directory holding `<store>.db` RocksDB directories
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default)]
    pub rocksdb: RocksDbSettings,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_file")]
    pub file_path: String,
    #[serde(default = "default_true")]
    pub log_to_console: bool,
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Per-target level overrides, e.g. `csvdex_core = "debug"`
    #[serde(default)]
    pub targets: HashMap<String, String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            rocksdb: RocksDbSettings::default(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_path: default_log_file(),
            log_to_console: true,
            format: default_log_format(),
            targets: HashMap::new(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "./logs/csvdex.log".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

impl StorageSettings {
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        let mut config = Self::from_toml_str(&content)?;

        // Override with environment variables if present
        config.apply_env_overrides()?;

        config.validate()?;

        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - CSVDEX_SERVER_HOST: Override server.host
    /// - CSVDEX_SERVER_PORT: Override server.port
    /// - CSVDEX_LOG_LEVEL: Override logging.level
    /// - CSVDEX_LOG_FILE: Override logging.file_path
    /// - CSVDEX_LOG_TO_CONSOLE: Override logging.log_to_console
    /// - CSVDEX_DATA_DIR: Override storage.data_dir
    ///
    /// Environment variables take precedence over config.toml values
    pub fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        use std::env;

        if let Ok(host) = env::var("CSVDEX_SERVER_HOST") {
            self.server.host = host;
        }

        if let Ok(port_str) = env::var("CSVDEX_SERVER_PORT") {
            self.server.port = port_str
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid CSVDEX_SERVER_PORT value: {}", port_str))?;
        }

        if let Ok(level) = env::var("CSVDEX_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(path) = env::var("CSVDEX_LOG_FILE") {
            self.logging.file_path = path;
        }

        if let Ok(val) = env::var("CSVDEX_LOG_TO_CONSOLE") {
            self.logging.log_to_console = val.to_lowercase() == "true"
                || val == "1"
                || val.to_lowercase() == "yes";
        }

        if let Ok(path) = env::var("CSVDEX_DATA_DIR") {
            self.storage.data_dir = path;
        }

        Ok(())
    }

    /// Validate configuration settings
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            ));
        }

        let valid_formats = ["compact", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_formats.join(", ")
            ));
        }

        if self.storage.data_dir.trim().is_empty() {
            return Err(anyhow::anyhow!("storage.data_dir cannot be empty"));
        }

        self.index
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid [index] section: {}", e))?;

        Ok(())
    }

    /// Where the configured store lives on disk.
    pub fn store_location(&self) -> PathBuf {
        self.index.location(&self.storage.data_dir())
    }

    /// Configuration with every default and the given index (useful for testing)
    pub fn with_index(index: IndexConfig) -> Self {
        ServerConfig {
            server: ServerSettings::default(),
            storage: StorageSettings::default(),
            index,
            logging: LoggingSettings::default(),
        }
    }
}
