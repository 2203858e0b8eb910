//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub assets: AssetConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub sessions: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dataset locations
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_indicators_file")]
    pub indicators_file: String,

    #[serde(default = "default_regions_file")]
    pub regions_file: String,

    #[serde(default = "default_population_file")]
    pub population_file: String,

    #[serde(default = "default_geojson_file")]
    pub geojson_file: String,
}

fn default_data_dir() -> String {
    "./static/data".to_string()
}

fn default_indicators_file() -> String {
    "hdi_info.csv".to_string()
}

fn default_regions_file() -> String {
    "regioes.csv".to_string()
}

fn default_population_file() -> String {
    "world_population.csv".to_string()
}

fn default_geojson_file() -> String {
    "custom.geo.json".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            indicators_file: default_indicators_file(),
            regions_file: default_regions_file(),
            population_file: default_population_file(),
            geojson_file: default_geojson_file(),
        }
    }
}

/// Static asset URLs handed to the display layer
#[derive(Debug, Clone, Deserialize)]
pub struct AssetConfig {
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,

    #[serde(default = "default_flags_dir")]
    pub flags_dir: String,

    #[serde(default = "default_world_flag")]
    pub world_flag: String,

    #[serde(default = "default_placeholder_flag")]
    pub placeholder_flag: String,
}

fn default_url_prefix() -> String {
    "/static".to_string()
}

fn default_flags_dir() -> String {
    "bandeiras".to_string()
}

fn default_world_flag() -> String {
    "world.png".to_string()
}

fn default_placeholder_flag() -> String {
    "placeholder.png".to_string()
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            url_prefix: default_url_prefix(),
            flags_dir: default_flags_dir(),
            world_flag: default_world_flag(),
            placeholder_flag: default_placeholder_flag(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8050
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Per-browser session limits
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

fn default_max_sessions() -> usize {
    10_000
}

fn default_idle_timeout() -> u64 {
    30 * 60
}

fn default_sweep_interval() -> u64 {
    60
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_sessions: default_max_sessions(),
            idle_timeout_secs: default_idle_timeout(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment.
    ///
    /// Returns the config together with the file it came from, if any.
    pub fn load_default() -> (Self, Option<PathBuf>) {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("infomundo").join("config.toml")),
            Some(PathBuf::from("/etc/infomundo/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => return (config, Some(path.clone())),
                    Err(e) => {
                        // Logging is not initialized yet at this point.
                        eprintln!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        (Self::from_env(), None)
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(data_dir) = std::env::var("INFOMUNDO_DATA_DIR") {
            self.data.data_dir = data_dir;
        }

        if let Ok(prefix) = std::env::var("INFOMUNDO_ASSETS_URL_PREFIX") {
            self.assets.url_prefix = prefix;
        }

        if let Ok(host) = std::env::var("INFOMUNDO_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("INFOMUNDO_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        if let Ok(max) = std::env::var("INFOMUNDO_MAX_SESSIONS") {
            if let Ok(m) = max.parse() {
                self.sessions.max_sessions = m;
            }
        }

        if let Ok(level) = std::env::var("INFOMUNDO_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("INFOMUNDO_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Info Mundo Configuration
#
# Environment variables override these settings:
# - INFOMUNDO_DATA_DIR
# - INFOMUNDO_ASSETS_URL_PREFIX
# - INFOMUNDO_API_HOST
# - INFOMUNDO_API_PORT
# - INFOMUNDO_MAX_SESSIONS
# - INFOMUNDO_LOG_LEVEL
# - INFOMUNDO_LOG_FORMAT

[data]
# Directory holding the source tables
data_dir = "./static/data"

# Indicator table (HDI, life expectancy, income per year)
indicators_file = "hdi_info.csv"

# ISO3 -> UN region mapping
regions_file = "regioes.csv"

# Population snapshots, capital, area
population_file = "world_population.csv"

# Country polygons
geojson_file = "custom.geo.json"

[assets]
# URL prefix under which the display layer serves static files
url_prefix = "/static"

# Flag images: <url_prefix>/<flags_dir>/<code>.png
flags_dir = "bandeiras"
world_flag = "world.png"
placeholder_flag = "placeholder.png"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8050

# Allowed CORS origins (empty = allow any)
cors_origins = []

[sessions]
# Maximum number of live sessions
max_sessions = 10000

# Sessions idle for longer than this are dropped (seconds)
idle_timeout_secs = 1800

# How often idle sessions are swept (seconds)
sweep_interval_secs = 60

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/infomundo/infomundo.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.port, 8050);
        assert_eq!(config.data.indicators_file, "hdi_info.csv");
        assert_eq!(config.assets.flags_dir, "bandeiras");
        assert_eq!(config.sessions.max_sessions, 10_000);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse("[api]\nport = 9000\n").unwrap();
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.host, "0.0.0.0");
        assert_eq!(config.data.data_dir, "./static/data");
        assert_eq!(config.sessions.idle_timeout_secs, 1800);
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::parse("[api]\nport = \"not a port\"\n").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/infomundo.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_addr() {
        assert_eq!(ApiConfig::new("127.0.0.1", 8080).addr(), "127.0.0.1:8080");
    }
}
