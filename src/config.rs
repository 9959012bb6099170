use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

fn default_base_url() -> String {
    // Default bind address of the dashboard server
    "http://127.0.0.1:5000".to_string()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Some("info".to_string()),
        }
    }
}

impl Config {
    /// Load configuration from TOML file with XDG directory support and environment variable overrides
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config_file = if let Some(path) = config_path {
            path
        } else {
            Self::find_config_file()?
        };

        let mut config = if config_file.exists() {
            tracing::debug!("Loading config from: {}", config_file.display());
            let content = std::fs::read_to_string(&config_file)?;
            toml::from_str::<Config>(&content)?
        } else {
            tracing::debug!("No config file found, using defaults and environment variables");
            Config {
                server: ServerConfig::default(),
                logging: None,
            }
        };

        // Apply environment variable overrides
        config.apply_env_overrides()?;

        // Apply defaults for optional sections
        if config.logging.is_none() {
            config.logging = Some(LoggingConfig::default());
        }

        // Validate required fields
        config.validate()?;

        Ok(config)
    }

    /// Find configuration file using XDG directory support
    fn find_config_file() -> Result<PathBuf, ConfigError> {
        // First check current directory
        let current_dir_config = PathBuf::from("statswatch.toml");
        if current_dir_config.exists() {
            return Ok(current_dir_config);
        }

        // Then check XDG_CONFIG_HOME/statswatch/statswatch.toml or ~/.config/statswatch/statswatch.toml
        let xdg_config = if let Ok(xdg_config_home) = env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config_home)
                .join("statswatch")
                .join("statswatch.toml")
        } else if let Ok(home_dir) = env::var("HOME") {
            PathBuf::from(home_dir)
                .join(".config")
                .join("statswatch")
                .join("statswatch.toml")
        } else {
            PathBuf::new() // Invalid path that won't exist
        };

        if xdg_config.exists() {
            return Ok(xdg_config);
        }

        // Default to current directory (file may not exist yet)
        Ok(current_dir_config)
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(base_url) = env::var("STATSWATCH_SERVER_BASE_URL") {
            self.server.base_url = base_url;
        }

        if let Ok(level) = env::var("STATSWATCH_LOG_LEVEL") {
            let logging = self.logging.get_or_insert_with(LoggingConfig::default);
            logging.level = Some(level);
        }

        Ok(())
    }

    /// Validate that all required configuration is present and well-formed
    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.base_url.is_empty() {
            return Err(ConfigError::MissingRequired(
                "server.base_url or STATSWATCH_SERVER_BASE_URL".to_string(),
            ));
        }

        let url = Url::parse(&self.server.base_url).map_err(|e| {
            ConfigError::InvalidValue(format!(
                "server.base_url is not a valid URL ({}): {e}",
                self.server.base_url
            ))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidValue(format!(
                "server.base_url must use http or https, got: {}",
                url.scheme()
            )));
        }

        Ok(())
    }

    /// Get the logging configuration with defaults
    pub fn logging(&self) -> &LoggingConfig {
        self.logging.as_ref().unwrap()
    }
}
