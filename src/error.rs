use crate::config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatswatchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Stats polling error: {0}")]
    Stats(#[from] StatsError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Application shutdown requested")]
    Shutdown,

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Failures of a single poll cycle. A cycle either fetches and parses a
/// snapshot or fails with one of these; the poll loop logs the failure and
/// carries on, so nothing here escapes a cycle.
#[derive(Error, Debug, Clone)]
pub enum StatsError {
    #[error("Stats fetch failed: {0}")]
    Fetch(String),

    #[error("Stats response parsing failed: {0}")]
    Parse(String),

    #[error("Invalid base URL: {url}")]
    InvalidBaseUrl { url: String },

    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),
}

/// Error recovery strategies for different failure scenarios
pub struct ErrorRecovery;

impl ErrorRecovery {
    /// Determine if an error is recoverable by simply waiting for the next
    /// poll tick.
    #[allow(dead_code)] // Public API method, may be used in future
    pub fn is_recoverable(error: &StatswatchError) -> bool {
        match error {
            // Network errors clear up on their own; the timer retries
            StatswatchError::Network(_) => true,

            StatswatchError::Stats(stats_error) => match stats_error {
                StatsError::Fetch(_) => true,
                StatsError::Parse(_) => true,
                StatsError::InvalidBaseUrl { .. } => false,
                StatsError::ClientSetup(_) => false,
            },

            // Configuration errors are not recoverable at runtime
            StatswatchError::Config(_) => false,

            StatswatchError::Io(_) => true,       // May be temporary
            StatswatchError::Json(_) => true,     // Bad body this cycle
            StatswatchError::Url(_) => false,     // Configuration issue
            StatswatchError::TaskJoin(_) => false, // Internal error
            StatswatchError::Shutdown => false,   // Intentional shutdown
            StatswatchError::InvalidData(_) => false,
        }
    }

    /// Determine if an error should cause application shutdown
    pub fn should_shutdown(error: &StatswatchError) -> bool {
        match error {
            StatswatchError::Config(_) => true, // Configuration errors are fatal
            StatswatchError::Shutdown => true,  // Intentional shutdown
            StatswatchError::Stats(StatsError::InvalidBaseUrl { .. }) => true,
            StatswatchError::Stats(StatsError::ClientSetup(_)) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statswatch_error_display() {
        let config_error = ConfigError::MissingRequired("server.base_url".to_string());
        let error = StatswatchError::Config(config_error);
        assert!(error.to_string().contains("Configuration error"));
        assert!(error.to_string().contains("server.base_url"));
    }

    #[test]
    fn test_stats_error_variants() {
        let fetch_error = StatsError::Fetch("connection refused".to_string());
        assert!(fetch_error.to_string().contains("Stats fetch failed"));
        assert!(fetch_error.to_string().contains("connection refused"));

        let parse_error = StatsError::Parse("expected value at line 1".to_string());
        assert!(parse_error
            .to_string()
            .contains("Stats response parsing failed"));

        let url_error = StatsError::InvalidBaseUrl {
            url: "not a url".to_string(),
        };
        assert!(url_error.to_string().contains("Invalid base URL: not a url"));
    }

    #[test]
    fn test_error_recovery_is_recoverable() {
        let fetch_error = StatswatchError::Stats(StatsError::Fetch("timeout".to_string()));
        assert!(ErrorRecovery::is_recoverable(&fetch_error));

        let parse_error = StatswatchError::Stats(StatsError::Parse("bad json".to_string()));
        assert!(ErrorRecovery::is_recoverable(&parse_error));

        let io_error = std::io::Error::new(std::io::ErrorKind::TimedOut, "timeout");
        assert!(ErrorRecovery::is_recoverable(&StatswatchError::Io(io_error)));

        let config_error =
            StatswatchError::Config(ConfigError::MissingRequired("test".to_string()));
        assert!(!ErrorRecovery::is_recoverable(&config_error));

        let url_error = StatswatchError::Stats(StatsError::InvalidBaseUrl {
            url: "nope".to_string(),
        });
        assert!(!ErrorRecovery::is_recoverable(&url_error));
    }

    #[test]
    fn test_error_recovery_should_shutdown() {
        let config_error =
            StatswatchError::Config(ConfigError::MissingRequired("test".to_string()));
        assert!(ErrorRecovery::should_shutdown(&config_error));

        assert!(ErrorRecovery::should_shutdown(&StatswatchError::Shutdown));

        let url_error = StatswatchError::Stats(StatsError::InvalidBaseUrl {
            url: "nope".to_string(),
        });
        assert!(ErrorRecovery::should_shutdown(&url_error));

        let fetch_error = StatswatchError::Stats(StatsError::Fetch("timeout".to_string()));
        assert!(!ErrorRecovery::should_shutdown(&fetch_error));

        let parse_error = StatswatchError::Stats(StatsError::Parse("bad json".to_string()));
        assert!(!ErrorRecovery::should_shutdown(&parse_error));
    }

    #[test]
    fn test_error_conversion_from_std_errors() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = StatswatchError::from(io_error);
        assert!(matches!(error, StatswatchError::Io(_)));

        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = StatswatchError::from(json_error);
        assert!(matches!(error, StatswatchError::Json(_)));

        let url_error = url::Url::parse("not a url").unwrap_err();
        let error = StatswatchError::from(url_error);
        assert!(matches!(error, StatswatchError::Url(_)));
    }

    #[test]
    fn test_nested_error_conversion() {
        let stats_error = StatsError::Fetch("dns failure".to_string());
        let error = StatswatchError::from(stats_error);

        match error {
            StatswatchError::Stats(inner) => {
                assert!(inner.to_string().contains("dns failure"));
            }
            _ => panic!("Expected Stats error variant"),
        }
    }
}
