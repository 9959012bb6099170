use crate::config::ServerConfig;
use crate::error::StatsError;
use crate::stats::StatsSnapshot;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Path of the statistics endpoint on the dashboard server. Fixed by the
/// server contract, not a tunable.
pub const STATS_PATH: &str = "/stats";

/// Trait for fetching a statistics snapshot
#[allow(async_fn_in_trait)] // Internal trait for dependency injection in tests
pub trait StatsSource {
    async fn fetch_stats(&self) -> Result<StatsSnapshot, StatsError>;
}

/// HTTP client for the dashboard's stats endpoint
#[derive(Debug, Clone)]
pub struct StatsClient {
    stats_url: Url,
    http_client: Client,
}

impl StatsClient {
    /// Create a new stats client for the configured dashboard server
    pub fn new(config: &ServerConfig) -> Result<Self, StatsError> {
        let base_url = Url::parse(&config.base_url).map_err(|_| StatsError::InvalidBaseUrl {
            url: config.base_url.clone(),
        })?;

        let stats_url = base_url
            .join(STATS_PATH)
            .map_err(|_| StatsError::InvalidBaseUrl {
                url: config.base_url.clone(),
            })?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| StatsError::ClientSetup(e.to_string()))?;

        Ok(Self {
            stats_url,
            http_client,
        })
    }

    /// The full URL this client polls
    pub fn stats_url(&self) -> &Url {
        &self.stats_url
    }

    /// Parse a response body into a snapshot
    fn parse_stats_body(body: &str) -> Result<StatsSnapshot, StatsError> {
        serde_json::from_str(body).map_err(|e| StatsError::Parse(e.to_string()))
    }
}

impl StatsSource for StatsClient {
    async fn fetch_stats(&self) -> Result<StatsSnapshot, StatsError> {
        debug!("Fetching stats from {}", self.stats_url);

        let response = self
            .http_client
            .get(self.stats_url.clone())
            .send()
            .await
            .map_err(|e| StatsError::Fetch(e.to_string()))?;

        // The status code is intentionally not inspected: any body that
        // parses as a snapshot is rendered, matching the server contract as
        // consumed. Only a network failure or an unparseable body fails the
        // cycle.
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StatsError::Fetch(e.to_string()))?;

        debug!("Stats response: status={}, {} bytes", status, body.len());

        Self::parse_stats_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_config(base_url: &str) -> ServerConfig {
        ServerConfig {
            base_url: base_url.to_string(),
        }
    }

    #[test]
    fn test_client_creation_joins_stats_path() {
        let client = StatsClient::new(&server_config("http://127.0.0.1:5000")).unwrap();
        assert_eq!(client.stats_url().as_str(), "http://127.0.0.1:5000/stats");

        let client = StatsClient::new(&server_config("https://kyc.example.com")).unwrap();
        assert_eq!(client.stats_url().as_str(), "https://kyc.example.com/stats");
    }

    #[test]
    fn test_client_creation_invalid_base_url() {
        let result = StatsClient::new(&server_config("not a url"));
        assert!(matches!(
            result,
            Err(StatsError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_parse_stats_body_valid() {
        let body = r#"{"total":100,"approved":80,"rejected":20,"rejection_rate":20}"#;
        let snapshot = StatsClient::parse_stats_body(body).unwrap();
        assert_eq!(snapshot.total, Some(100));
        assert_eq!(snapshot.approved, Some(80));
        assert_eq!(snapshot.rejected, Some(20));
        assert_eq!(snapshot.rejection_rate, Some(20.0));
    }

    #[test]
    fn test_parse_stats_body_malformed() {
        let result = StatsClient::parse_stats_body("<html>502 Bad Gateway</html>");
        assert!(matches!(result, Err(StatsError::Parse(_))));
    }

    #[test]
    fn test_parse_stats_body_ignores_extra_fields() {
        // A non-2xx JSON body that happens to be snapshot-shaped still
        // parses; status is never checked upstream of this.
        let body = r#"{"total":1,"approved":0,"rejected":1,"rejection_rate":100,"error":"oops"}"#;
        let snapshot = StatsClient::parse_stats_body(body).unwrap();
        assert_eq!(snapshot.rejection_rate, Some(100.0));
    }
}
