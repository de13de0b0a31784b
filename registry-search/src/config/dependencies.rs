//! Dependency initialization and wiring for the registry search demo.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::Settings;
use crate::RegistryError;
use registry_search_repository::{OpenSearchProvider, SearchIndexClient, SearchIndexError};

/// Connection mode for the search engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionMode {
    /// Fail immediately if the engine cannot be reached.
    #[default]
    FailFast,
    /// Retry at a fixed interval until the engine answers.
    Retry,
}

impl ConnectionMode {
    /// Parse a connection mode.
    ///
    /// Valid values: "fail-fast" or "retry" (case-insensitive).
    /// Defaults to fail-fast if not set or invalid.
    pub fn parse(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };

        match value.trim().to_lowercase().as_str() {
            "fail-fast" | "failfast" | "fail_fast" => Self::FailFast,
            "retry" => Self::Retry,
            other => {
                warn!(value = %other, "Invalid SEARCH_CONNECTION_MODE, defaulting to 'fail-fast'");
                Self::FailFast
            }
        }
    }
}

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Client initialized for the configured index.
    pub client: SearchIndexClient,
    /// The settings the dependencies were built from.
    pub settings: Settings,
}

impl Dependencies {
    /// Build the search client and connect it.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(RegistryError)` - If the URL is invalid, or the engine is unreachable in fail-fast mode
    pub async fn new(settings: Settings) -> Result<Self, RegistryError> {
        info!(
            search_url = %settings.search_url,
            index = %settings.index_name,
            connection_mode = ?settings.connection_mode,
            retry_interval_secs = settings.retry_interval.as_secs(),
            "Initializing dependencies"
        );

        let provider = OpenSearchProvider::new(&settings.search_url).map_err(|e| {
            RegistryError::config(format!("Failed to create search provider: {}", e))
        })?;
        let client = SearchIndexClient::with_config(Arc::new(provider), settings.client.clone());

        connect_client(
            &client,
            &settings.index_name,
            settings.connection_mode,
            settings.retry_interval,
        )
        .await?;

        info!("Search engine connection established");

        Ok(Self { client, settings })
    }
}

/// Initialize `client` for `index_name`, retrying according to `mode`.
///
/// Only connection failures are retried. Any other error is returned at once.
pub async fn connect_client(
    client: &SearchIndexClient,
    index_name: &str,
    mode: ConnectionMode,
    retry_interval: Duration,
) -> Result<(), RegistryError> {
    loop {
        match client.init(index_name).await {
            Ok(_) => return Ok(()),
            Err(e @ SearchIndexError::ConnectionError(_)) => match mode {
                ConnectionMode::FailFast => return Err(e.into()),
                ConnectionMode::Retry => {
                    warn!(
                        index = %index_name,
                        error = %e,
                        retry_interval_secs = retry_interval.as_secs(),
                        "Failed to connect to the search engine, retrying..."
                    );
                    sleep(retry_interval).await;
                }
            },
            Err(e) => return Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_connection_mode() {
        assert_eq!(ConnectionMode::parse(None), ConnectionMode::FailFast);
        assert_eq!(ConnectionMode::parse(Some("retry")), ConnectionMode::Retry);
        assert_eq!(ConnectionMode::parse(Some("RETRY")), ConnectionMode::Retry);
        assert_eq!(ConnectionMode::parse(Some("fail_fast")), ConnectionMode::FailFast);
        assert_eq!(ConnectionMode::parse(Some("sometimes")), ConnectionMode::FailFast);
    }

    #[tokio::test]
    async fn test_invalid_url_is_a_config_error() {
        let settings = Settings {
            search_url: "not a url".to_string(),
            ..Settings::from_lookup(|_| None).unwrap()
        };

        let result = Dependencies::new(settings).await;
        assert!(matches!(result, Err(RegistryError::ConfigError(_))));
    }
}
