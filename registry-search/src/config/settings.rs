//! Application settings read from environment variables.

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::config::ConnectionMode;
use crate::RegistryError;
use registry_search_repository::config::{
    DEFAULT_NUMBER_OF_REPLICAS, DEFAULT_NUMBER_OF_SHARDS, DEFAULT_SCROLL_KEEP_ALIVE,
    DEFAULT_SCROLL_PAGE_SIZE,
};
use registry_search_repository::SearchIndexClientConfig;

/// Default search engine URL.
const DEFAULT_SEARCH_URL: &str = "http://127.0.0.1:9200";

/// Default index name.
const DEFAULT_INDEX_NAME: &str = "cars";

/// Default connection retry interval in seconds.
const DEFAULT_RETRY_INTERVAL_SECS: u64 = 15;

/// Default plate number of the demo document.
const DEFAULT_DEMO_PLATE_NUMBER: &str = "ABC-123";

/// Settings for the registry search application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Search engine URL.
    pub search_url: String,
    /// Index the client is initialized for.
    pub index_name: String,
    /// Index creation and scroll settings.
    pub client: SearchIndexClientConfig,
    /// What to do when the engine cannot be reached at startup.
    pub connection_mode: ConnectionMode,
    /// Wait between connection attempts in retry mode.
    pub retry_interval: Duration,
    /// Delete and recreate the index before the demo runs.
    pub recreate_index: bool,
    /// Plate number of the demo document.
    pub demo_plate_number: String,
}

impl Settings {
    /// Read settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SEARCH_URL`: Search engine URL (default: http://127.0.0.1:9200)
    /// - `INDEX_NAME`: Index name (default: "cars")
    /// - `INDEX_SHARDS`: Primary shards at index creation (default: 2)
    /// - `INDEX_REPLICAS`: Replicas at index creation (default: 1)
    /// - `SCROLL_PAGE_SIZE`: Documents per scroll page (default: 100)
    /// - `SCROLL_KEEP_ALIVE`: Scroll cursor time-to-live (default: 1m)
    /// - `SEARCH_CONNECTION_MODE`: "fail-fast" or "retry" (default: fail-fast)
    /// - `SEARCH_RETRY_INTERVAL_SECS`: Retry interval in seconds (default: 15)
    /// - `RECREATE_INDEX`: Delete and recreate the index first (default: false)
    /// - `DEMO_PLATE_NUMBER`: Plate number of the demo document (default: ABC-123)
    ///
    /// Invalid numbers fall back to their default with a warning.
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - The settings
    /// * `Err(RegistryError::ConfigError)` - If `SCROLL_PAGE_SIZE` is 0 or a name is blank
    pub fn from_env() -> Result<Self, RegistryError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RegistryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let search_url = lookup("SEARCH_URL").unwrap_or_else(|| DEFAULT_SEARCH_URL.to_string());
        let index_name = lookup("INDEX_NAME").unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string());
        if index_name.trim().is_empty() {
            return Err(RegistryError::config("INDEX_NAME must not be empty"));
        }

        let number_of_shards = parse_or_default(
            "INDEX_SHARDS",
            lookup("INDEX_SHARDS"),
            DEFAULT_NUMBER_OF_SHARDS,
        );
        let number_of_replicas = parse_or_default(
            "INDEX_REPLICAS",
            lookup("INDEX_REPLICAS"),
            DEFAULT_NUMBER_OF_REPLICAS,
        );

        let scroll_page_size = parse_or_default(
            "SCROLL_PAGE_SIZE",
            lookup("SCROLL_PAGE_SIZE"),
            DEFAULT_SCROLL_PAGE_SIZE,
        );
        if scroll_page_size == 0 {
            return Err(RegistryError::config("SCROLL_PAGE_SIZE must be at least 1"));
        }
        let scroll_keep_alive = lookup("SCROLL_KEEP_ALIVE")
            .unwrap_or_else(|| DEFAULT_SCROLL_KEEP_ALIVE.to_string());

        let connection_mode = ConnectionMode::parse(lookup("SEARCH_CONNECTION_MODE").as_deref());
        let retry_interval = Duration::from_secs(parse_or_default(
            "SEARCH_RETRY_INTERVAL_SECS",
            lookup("SEARCH_RETRY_INTERVAL_SECS"),
            DEFAULT_RETRY_INTERVAL_SECS,
        ));

        let recreate_index = parse_flag("RECREATE_INDEX", lookup("RECREATE_INDEX"));

        let demo_plate_number = lookup("DEMO_PLATE_NUMBER")
            .unwrap_or_else(|| DEFAULT_DEMO_PLATE_NUMBER.to_string());
        if demo_plate_number.trim().is_empty() {
            return Err(RegistryError::config("DEMO_PLATE_NUMBER must not be empty"));
        }

        Ok(Self {
            search_url,
            index_name,
            client: SearchIndexClientConfig::default()
                .with_shards(number_of_shards, number_of_replicas)
                .with_scroll_page_size(scroll_page_size)
                .with_scroll_keep_alive(scroll_keep_alive),
            connection_mode,
            retry_interval,
            recreate_index,
            demo_plate_number,
        })
    }
}

fn parse_or_default<T>(key: &str, value: Option<String>, default: T) -> T
where
    T: FromStr + Display,
{
    match value {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key = %key, value = %raw, default = %default, "Invalid number, using default");
            default
        }),
    }
}

fn parse_flag(key: &str, value: Option<String>) -> bool {
    match value.as_deref().map(|v| v.trim().to_lowercase()) {
        None => false,
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" | "" => false,
            _ => {
                warn!(key = %key, value = %v, "Invalid flag, using false");
                false
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(vars: &[(&str, &str)]) -> Result<Settings, RegistryError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings_from(&[]).unwrap();

        assert_eq!(settings.search_url, "http://127.0.0.1:9200");
        assert_eq!(settings.index_name, "cars");
        assert_eq!(settings.client, SearchIndexClientConfig::default());
        assert_eq!(settings.connection_mode, ConnectionMode::FailFast);
        assert_eq!(settings.retry_interval, Duration::from_secs(15));
        assert!(!settings.recreate_index);
        assert_eq!(settings.demo_plate_number, "ABC-123");
    }

    #[test]
    fn test_overrides() {
        let settings = settings_from(&[
            ("SEARCH_URL", "http://search:9200"),
            ("INDEX_NAME", "vehicles"),
            ("INDEX_SHARDS", "1"),
            ("INDEX_REPLICAS", "0"),
            ("SCROLL_PAGE_SIZE", "25"),
            ("SCROLL_KEEP_ALIVE", "30s"),
            ("SEARCH_CONNECTION_MODE", "retry"),
            ("SEARCH_RETRY_INTERVAL_SECS", "2"),
            ("RECREATE_INDEX", "true"),
            ("DEMO_PLATE_NUMBER", "XYZ-987"),
        ])
        .unwrap();

        assert_eq!(settings.search_url, "http://search:9200");
        assert_eq!(settings.index_name, "vehicles");
        assert_eq!(settings.client.number_of_shards, 1);
        assert_eq!(settings.client.number_of_replicas, 0);
        assert_eq!(settings.client.scroll_page_size, 25);
        assert_eq!(settings.client.scroll_keep_alive, "30s");
        assert_eq!(settings.connection_mode, ConnectionMode::Retry);
        assert_eq!(settings.retry_interval, Duration::from_secs(2));
        assert!(settings.recreate_index);
        assert_eq!(settings.demo_plate_number, "XYZ-987");
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let settings = settings_from(&[
            ("INDEX_SHARDS", "many"),
            ("SCROLL_PAGE_SIZE", "-5"),
            ("SEARCH_RETRY_INTERVAL_SECS", ""),
        ])
        .unwrap();

        assert_eq!(settings.client.number_of_shards, 2);
        assert_eq!(settings.client.scroll_page_size, 100);
        assert_eq!(settings.retry_interval, Duration::from_secs(15));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let result = settings_from(&[("SCROLL_PAGE_SIZE", "0")]);
        assert!(matches!(result, Err(RegistryError::ConfigError(_))));
    }

    #[test]
    fn test_blank_index_name_rejected() {
        let result = settings_from(&[("INDEX_NAME", "  ")]);
        assert!(matches!(result, Err(RegistryError::ConfigError(_))));
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("F", Some("YES".to_string())));
        assert!(parse_flag("F", Some("1".to_string())));
        assert!(!parse_flag("F", Some("off".to_string())));
        assert!(!parse_flag("F", Some("maybe".to_string())));
        assert!(!parse_flag("F", None));
    }
}
