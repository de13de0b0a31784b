//! Configuration types for the SearchIndexClient.

/// Default number of primary shards for a newly created index.
pub const DEFAULT_NUMBER_OF_SHARDS: u32 = 2;

/// Default number of replicas for a newly created index.
pub const DEFAULT_NUMBER_OF_REPLICAS: u32 = 1;

/// Default number of documents fetched per scroll page.
pub const DEFAULT_SCROLL_PAGE_SIZE: usize = 100;

/// Default time the engine keeps a scroll cursor alive between pages.
pub const DEFAULT_SCROLL_KEEP_ALIVE: &str = "1m";

/// Configuration for the SearchIndexClient.
///
/// Shard and replica counts are only used when the client creates the index.
/// The scroll settings control `get_all_documents`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchIndexClientConfig {
    /// Number of primary shards for a newly created index.
    pub number_of_shards: u32,
    /// Number of replicas for a newly created index.
    pub number_of_replicas: u32,
    /// Number of documents requested per scroll page. Must be at least 1.
    pub scroll_page_size: usize,
    /// Scroll cursor time-to-live in engine duration syntax (e.g. "1m").
    pub scroll_keep_alive: String,
}

impl Default for SearchIndexClientConfig {
    fn default() -> Self {
        Self {
            number_of_shards: DEFAULT_NUMBER_OF_SHARDS,
            number_of_replicas: DEFAULT_NUMBER_OF_REPLICAS,
            scroll_page_size: DEFAULT_SCROLL_PAGE_SIZE,
            scroll_keep_alive: DEFAULT_SCROLL_KEEP_ALIVE.to_string(),
        }
    }
}

impl SearchIndexClientConfig {
    /// Set the shard and replica counts used at index creation.
    pub fn with_shards(mut self, number_of_shards: u32, number_of_replicas: u32) -> Self {
        self.number_of_shards = number_of_shards;
        self.number_of_replicas = number_of_replicas;
        self
    }

    /// Set the scroll page size. A size of zero is raised to one.
    pub fn with_scroll_page_size(mut self, scroll_page_size: usize) -> Self {
        self.scroll_page_size = scroll_page_size.max(1);
        self
    }

    /// Set the scroll cursor time-to-live.
    pub fn with_scroll_keep_alive(mut self, keep_alive: impl Into<String>) -> Self {
        self.scroll_keep_alive = keep_alive.into();
        self
    }
}
