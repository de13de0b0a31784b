//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::SearchIndexError;
use crate::types::{IndexDescriptor, IndexedDocument, ScrollPage};
use registry_search_shared::{SearchHit, SearchQuery, SearchResponse, VehicleDocument};

/// Abstracts the underlying search index implementation (OpenSearch, Elasticsearch, etc.).
///
/// This trait defines the interface for all search index backend implementations. Implementations
/// are injected into `SearchIndexClient` to enable dependency injection and easy testing with
/// mock implementations.
///
/// Every method is a single round trip to the engine. All methods return
/// `Result<T, SearchIndexError>` for consistent error handling across backends.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Check that the engine answers at the configured endpoint.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the engine is reachable
    /// * `Err(SearchIndexError::ConnectionError)` - If it is not
    async fn ping(&self) -> Result<(), SearchIndexError>;

    /// Create an index with the settings and mappings of the descriptor.
    ///
    /// Succeeds only if the engine acknowledges the creation. An index that
    /// already exists is reported as an error.
    ///
    /// # Arguments
    ///
    /// * `descriptor` - Name, sharding and field mapping of the index
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index was created and acknowledged
    /// * `Err(SearchIndexError::IndexCreationError)` - Otherwise
    async fn create_index(&self, descriptor: &IndexDescriptor) -> Result<(), SearchIndexError>;

    /// Delete an index.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the deletion was acknowledged
    /// * `Err(SearchIndexError::IndexDeletionError)` - If it was rejected or not acknowledged
    async fn delete_index(&self, index: &str) -> Result<(), SearchIndexError>;

    /// Check whether an index exists.
    async fn index_exists(&self, index: &str) -> Result<bool, SearchIndexError>;

    /// Make all writes to the index visible to search.
    async fn refresh_index(&self, index: &str) -> Result<(), SearchIndexError>;

    /// Index a document under an explicit id.
    ///
    /// If a document with the same id already exists, it is replaced.
    ///
    /// # Arguments
    ///
    /// * `index` - Target index
    /// * `id` - Document id
    /// * `document` - Full document body
    ///
    /// # Returns
    ///
    /// * `Ok(IndexedDocument)` - Where and how the document was written
    /// * `Err(SearchIndexError::IndexError)` - If indexing fails
    async fn index_document(
        &self,
        index: &str,
        id: &Uuid,
        document: &VehicleDocument,
    ) -> Result<IndexedDocument, SearchIndexError>;

    /// Fetch a document by id.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(SearchHit))` - If the document exists
    /// * `Ok(None)` - If it does not
    /// * `Err(SearchIndexError::QueryError)` - If the lookup fails
    async fn get_document(
        &self,
        index: &str,
        id: &Uuid,
    ) -> Result<Option<SearchHit>, SearchIndexError>;

    /// Execute a search query against the index.
    ///
    /// Zero matches is a successful, empty response.
    ///
    /// # Returns
    ///
    /// * `Ok(SearchResponse)` - Hits in ranking order with total and latency
    /// * `Err(SearchIndexError::QueryError)` - If the search fails
    async fn search(
        &self,
        index: &str,
        query: &SearchQuery,
    ) -> Result<SearchResponse, SearchIndexError>;

    /// Start a scroll over every document of the index and return its first page.
    ///
    /// # Arguments
    ///
    /// * `index` - Index to scroll
    /// * `page_size` - Documents per page
    /// * `keep_alive` - Cursor time-to-live between pages (e.g. "1m")
    async fn open_scroll(
        &self,
        index: &str,
        page_size: usize,
        keep_alive: &str,
    ) -> Result<ScrollPage, SearchIndexError>;

    /// Fetch the next page of a scroll using the cursor of the previous page.
    async fn next_scroll_page(
        &self,
        scroll_id: &str,
        keep_alive: &str,
    ) -> Result<ScrollPage, SearchIndexError>;

    /// Release a scroll cursor on the engine.
    async fn clear_scroll(&self, scroll_id: &str) -> Result<(), SearchIndexError>;
}
