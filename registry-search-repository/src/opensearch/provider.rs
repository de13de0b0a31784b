//! OpenSearch provider implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! using the OpenSearch Rust crate.

use async_trait::async_trait;
use opensearch::{
    http::response::Response,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts, IndicesRefreshParts},
    ClearScrollParts, GetParts, IndexParts, OpenSearch, ScrollParts, SearchParts,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, error, info};
use url::Url;
use uuid::Uuid;

use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::index_config::get_index_settings;
use crate::opensearch::queries::{build_match_all_query, build_search_query};
use crate::opensearch::responses::{AcknowledgedResponse, GetResponse, IndexResponse, SearchBody};
use crate::types::{IndexDescriptor, IndexedDocument, ScrollPage};
use registry_search_shared::{SearchHit, SearchQuery, SearchResponse, VehicleDocument};

/// OpenSearch provider implementation.
///
/// Talks to exactly one node: the connection pool never sniffs the cluster
/// for other nodes, so only the configured URL is ever contacted.
///
/// # Example
///
/// ```ignore
/// let provider = OpenSearchProvider::new("http://127.0.0.1:9200")?;
/// provider.ping().await?;
/// ```
pub struct OpenSearchProvider {
    client: OpenSearch,
}

impl OpenSearchProvider {
    /// Create a new OpenSearch provider for the specified URL.
    ///
    /// No request is sent; use `ping` to check that the engine is reachable.
    ///
    /// # Arguments
    ///
    /// * `url` - The engine URL (e.g., "http://127.0.0.1:9200")
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchProvider)` - A new provider instance
    /// * `Err(SearchIndexError)` - If the URL is invalid or the transport cannot be built
    pub fn new(url: &str) -> Result<Self, SearchIndexError> {
        let parsed_url =
            Url::parse(url).map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, "Created OpenSearch provider");

        Ok(Self { client })
    }

    /// Return the response if its status is a success, otherwise log the body
    /// and turn it into an error built by `to_error`.
    async fn ensure_success(
        response: Response,
        operation: &str,
        to_error: fn(String) -> SearchIndexError,
    ) -> Result<Response, SearchIndexError> {
        let status = response.status_code();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %error_body, "{} request failed", operation);
        Err(to_error(format!(
            "{} failed with status {}: {}",
            operation, status, error_body
        )))
    }

    /// Deserialize a response body.
    async fn read_body<T: DeserializeOwned>(
        response: Response,
        operation: &str,
        to_error: fn(String) -> SearchIndexError,
    ) -> Result<T, SearchIndexError> {
        response
            .json::<T>()
            .await
            .map_err(|e| to_error(format!("Failed to parse {} response: {}", operation, e)))
    }

    async fn read_scroll_page(
        response: Response,
        operation: &str,
    ) -> Result<ScrollPage, SearchIndexError> {
        let response =
            Self::ensure_success(response, operation, SearchIndexError::QueryError).await?;
        let body: SearchBody =
            Self::read_body(response, operation, SearchIndexError::QueryError).await?;

        Ok(ScrollPage {
            scroll_id: body.scroll_id.clone(),
            hits: body.into_hits(),
        })
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchProvider {
    async fn ping(&self) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .ping()
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        Self::ensure_success(response, "Ping", SearchIndexError::ConnectionError).await?;
        debug!("Search engine answered ping");
        Ok(())
    }

    /// Create an index with the descriptor's settings and mappings.
    ///
    /// The engine answers 2xx with `acknowledged: true` once the cluster has
    /// applied the change. Anything else, including an existing index, is an error.
    async fn create_index(&self, descriptor: &IndexDescriptor) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(&descriptor.name))
            .body(get_index_settings(descriptor))
            .send()
            .await
            .map_err(|e| SearchIndexError::index_creation(e.to_string()))?;

        let response =
            Self::ensure_success(response, "Create index", SearchIndexError::IndexCreationError)
                .await?;
        let body: AcknowledgedResponse =
            Self::read_body(response, "create index", SearchIndexError::IndexCreationError)
                .await?;

        if !body.acknowledged {
            return Err(SearchIndexError::index_creation(format!(
                "Create index {} not acknowledged",
                descriptor.name
            )));
        }

        info!(index = %descriptor.name, "Index created");
        Ok(())
    }

    async fn delete_index(&self, index: &str) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchIndexError::index_deletion(e.to_string()))?;

        let response =
            Self::ensure_success(response, "Delete index", SearchIndexError::IndexDeletionError)
                .await?;
        let body: AcknowledgedResponse =
            Self::read_body(response, "delete index", SearchIndexError::IndexDeletionError)
                .await?;

        if !body.acknowledged {
            return Err(SearchIndexError::index_deletion(format!(
                "Delete index {} not acknowledged",
                index
            )));
        }

        info!(index = %index, "Index deleted");
        Ok(())
    }

    async fn index_exists(&self, index: &str) -> Result<bool, SearchIndexError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchIndexError::query(e.to_string()))?;

        match response.status_code().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            status => Err(SearchIndexError::query(format!(
                "Index exists check for {} returned status {}",
                index, status
            ))),
        }
    }

    async fn refresh_index(&self, index: &str) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .indices()
            .refresh(IndicesRefreshParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchIndexError::query(e.to_string()))?;

        Self::ensure_success(response, "Refresh index", SearchIndexError::QueryError).await?;
        debug!(index = %index, "Index refreshed");
        Ok(())
    }

    /// Index a document under an explicit id, replacing any previous version.
    async fn index_document(
        &self,
        index: &str,
        id: &Uuid,
        document: &VehicleDocument,
    ) -> Result<IndexedDocument, SearchIndexError> {
        let doc_id = id.to_string();

        let response = self
            .client
            .index(IndexParts::IndexId(index, &doc_id))
            .body(document)
            .send()
            .await
            .map_err(|e| SearchIndexError::index(e.to_string()))?;

        let response =
            Self::ensure_success(response, "Index document", SearchIndexError::IndexError).await?;
        let body: IndexResponse =
            Self::read_body(response, "index document", SearchIndexError::IndexError).await?;

        debug!(doc_id = %body.id, index = %body.index, result = %body.result, "Document indexed");
        Ok(IndexedDocument {
            index: body.index,
            id: body.id,
            result: body.result,
        })
    }

    async fn get_document(
        &self,
        index: &str,
        id: &Uuid,
    ) -> Result<Option<SearchHit>, SearchIndexError> {
        let doc_id = id.to_string();

        let response = self
            .client
            .get(GetParts::IndexId(index, &doc_id))
            .send()
            .await
            .map_err(|e| SearchIndexError::query(e.to_string()))?;

        // 404 is acceptable - document may not exist
        if response.status_code().as_u16() == 404 {
            return Ok(None);
        }

        let response =
            Self::ensure_success(response, "Get document", SearchIndexError::QueryError).await?;
        let body: GetResponse =
            Self::read_body(response, "get document", SearchIndexError::QueryError).await?;

        Ok(body.into_hit())
    }

    async fn search(
        &self,
        index: &str,
        query: &SearchQuery,
    ) -> Result<SearchResponse, SearchIndexError> {
        let response = self
            .client
            .search(SearchParts::Index(&[index]))
            .body(build_search_query(query))
            .send()
            .await
            .map_err(|e| SearchIndexError::query(e.to_string()))?;

        let response =
            Self::ensure_success(response, "Search", SearchIndexError::QueryError).await?;
        let body: SearchBody =
            Self::read_body(response, "search", SearchIndexError::QueryError).await?;

        Ok(body.into_search_response())
    }

    async fn open_scroll(
        &self,
        index: &str,
        page_size: usize,
        keep_alive: &str,
    ) -> Result<ScrollPage, SearchIndexError> {
        let response = self
            .client
            .search(SearchParts::Index(&[index]))
            .scroll(keep_alive)
            .size(page_size as i64)
            .body(build_match_all_query())
            .send()
            .await
            .map_err(|e| SearchIndexError::query(e.to_string()))?;

        Self::read_scroll_page(response, "Open scroll").await
    }

    async fn next_scroll_page(
        &self,
        scroll_id: &str,
        keep_alive: &str,
    ) -> Result<ScrollPage, SearchIndexError> {
        let response = self
            .client
            .scroll(ScrollParts::None)
            .body(json!({
                "scroll": keep_alive,
                "scroll_id": scroll_id
            }))
            .send()
            .await
            .map_err(|e| SearchIndexError::query(e.to_string()))?;

        Self::read_scroll_page(response, "Scroll").await
    }

    async fn clear_scroll(&self, scroll_id: &str) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .clear_scroll(ClearScrollParts::None)
            .body(json!({ "scroll_id": [scroll_id] }))
            .send()
            .await
            .map_err(|e| SearchIndexError::query(e.to_string()))?;

        // 404 is acceptable - the cursor may already have expired
        if response.status_code().as_u16() == 404 {
            return Ok(());
        }

        Self::ensure_success(response, "Clear scroll", SearchIndexError::QueryError).await?;
        Ok(())
    }
}
