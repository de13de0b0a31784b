//! Search index client implementation.
//!
//! This module provides the main client for interacting with the vehicle index.
//! Application code uses this to manage the index and to add, search and
//! enumerate documents.

use std::sync::Arc;

use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use tokio::sync::OnceCell;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::config::SearchIndexClientConfig;
use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::types::{IndexDescriptor, IndexedDocument};
use registry_search_shared::{
    document_uuid, SearchHit, SearchQuery, SearchResponse, VehicleDocument,
};

/// Handle to an initialized client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSession {
    index_name: String,
}

impl SearchSession {
    /// The index every operation of the client targets.
    pub fn index_name(&self) -> &str {
        &self.index_name
    }
}

/// Cursor position of a running scroll.
enum ScrollState {
    Start,
    Next(String),
    Done,
}

/// The main client for interacting with the vehicle index.
///
/// The client starts uninitialized. `init` checks the connection once and
/// records the target index; every other operation requires it.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use registry_search_repository::{OpenSearchProvider, SearchIndexClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = Arc::new(OpenSearchProvider::new("http://127.0.0.1:9200")?);
/// let client = SearchIndexClient::new(provider);
/// client.init("cars").await?;
///
/// let response = client.search(".*ABC.*").await?;
/// println!("Found {} documents", response.total);
/// # Ok(())
/// # }
/// ```
pub struct SearchIndexClient {
    provider: Arc<dyn SearchIndexProvider>,
    config: SearchIndexClientConfig,
    session: OnceCell<SearchSession>,
}

impl SearchIndexClient {
    /// Create a new SearchIndexClient with default configuration.
    pub fn new(provider: Arc<dyn SearchIndexProvider>) -> Self {
        Self::with_config(provider, SearchIndexClientConfig::default())
    }

    /// Create a new SearchIndexClient with custom configuration.
    pub fn with_config(
        provider: Arc<dyn SearchIndexProvider>,
        config: SearchIndexClientConfig,
    ) -> Self {
        Self {
            provider,
            config,
            session: OnceCell::new(),
        }
    }

    /// The client configuration.
    pub fn config(&self) -> &SearchIndexClientConfig {
        &self.config
    }

    /// Returns true once `init` has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.session.initialized()
    }

    /// Initialize the client for an index.
    ///
    /// Idempotent: if the client is already initialized the existing session is
    /// returned unchanged, even when `index_name` differs. Concurrent callers
    /// wait for a single initialization and all observe the same session. If
    /// the engine cannot be reached the client stays uninitialized and a later
    /// call tries again.
    ///
    /// # Returns
    ///
    /// * `Ok(&SearchSession)` - The session
    /// * `Err(SearchIndexError::ValidationError)` - If `index_name` is empty
    /// * `Err(SearchIndexError::ConnectionError)` - If the engine cannot be reached
    pub async fn init(&self, index_name: &str) -> Result<&SearchSession, SearchIndexError> {
        if index_name.trim().is_empty() {
            return Err(SearchIndexError::validation("index name is required"));
        }

        let session = self
            .session
            .get_or_try_init(|| async {
                self.provider.ping().await.map_err(|e| match e {
                    SearchIndexError::ConnectionError(_) => e,
                    other => SearchIndexError::connection(other.to_string()),
                })?;

                info!(index = %index_name, "Search index client initialized");
                Ok::<_, SearchIndexError>(SearchSession {
                    index_name: index_name.to_string(),
                })
            })
            .await?;

        if session.index_name != index_name {
            warn!(
                index = %session.index_name,
                requested = %index_name,
                "Client already initialized for another index, keeping the existing session"
            );
        }

        Ok(session)
    }

    fn session(&self) -> Result<&SearchSession, SearchIndexError> {
        self.session.get().ok_or(SearchIndexError::NotInitialized)
    }

    /// Deterministic document id for a name: the version-5 UUID of the name
    /// under the DNS namespace.
    pub fn get_uuid(name: &str) -> Uuid {
        document_uuid(name)
    }

    /// Create the vehicle index with its fixed mapping.
    ///
    /// Succeeds only if the engine acknowledges the creation. An index that
    /// already exists is an error; use `ensure_index` for check-then-create.
    #[instrument(skip(self))]
    pub async fn create_index(&self) -> Result<(), SearchIndexError> {
        let session = self.session()?;
        let descriptor = IndexDescriptor::vehicles(
            session.index_name.as_str(),
            self.config.number_of_shards,
            self.config.number_of_replicas,
        );

        match self.provider.create_index(&descriptor).await {
            Ok(()) => {
                info!(
                    index = %descriptor.name,
                    shards = descriptor.number_of_shards,
                    replicas = descriptor.number_of_replicas,
                    "Index created successfully"
                );
                Ok(())
            }
            Err(e) => {
                error!(index = %descriptor.name, error = %e, "Failed to create index");
                Err(e)
            }
        }
    }

    /// Create the vehicle index unless it already exists.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the index was created
    /// * `Ok(false)` - If it already existed
    pub async fn ensure_index(&self) -> Result<bool, SearchIndexError> {
        if self.index_exists().await? {
            debug!(index = %self.session()?.index_name, "Index already exists");
            return Ok(false);
        }
        self.create_index().await?;
        Ok(true)
    }

    /// Delete the index, best-effort.
    ///
    /// Failures and non-acknowledgements are logged and reported as `false`;
    /// this never returns an error.
    pub async fn delete_index(&self) -> bool {
        let session = match self.session() {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "Cannot delete index");
                return false;
            }
        };

        match self.provider.delete_index(&session.index_name).await {
            Ok(()) => {
                info!(index = %session.index_name, "Index deleted");
                true
            }
            Err(e) => {
                warn!(index = %session.index_name, error = %e, "Error deleting the index");
                false
            }
        }
    }

    /// Check whether the index exists.
    pub async fn index_exists(&self) -> Result<bool, SearchIndexError> {
        let session = self.session()?;
        self.provider.index_exists(&session.index_name).await
    }

    /// Make every write so far visible to search.
    pub async fn refresh_index(&self) -> Result<(), SearchIndexError> {
        let session = self.session()?;
        self.provider.refresh_index(&session.index_name).await
    }

    /// Index a vehicle under the id derived from its plate number.
    ///
    /// Indexing the same plate number again overwrites the earlier document.
    /// The document is visible to id lookups at once and to search after the
    /// engine's next refresh.
    ///
    /// # Returns
    ///
    /// * `Ok(IndexedDocument)` - Where and how the document was written
    /// * `Err(SearchIndexError::ValidationError)` - If the plate number is empty
    /// * `Err(SearchIndexError::IndexError)` - If the engine rejects the document
    #[instrument(skip(self, document), fields(plate_number = %document.plate_number))]
    pub async fn add_document(
        &self,
        document: &VehicleDocument,
    ) -> Result<IndexedDocument, SearchIndexError> {
        document.validate().map_err(SearchIndexError::validation)?;
        let session = self.session()?;

        let id = Self::get_uuid(&document.plate_number);
        let indexed = self
            .provider
            .index_document(&session.index_name, &id, document)
            .await?;

        info!(doc_id = %indexed.id, index = %indexed.index, "Indexed document");
        Ok(indexed)
    }

    /// Look a vehicle up by plate number.
    pub async fn get_document(
        &self,
        plate_number: &str,
    ) -> Result<Option<SearchHit>, SearchIndexError> {
        if plate_number.trim().is_empty() {
            return Err(SearchIndexError::validation("plate number is required"));
        }
        let session = self.session()?;
        self.provider
            .get_document(&session.index_name, &Self::get_uuid(plate_number))
            .await
    }

    /// Search plate number, owner and tags with `term` as a regular expression.
    ///
    /// Zero matches is an empty response, not an error.
    pub async fn search(&self, term: &str) -> Result<SearchResponse, SearchIndexError> {
        self.search_with(&SearchQuery::regex(term)).await
    }

    /// Search plate number, owner and tags with an explicit match mode.
    #[instrument(skip(self, query), fields(term = %query.term, mode = ?query.mode))]
    pub async fn search_with(
        &self,
        query: &SearchQuery,
    ) -> Result<SearchResponse, SearchIndexError> {
        query.validate().map_err(SearchIndexError::validation)?;
        let session = self.session()?;

        let response = self.provider.search(&session.index_name, query).await?;

        info!(
            took_ms = response.took_ms,
            total = response.total,
            returned = response.len(),
            "Search completed"
        );
        Ok(response)
    }

    /// Stream every document of the index.
    ///
    /// Nothing is requested until the stream is polled. Pages of
    /// `scroll_page_size` documents are fetched one round trip at a time until
    /// the engine returns an empty page, after which the cursor is released.
    /// A failed page fetch is yielded as an error and ends the stream; the
    /// scroll cannot be resumed.
    ///
    /// # Returns
    ///
    /// * `Ok(stream)` - A finite stream of hits
    /// * `Err(SearchIndexError::NotInitialized)` - If `init` has not succeeded
    pub fn get_all_documents(
        &self,
    ) -> Result<BoxStream<'static, Result<SearchHit, SearchIndexError>>, SearchIndexError> {
        let session = self.session()?;
        let provider = Arc::clone(&self.provider);
        let index = session.index_name.clone();
        let page_size = self.config.scroll_page_size.max(1);
        let keep_alive = self.config.scroll_keep_alive.clone();

        let pages = stream::try_unfold(ScrollState::Start, move |state| {
            let provider = Arc::clone(&provider);
            let index = index.clone();
            let keep_alive = keep_alive.clone();

            async move {
                let page = match state {
                    ScrollState::Start => {
                        provider.open_scroll(&index, page_size, &keep_alive).await?
                    }
                    ScrollState::Next(scroll_id) => {
                        provider.next_scroll_page(&scroll_id, &keep_alive).await?
                    }
                    ScrollState::Done => return Ok(None),
                };

                if page.is_exhausted() {
                    if let Some(scroll_id) = page.scroll_id {
                        if let Err(e) = provider.clear_scroll(&scroll_id).await {
                            warn!(index = %index, error = %e, "Failed to clear scroll");
                        }
                    }
                    info!(index = %index, "All documents retrieved");
                    return Ok(None);
                }

                debug!(index = %index, hits = page.hits.len(), "Fetched scroll page");

                let next = match page.scroll_id {
                    Some(scroll_id) => ScrollState::Next(scroll_id),
                    None => ScrollState::Done,
                };
                let hits = stream::iter(page.hits.into_iter().map(Ok::<_, SearchIndexError>));
                Ok::<_, SearchIndexError>(Some((hits, next)))
            }
        });

        Ok(pages.try_flatten().boxed())
    }
}
