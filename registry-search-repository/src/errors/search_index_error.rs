//! Search index error types.
//!
//! This module defines the unified error type for all search index operations,
//! including both low-level backend errors and client-level errors.

use thiserror::Error;

/// Unified errors from search index operations.
///
/// Used by the `SearchIndexProvider` trait and `SearchIndexClient` for all search index
/// operations. None of these are fatal inside the library: callers decide whether to
/// abort, retry, or log and continue.
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// Validation error (e.g., empty plate number, empty index name).
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// An operation was attempted before the client was initialized.
    #[error("Search index client is not initialized")]
    NotInitialized,

    /// Failed to establish connection to the search engine.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Index creation was rejected or not acknowledged.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// Index deletion was rejected or not acknowledged.
    #[error("Index deletion error: {0}")]
    IndexDeletionError(String),

    /// Failed to index a document.
    #[error("Index error: {0}")]
    IndexError(String),

    /// A search, scroll or lookup request was rejected, or its response
    /// could not be deserialized.
    #[error("Query error: {0}")]
    QueryError(String),
}

impl SearchIndexError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create an index deletion error.
    pub fn index_deletion(msg: impl Into<String>) -> Self {
        Self::IndexDeletionError(msg.into())
    }

    /// Create an index error.
    pub fn index(msg: impl Into<String>) -> Self {
        Self::IndexError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }
}
