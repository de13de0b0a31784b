//! # Registry Search Repository
//!
//! This crate provides the `SearchIndexClient` facade used to manage the vehicle
//! index and to index, search and enumerate its documents, together with the
//! `SearchIndexProvider` abstraction over the search engine and a concrete
//! implementation for OpenSearch/Elasticsearch.

pub mod client;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod types;

pub use client::{SearchIndexClient, SearchSession};
pub use config::SearchIndexClientConfig;
pub use errors::SearchIndexError;
pub use interfaces::SearchIndexProvider;
pub use opensearch::OpenSearchProvider;
pub use types::{FieldMapping, FieldType, IndexDescriptor, IndexedDocument, ScrollPage};
