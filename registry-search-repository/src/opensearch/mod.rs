//! OpenSearch implementation of the search index provider.
//!
//! This module provides a concrete implementation of `SearchIndexProvider`
//! using OpenSearch (or a compatible Elasticsearch) as the backend.

mod index_config;
mod provider;
mod queries;
mod responses;

pub use index_config::get_index_settings;
pub use provider::OpenSearchProvider;
pub use queries::{build_match_all_query, build_search_query, SEARCH_FIELDS};
