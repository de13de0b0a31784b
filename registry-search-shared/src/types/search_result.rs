//! Search result types for the registry search client.
//!
//! This module defines the response structures returned from search and
//! retrieval operations.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single document returned by the search engine.
///
/// Fields are kept as a generic name-to-value map so that partial or
/// heterogeneous documents can be read without assuming a schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    /// The document id as stored in the index.
    pub id: String,

    /// The document source fields.
    #[serde(default)]
    pub fields: Map<String, Value>,

    /// Relevance score from the search engine, if it computed one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl SearchHit {
    /// Create a hit without a score.
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
            score: None,
        }
    }

    /// Get a field value as a string, if present and a string.
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }
}

/// Complete search response with hits and metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    /// The hits in the engine's ranking order.
    pub hits: Vec<SearchHit>,

    /// Total number of matching documents.
    /// May be greater than the number of returned hits.
    pub total: u64,

    /// Time taken by the engine to execute the search in milliseconds.
    pub took_ms: u64,
}

impl SearchResponse {
    /// Create an empty search response.
    pub fn empty() -> Self {
        Self {
            hits: Vec::new(),
            total: 0,
            took_ms: 0,
        }
    }

    /// Create a new search response.
    pub fn new(hits: Vec<SearchHit>, total: u64, took_ms: u64) -> Self {
        Self {
            hits,
            total,
            took_ms,
        }
    }

    /// Returns true if there are no hits.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Returns the number of hits in this response.
    pub fn len(&self) -> usize {
        self.hits.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_response_empty() {
        let response = SearchResponse::empty();
        assert!(response.is_empty());
        assert_eq!(response.len(), 0);
        assert_eq!(response.total, 0);
    }

    #[test]
    fn test_search_response_new() {
        let mut fields = Map::new();
        fields.insert("rendszam".to_string(), json!("ABC-123"));

        let response = SearchResponse::new(vec![SearchHit::new("id-1", fields)], 100, 5);
        assert!(!response.is_empty());
        assert_eq!(response.len(), 1);
        assert_eq!(response.total, 100);
        assert_eq!(response.took_ms, 5);
    }

    #[test]
    fn test_field_str() {
        let mut fields = Map::new();
        fields.insert("rendszam".to_string(), json!("ABC-123"));
        fields.insert("adatok".to_string(), json!(["data1"]));
        let hit = SearchHit::new("id-1", fields);

        assert_eq!(hit.field_str("rendszam"), Some("ABC-123"));
        assert_eq!(hit.field_str("adatok"), None);
        assert_eq!(hit.field_str("missing"), None);
    }
}
