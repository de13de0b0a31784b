//! Search query types for the registry search client.
//!
//! This module defines the query structures used to search the index.

use serde::{Deserialize, Serialize};

/// How the search term is matched against the searched fields.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchMode {
    /// The term is a regular expression evaluated by the engine.
    /// Keyword regexes are anchored to the whole field value.
    /// This is the default mode.
    #[default]
    Regex,

    /// The term is a literal that must appear anywhere in the field value.
    /// Wildcard metacharacters in the term are escaped.
    Substring,
}

/// Search query parameters.
///
/// This struct represents a search request against the plate number, owner
/// and tags fields of the index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchQuery {
    /// The search term.
    pub term: String,

    /// How the term is matched.
    #[serde(default)]
    pub mode: MatchMode,

    /// Maximum number of hits to return.
    /// Defaults to the engine's own page size when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
}

impl SearchQuery {
    /// Create a regular expression query.
    ///
    /// # Example
    ///
    /// ```
    /// use registry_search_shared::{MatchMode, SearchQuery};
    ///
    /// let query = SearchQuery::regex(".*ABC.*");
    /// assert_eq!(query.mode, MatchMode::Regex);
    /// ```
    pub fn regex(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            mode: MatchMode::Regex,
            size: None,
        }
    }

    /// Create a literal substring query.
    pub fn substring(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            mode: MatchMode::Substring,
            size: None,
        }
    }

    /// Set the maximum number of hits to return.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Validate the query parameters.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.term.is_empty() {
            return Err("Search term cannot be empty".to_string());
        }
        Ok(())
    }
}
