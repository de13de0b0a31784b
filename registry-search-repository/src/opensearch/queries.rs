//! OpenSearch query builders.
//!
//! This module provides functions to build OpenSearch query bodies from
//! search parameters.

use serde_json::{json, Value};

use registry_search_shared::{MatchMode, SearchQuery, VehicleDocument};

/// Fields a search term is matched against.
pub const SEARCH_FIELDS: [&str; 3] = [
    VehicleDocument::PLATE_NUMBER_FIELD,
    VehicleDocument::OWNER_FIELD,
    VehicleDocument::TAGS_FIELD,
];

/// Build an OpenSearch search body from a SearchQuery.
///
/// The body is a boolean query with one `should` clause per searched field,
/// at least one of which has to match. The clause type depends on the match mode:
/// - `Regex`: `regexp` clauses, the term is passed through unchanged
/// - `Substring`: `wildcard` clauses matching `*term*` with the term escaped
pub fn build_search_query(query: &SearchQuery) -> Value {
    let should: Vec<Value> = match query.mode {
        MatchMode::Regex => SEARCH_FIELDS
            .iter()
            .map(|field| build_regexp_clause(field, &query.term))
            .collect(),
        MatchMode::Substring => {
            let pattern = format!("*{}*", escape_wildcard(&query.term));
            SEARCH_FIELDS
                .iter()
                .map(|field| build_wildcard_clause(field, &pattern))
                .collect()
        }
    };

    let mut body = json!({
        "query": {
            "bool": {
                "should": should,
                "minimum_should_match": 1
            }
        }
    });

    if let Some(size) = query.size {
        body["size"] = json!(size);
    }

    body
}

/// Build the body used to scroll over every document.
pub fn build_match_all_query() -> Value {
    json!({
        "query": {
            "match_all": {}
        }
    })
}

fn build_regexp_clause(field: &str, term: &str) -> Value {
    json!({ "regexp": { field: { "value": term } } })
}

fn build_wildcard_clause(field: &str, pattern: &str) -> Value {
    json!({ "wildcard": { field: { "value": pattern } } })
}

/// Escape the wildcard metacharacters `*`, `?` and `\` so the term matches literally.
fn escape_wildcard(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '*' | '?' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
