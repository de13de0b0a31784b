//! OpenSearch index configuration and mappings.
//!
//! This module turns an `IndexDescriptor` into the index creation body.

use serde_json::{json, Map, Value};

use crate::types::IndexDescriptor;

/// Get the index settings and mappings for an index descriptor.
///
/// The body has the shape expected by `PUT /<index>`:
///
/// ```json
/// {
///   "settings": { "number_of_shards": 2, "number_of_replicas": 1 },
///   "mappings": { "properties": { "rendszam": { "type": "keyword" } } }
/// }
/// ```
///
/// Array-valued fields need no special mapping, a keyword field accepts a
/// list of keywords.
pub fn get_index_settings(descriptor: &IndexDescriptor) -> Value {
    let properties: Map<String, Value> = descriptor
        .fields
        .iter()
        .map(|field| {
            (
                field.name.clone(),
                json!({ "type": field.field_type.as_str() }),
            )
        })
        .collect();

    json!({
        "settings": {
            "number_of_shards": descriptor.number_of_shards,
            "number_of_replicas": descriptor.number_of_replicas
        },
        "mappings": {
            "properties": properties
        }
    })
}
