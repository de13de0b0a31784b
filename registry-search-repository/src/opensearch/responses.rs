//! Response bodies returned by the OpenSearch HTTP API.
//!
//! Only the fields the provider reads are modelled. Unknown fields are ignored.

use serde::Deserialize;
use serde_json::{Map, Value};

use registry_search_shared::{SearchHit, SearchResponse};

/// Body of index creation and deletion responses.
#[derive(Debug, Deserialize)]
pub(crate) struct AcknowledgedResponse {
    #[serde(default)]
    pub acknowledged: bool,
}

/// Body of a document index response.
#[derive(Debug, Deserialize)]
pub(crate) struct IndexResponse {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub result: String,
}

/// Body of a document get response.
#[derive(Debug, Deserialize)]
pub(crate) struct GetResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub found: bool,
    #[serde(rename = "_source", default)]
    pub source: Option<Map<String, Value>>,
}

impl GetResponse {
    pub fn into_hit(self) -> Option<SearchHit> {
        if !self.found {
            return None;
        }
        Some(SearchHit::new(self.id, self.source.unwrap_or_default()))
    }
}

/// Body of search and scroll responses.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchBody {
    #[serde(default)]
    pub took: u64,
    #[serde(rename = "_scroll_id", default)]
    pub scroll_id: Option<String>,
    pub hits: HitsBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HitsBody {
    #[serde(default)]
    pub total: Option<TotalHits>,
    #[serde(default)]
    pub hits: Vec<HitBody>,
}

/// `hits.total` is an object since Elasticsearch 7 and a bare number before.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum TotalHits {
    Object { value: u64 },
    Count(u64),
}

impl TotalHits {
    fn value(&self) -> u64 {
        match self {
            TotalHits::Object { value } => *value,
            TotalHits::Count(value) => *value,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct HitBody {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    #[serde(rename = "_source", default)]
    pub source: Option<Map<String, Value>>,
}

impl From<HitBody> for SearchHit {
    fn from(hit: HitBody) -> Self {
        SearchHit {
            id: hit.id,
            fields: hit.source.unwrap_or_default(),
            score: hit.score,
        }
    }
}

impl SearchBody {
    /// Total hit count, falling back to the number of returned hits when the
    /// engine did not track it.
    pub fn total(&self) -> u64 {
        self.hits
            .total
            .as_ref()
            .map(TotalHits::value)
            .unwrap_or(self.hits.hits.len() as u64)
    }

    pub fn into_hits(self) -> Vec<SearchHit> {
        self.hits.hits.into_iter().map(SearchHit::from).collect()
    }

    pub fn into_search_response(self) -> SearchResponse {
        let total = self.total();
        let took = self.took;
        SearchResponse::new(self.into_hits(), total, took)
    }
}
