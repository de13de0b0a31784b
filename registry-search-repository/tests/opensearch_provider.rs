//! Tests for `OpenSearchProvider` against a stubbed HTTP engine.
//!
//! Each test starts its own mock server and checks the requests the provider
//! sends and how it reads the engine's status codes and bodies.

use std::sync::Arc;

use chrono::NaiveDate;
use futures::TryStreamExt;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use registry_search_repository::{
    IndexDescriptor, OpenSearchProvider, SearchIndexClient, SearchIndexClientConfig,
    SearchIndexError, SearchIndexProvider,
};
use registry_search_shared::{SearchQuery, VehicleDocument};

fn provider_for(server: &MockServer) -> OpenSearchProvider {
    OpenSearchProvider::new(&server.uri()).unwrap()
}

async fn mount_ping(server: &MockServer) {
    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

async fn client_for(server: &MockServer, config: SearchIndexClientConfig) -> SearchIndexClient {
    mount_ping(server).await;
    let client = SearchIndexClient::with_config(Arc::new(provider_for(server)), config);
    client.init("cars").await.unwrap();
    client
}

fn acknowledged(value: bool) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "acknowledged": value }))
}

#[tokio::test]
async fn test_create_index_sends_settings_and_mappings() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/cars"))
        .and(body_partial_json(json!({
            "settings": { "number_of_shards": 2, "number_of_replicas": 1 },
            "mappings": {
                "properties": {
                    "rendszam": { "type": "keyword" },
                    "forgalmi_ervenyes": { "type": "date" }
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "acknowledged": true,
            "shards_acknowledged": true,
            "index": "cars"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let result = provider
        .create_index(&IndexDescriptor::vehicles("cars", 2, 1))
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_create_index_not_acknowledged() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/cars"))
        .respond_with(acknowledged(false))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let result = provider
        .create_index(&IndexDescriptor::vehicles("cars", 2, 1))
        .await;
    assert!(matches!(
        result,
        Err(SearchIndexError::IndexCreationError(_))
    ));
}

#[tokio::test]
async fn test_create_existing_index() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/cars"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "type": "resource_already_exists_exception" },
            "status": 400
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    match provider
        .create_index(&IndexDescriptor::vehicles("cars", 2, 1))
        .await
    {
        Err(SearchIndexError::IndexCreationError(msg)) => {
            assert!(msg.contains("resource_already_exists_exception"));
        }
        other => panic!("expected IndexCreationError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_index_not_acknowledged() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/cars"))
        .respond_with(acknowledged(false))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let result = provider.delete_index("cars").await;
    assert!(matches!(
        result,
        Err(SearchIndexError::IndexDeletionError(_))
    ));
}

#[tokio::test]
async fn test_delete_missing_index_reports_false() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/cars"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "type": "index_not_found_exception" },
            "status": 404
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, SearchIndexClientConfig::default()).await;
    assert!(!client.delete_index().await);
}

#[tokio::test]
async fn test_delete_index_acknowledged() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/cars"))
        .respond_with(acknowledged(true))
        .mount(&server)
        .await;

    let client = client_for(&server, SearchIndexClientConfig::default()).await;
    assert!(client.delete_index().await);
}

#[tokio::test]
async fn test_index_exists_reads_status() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/cars"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/trucks"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    assert!(provider.index_exists("cars").await.unwrap());
    assert!(!provider.index_exists("trucks").await.unwrap());
    assert!(matches!(
        provider.index_exists("broken").await,
        Err(SearchIndexError::QueryError(_))
    ));
}

#[tokio::test]
async fn test_get_document() {
    let server = MockServer::start().await;
    let found = Uuid::new_v4();
    let missing = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/cars/_doc/{}", found)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_index": "cars",
            "_id": found.to_string(),
            "found": true,
            "_source": { "rendszam": "ABC-123", "tulajdonos": "KZ" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/cars/_doc/{}", missing)))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "_index": "cars",
            "_id": missing.to_string(),
            "found": false
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server);

    let hit = provider.get_document("cars", &found).await.unwrap().unwrap();
    assert_eq!(hit.id, found.to_string());
    assert_eq!(hit.field_str("tulajdonos"), Some("KZ"));

    assert!(provider.get_document("cars", &missing).await.unwrap().is_none());
}

#[tokio::test]
async fn test_index_document_under_explicit_id() {
    let server = MockServer::start().await;
    let document = VehicleDocument::new(
        "ABC-123",
        "KZ",
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        vec!["data1".to_string()],
    );
    let id = document.document_id();

    Mock::given(path(format!("/cars/_doc/{}", id)))
        .and(body_json(json!({
            "rendszam": "ABC-123",
            "tulajdonos": "KZ",
            "forgalmi_ervenyes": "2024-01-01",
            "adatok": ["data1"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "_index": "cars",
            "_id": id.to_string(),
            "_version": 1,
            "result": "created"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let indexed = provider.index_document("cars", &id, &document).await.unwrap();
    assert_eq!(indexed.index, "cars");
    assert_eq!(indexed.id, id.to_string());
    assert_eq!(indexed.result, "created");
}

#[tokio::test]
async fn test_search_without_matches() {
    let server = MockServer::start().await;
    Mock::given(path("/cars/_search"))
        .and(body_partial_json(json!({
            "query": { "bool": { "minimum_should_match": 1 } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "took": 4,
            "timed_out": false,
            "hits": {
                "total": { "value": 0, "relation": "eq" },
                "max_score": null,
                "hits": []
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let response = provider
        .search("cars", &SearchQuery::regex("NOPE.*"))
        .await
        .unwrap();
    assert!(response.is_empty());
    assert_eq!(response.total, 0);
    assert_eq!(response.took_ms, 4);
}

#[tokio::test]
async fn test_search_rejected() {
    let server = MockServer::start().await;
    Mock::given(path("/cars/_search"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid regex"))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let result = provider.search("cars", &SearchQuery::regex("[")).await;
    assert!(matches!(result, Err(SearchIndexError::QueryError(_))));
}

#[tokio::test]
async fn test_get_all_documents_follows_scroll_and_clears_it() {
    let server = MockServer::start().await;

    Mock::given(path("/cars/_search"))
        .and(query_param("scroll", "1m"))
        .and(query_param("size", "2"))
        .and(body_partial_json(json!({ "query": { "match_all": {} } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_scroll_id": "c1",
            "took": 1,
            "hits": {
                "total": { "value": 3, "relation": "eq" },
                "hits": [
                    { "_id": "a", "_source": { "rendszam": "A" } },
                    { "_id": "b", "_source": { "rendszam": "B" } }
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/_search/scroll"))
        .and(body_partial_json(json!({ "scroll": "1m", "scroll_id": "c1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_scroll_id": "c2",
            "took": 1,
            "hits": { "hits": [{ "_id": "c", "_source": { "rendszam": "C" } }] }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/_search/scroll"))
        .and(body_partial_json(json!({ "scroll_id": "c2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_scroll_id": "c2",
            "took": 1,
            "hits": { "hits": [] }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/_search/scroll"))
        .and(body_json(json!({ "scroll_id": ["c2"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "succeeded": true,
            "num_freed": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = SearchIndexClientConfig::default().with_scroll_page_size(2);
    let client = client_for(&server, config).await;

    let ids: Vec<String> = client
        .get_all_documents()
        .unwrap()
        .map_ok(|hit| hit.id)
        .try_collect()
        .await
        .unwrap();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_clear_scroll_status() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/_search/scroll"))
        .and(body_json(json!({ "scroll_id": ["expired"] })))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "succeeded": true,
            "num_freed": 0
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/_search/scroll"))
        .and(body_json(json!({ "scroll_id": ["broken"] })))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    assert!(provider.clear_scroll("expired").await.is_ok());
    assert!(matches!(
        provider.clear_scroll("broken").await,
        Err(SearchIndexError::QueryError(_))
    ));
}

#[tokio::test]
async fn test_ping_failure_leaves_client_uninitialized() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = SearchIndexClient::new(Arc::new(provider_for(&server)));
    let result = client.init("cars").await;
    assert!(matches!(result, Err(SearchIndexError::ConnectionError(_))));
    assert!(!client.is_initialized());
}
