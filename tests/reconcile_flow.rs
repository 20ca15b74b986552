//! End-to-end reconciliation tests: real client and service against a mock
//! HTTP server.
//!
//! Run with: cargo test --test reconcile_flow

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use discovery_reconciler::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROJECT: &str = "proj-1";
const URL_A: &str = "https://example.com/a";
const URL_B: &str = "https://example.com/b";

fn create_service(mock_server_uri: &str) -> ReconcileService<DiscoveryClient> {
    let config = Config {
        api_key: "test-key".to_string(),
        endpoint: mock_server_uri.to_string(),
        project_id: PROJECT.to_string(),
        version: "2023-03-31".to_string(),
        url_field: "metadata.source.url".to_string(),
        timeout_seconds: 5,
    };
    ReconcileService::new(Arc::new(DiscoveryClient::new(&config).unwrap()))
}

fn filter_for(url: &str) -> String {
    format!("metadata.source.url::\"{url}\"")
}

async fn mount_collections(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("/v2/projects/{PROJECT}/collections")))
        .and(query_param("version", "2023-03-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collections": [
                {"collection_id": "col-x", "name": "X"},
                {"collection_id": "col-y", "name": "Y"}
            ]
        })))
        .mount(mock_server)
        .await;
}

async fn mount_query(
    mock_server: &MockServer,
    collection_id: &str,
    url: &str,
    doc_ids: &[&str],
) {
    let results: Vec<_> = doc_ids
        .iter()
        .map(|id| json!({"document_id": id}))
        .collect();

    Mock::given(method("POST"))
        .and(path(format!("/v2/projects/{PROJECT}/query")))
        .and(body_partial_json(json!({
            "collection_ids": [collection_id],
            "filter": filter_for(url)
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": results})))
        .mount(mock_server)
        .await;
}

async fn mount_delete(mock_server: &MockServer, collection_id: &str, doc_id: &str) {
    Mock::given(method("DELETE"))
        .and(path(format!(
            "/v2/projects/{PROJECT}/collections/{collection_id}/documents/{doc_id}"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "document_id": doc_id,
            "status": "deleted"
        })))
        .expect(1)
        .mount(mock_server)
        .await;
}

/// URL A exists in collection X (1 document) and collection Y (2 documents);
/// URL B exists nowhere. Expected: processed=2, deleted=3, not_found=1,
/// errors=0.
#[tokio::test]
async fn test_batch_deletes_matches_and_counts_missing_urls() {
    let mock_server = MockServer::start().await;

    mount_collections(&mock_server).await;
    mount_query(&mock_server, "col-x", URL_A, &["doc-1"]).await;
    mount_query(&mock_server, "col-y", URL_A, &["doc-2", "doc-3"]).await;
    mount_query(&mock_server, "col-x", URL_B, &[]).await;
    mount_query(&mock_server, "col-y", URL_B, &[]).await;
    mount_delete(&mock_server, "col-x", "doc-1").await;
    mount_delete(&mock_server, "col-y", "doc-2").await;
    mount_delete(&mock_server, "col-y", "doc-3").await;

    let service = create_service(&mock_server.uri());
    let outcome = service
        .reconcile(&[URL_A.to_string(), URL_B.to_string()])
        .await
        .unwrap();

    assert_eq!(outcome.processed, 2);
    assert_eq!(outcome.deleted, 3);
    assert_eq!(outcome.not_found, 1);
    assert!(outcome.errors.is_empty());
}

/// A failed delete is recorded but does not stop the rest of the batch.
#[tokio::test]
async fn test_failed_delete_is_recorded_and_batch_continues() {
    let mock_server = MockServer::start().await;

    mount_collections(&mock_server).await;
    mount_query(&mock_server, "col-x", URL_A, &["doc-1"]).await;
    mount_query(&mock_server, "col-y", URL_A, &[]).await;
    mount_query(&mock_server, "col-x", URL_B, &["doc-2"]).await;
    mount_query(&mock_server, "col-y", URL_B, &[]).await;

    Mock::given(method("DELETE"))
        .and(path(format!(
            "/v2/projects/{PROJECT}/collections/col-x/documents/doc-1"
        )))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_delete(&mock_server, "col-x", "doc-2").await;

    let service = create_service(&mock_server.uri());
    let outcome = service
        .reconcile(&[URL_A.to_string(), URL_B.to_string()])
        .await
        .unwrap();

    assert_eq!(outcome.processed, 2);
    assert_eq!(outcome.deleted, 1);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].url, URL_A);
    assert_eq!(outcome.errors[0].document_id.as_deref(), Some("doc-1"));
}

/// Rejected credentials abort the run before any further query or delete.
#[tokio::test]
async fn test_authentication_failure_aborts_the_run() {
    let mock_server = MockServer::start().await;

    mount_collections(&mock_server).await;

    Mock::given(method("POST"))
        .and(path(format!("/v2/projects/{PROJECT}/query")))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "API key expired"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    // No delete may ever be issued.
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = create_service(&mock_server.uri());
    let result = service
        .reconcile(&[URL_A.to_string(), URL_B.to_string()])
        .await;

    assert!(matches!(result, Err(AppError::Authentication(_))));
}
