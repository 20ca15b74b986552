//! Watson Discovery v2 REST client.
//!
//! Implements [`DocumentIndex`] over the three endpoints the reconciler
//! needs: list collections, project query with a field-equality filter, and
//! document delete. Authentication is HTTP basic with the literal username
//! `apikey`, the documented REST equivalent of the SDK's IAM authenticator.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Config;
use crate::domain::entities::Collection;
use crate::domain::repositories::DocumentIndex;
use crate::error::AppError;

/// Query page size; matches the service maximum for `count`.
const PAGE_SIZE: usize = 100;

/// Placeholder display name for collections without a name.
const UNNAMED_COLLECTION: &str = "Unnamed";

/// The request being classified, for status-code mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    /// Collection listing or project query; a 404 here means the configured
    /// project does not exist.
    Project,
    /// Single-document delete; a 404 here means the document vanished
    /// mid-run, which is recorded, not fatal.
    Document,
}

#[derive(Debug, Deserialize)]
struct CollectionsResponse {
    #[serde(default)]
    collections: Vec<CollectionEntry>,
}

#[derive(Debug, Deserialize)]
struct CollectionEntry {
    collection_id: String,
    name: Option<String>,
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    collection_ids: Vec<&'a str>,
    filter: &'a str,
    #[serde(rename = "return")]
    return_fields: Vec<&'a str>,
    count: usize,
    offset: usize,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<QueryResult>,
}

#[derive(Debug, Deserialize)]
struct QueryResult {
    document_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeleteResponse {
    status: Option<String>,
}

/// Watson Discovery v2 client scoped to one project.
pub struct DiscoveryClient {
    http: reqwest::Client,
    /// Service endpoint without a trailing slash.
    base_url: String,
    api_key: String,
    project_id: String,
    version: String,
    url_field: String,
}

impl DiscoveryClient {
    /// Builds a client from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            project_id: config.project_id.clone(),
            version: config.version.clone(),
            url_field: config.url_field.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Maps a non-success response to the error taxonomy.
    async fn classify_failure(response: reqwest::Response, scope: Scope) -> AppError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let detail = match extract_error_message(&body) {
            Some(message) => format!("{status}: {message}"),
            None if body.is_empty() => status.to_string(),
            None => format!("{status}: {body}"),
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::Authentication(detail),
            StatusCode::NOT_FOUND if scope == Scope::Project => AppError::ProjectNotFound(detail),
            _ => AppError::Transient(detail),
        }
    }

    async fn check(response: reqwest::Response, scope: Scope) -> Result<reqwest::Response, AppError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::classify_failure(response, scope).await)
        }
    }

    /// Fetches one query page for a collection.
    async fn query_page(
        &self,
        collection_id: &str,
        filter: &str,
        offset: usize,
    ) -> Result<Vec<QueryResult>, AppError> {
        let request = QueryRequest {
            collection_ids: vec![collection_id],
            filter,
            return_fields: vec!["document_id", self.url_field.as_str()],
            count: PAGE_SIZE,
            offset,
        };

        let response = self
            .http
            .post(self.endpoint(&format!("/v2/projects/{}/query", self.project_id)))
            .basic_auth("apikey", Some(&self.api_key))
            .query(&[("version", self.version.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let response = Self::check(response, Scope::Project).await?;
        let body: QueryResponse = response.json().await.map_err(transport_error)?;
        Ok(body.results)
    }
}

#[async_trait]
impl DocumentIndex for DiscoveryClient {
    async fn list_collections(&self) -> Result<Vec<Collection>, AppError> {
        let response = self
            .http
            .get(self.endpoint(&format!("/v2/projects/{}/collections", self.project_id)))
            .basic_auth("apikey", Some(&self.api_key))
            .query(&[("version", self.version.as_str())])
            .send()
            .await
            .map_err(transport_error)?;

        let response = Self::check(response, Scope::Project).await?;
        let body: CollectionsResponse = response.json().await.map_err(transport_error)?;

        Ok(body
            .collections
            .into_iter()
            .map(|c| {
                Collection::new(
                    c.collection_id,
                    c.name.unwrap_or_else(|| UNNAMED_COLLECTION.to_string()),
                )
            })
            .collect())
    }

    async fn find_documents_by_url(
        &self,
        collection_id: &str,
        url: &str,
    ) -> Result<Vec<String>, AppError> {
        // DQL exact-match filter on the configured URL field.
        let filter = format!("{}::\"{}\"", self.url_field, escape_filter_value(url));

        let mut doc_ids = Vec::new();
        let mut offset = 0;

        loop {
            let results = self.query_page(collection_id, &filter, offset).await?;
            let page_len = results.len();
            if page_len == 0 {
                break;
            }

            doc_ids.extend(results.into_iter().filter_map(|r| r.document_id));

            if page_len < PAGE_SIZE {
                break;
            }
            offset += PAGE_SIZE;
        }

        Ok(doc_ids)
    }

    async fn delete_document(
        &self,
        collection_id: &str,
        document_id: &str,
    ) -> Result<(), AppError> {
        let response = self
            .http
            .delete(self.endpoint(&format!(
                "/v2/projects/{}/collections/{}/documents/{}",
                self.project_id, collection_id, document_id
            )))
            .basic_auth("apikey", Some(&self.api_key))
            .query(&[("version", self.version.as_str())])
            .send()
            .await
            .map_err(transport_error)?;

        let response = Self::check(response, Scope::Document).await?;
        let body: DeleteResponse = response.json().await.map_err(transport_error)?;

        match body.status.as_deref() {
            Some("deleted") => Ok(()),
            other => Err(AppError::Transient(format!(
                "unexpected delete status: {}",
                other.unwrap_or("<missing>")
            ))),
        }
    }
}

fn transport_error(e: reqwest::Error) -> AppError {
    AppError::Transient(format!("request failed: {e}"))
}

/// Escapes a value for embedding in a DQL double-quoted string.
fn escape_filter_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Pulls the human-readable message out of a Discovery error body.
///
/// The service reports either `{"errors": [{"message": ...}]}` or
/// `{"error": ...}` depending on the endpoint.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    if let Some(message) = value
        .get("errors")
        .and_then(|e| e.get(0))
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
    {
        return Some(message.to_string());
    }

    value
        .get("error")
        .and_then(|e| e.as_str())
        .map(str::to_string)
}
