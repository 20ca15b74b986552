//! URL-deletion reconciliation.
//!
//! For every URL in the batch, finds and deletes all matching documents
//! across every collection of the project, accumulating counters as it goes.

use std::sync::Arc;

use crate::domain::repositories::DocumentIndex;
use crate::error::AppError;

/// Aggregate counters for one reconciliation run.
///
/// Reset per invocation; nothing persists across runs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// URLs the batch loop visited.
    pub processed: usize,
    /// Documents successfully deleted.
    pub deleted: usize,
    /// URLs that matched zero documents across all collections.
    pub not_found: usize,
    /// Non-fatal failures, recorded per URL.
    pub errors: Vec<ReconcileError>,
}

/// A recorded non-fatal failure, with enough detail for an operator to
/// diagnose it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileError {
    pub url: String,
    /// Display name of the collection the failure occurred in.
    pub collection: String,
    /// Set when the failure was a specific document delete; `None` for
    /// query failures.
    pub document_id: Option<String>,
    pub message: String,
}

/// Service driving the lookup-then-delete loop over a [`DocumentIndex`].
///
/// Failure semantics: fatal errors (authentication, missing project)
/// short-circuit the run via `Err`; transient query or delete failures are
/// recorded in the outcome and processing continues with the next item, so
/// one bad URL never prevents the rest of the batch from being attempted.
pub struct ReconcileService<D: DocumentIndex> {
    index: Arc<D>,
}

impl<D: DocumentIndex> ReconcileService<D> {
    /// Creates a new reconcile service.
    pub fn new(index: Arc<D>) -> Self {
        Self { index }
    }

    /// Runs the batch: for each URL, delete every matching document in every
    /// collection of the project.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] if the project has no collections,
    /// and propagates any fatal error from the underlying index. Transient
    /// failures do not produce an `Err`; they are recorded in the outcome.
    pub async fn reconcile(&self, urls: &[String]) -> Result<ReconcileOutcome, AppError> {
        let collections = self.index.list_collections().await?;
        if collections.is_empty() {
            return Err(AppError::Configuration(
                "no collections found in the project".to_string(),
            ));
        }

        tracing::info!("found {} collection(s)", collections.len());
        for collection in &collections {
            tracing::debug!("  - {} ({})", collection.name, collection.id);
        }

        let mut outcome = ReconcileOutcome::default();

        for url in urls {
            outcome.processed += 1;
            tracing::info!(%url, "processing");

            let mut found_any = false;

            for collection in &collections {
                let doc_ids = match self.index.find_documents_by_url(&collection.id, url).await {
                    Ok(ids) => ids,
                    Err(e) if e.is_fatal() => return Err(e),
                    Err(e) => {
                        tracing::warn!(%url, collection = %collection.name, error = %e, "query failed");
                        outcome.errors.push(ReconcileError {
                            url: url.clone(),
                            collection: collection.name.clone(),
                            document_id: None,
                            message: e.to_string(),
                        });
                        continue;
                    }
                };

                if doc_ids.is_empty() {
                    continue;
                }
                found_any = true;

                for doc_id in doc_ids {
                    match self.index.delete_document(&collection.id, &doc_id).await {
                        Ok(()) => {
                            tracing::info!(%url, collection = %collection.name, %doc_id, "deleted");
                            outcome.deleted += 1;
                        }
                        Err(e) if e.is_fatal() => return Err(e),
                        Err(e) => {
                            tracing::warn!(%url, collection = %collection.name, %doc_id, error = %e, "delete failed");
                            outcome.errors.push(ReconcileError {
                                url: url.clone(),
                                collection: collection.name.clone(),
                                document_id: Some(doc_id),
                                message: e.to_string(),
                            });
                        }
                    }
                }
            }

            if !found_any {
                tracing::info!(%url, "not found in any collection");
                outcome.not_found += 1;
            }
        }

        Ok(outcome)
    }
}
