//! Access trait for the remote document index.

use crate::domain::entities::Collection;
use crate::error::AppError;
use async_trait::async_trait;

/// Interface to the document-indexing service consumed by the reconciler.
///
/// All operations are scoped to the single configured project.
///
/// # Implementations
///
/// - [`crate::infrastructure::discovery::DiscoveryClient`] - Watson Discovery v2 REST client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentIndex: Send + Sync {
    /// Enumerates the collections of the configured project.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Authentication`] if the service rejects the
    /// credentials, [`AppError::ProjectNotFound`] if the project does not
    /// exist, and [`AppError::Transient`] on other request failures.
    async fn list_collections(&self) -> Result<Vec<Collection>, AppError>;

    /// Finds identifiers of documents in a collection whose URL metadata
    /// field exactly equals `url`.
    ///
    /// Follows pagination internally; the returned vec is the complete match
    /// set for the collection.
    ///
    /// # Errors
    ///
    /// Same classification as [`Self::list_collections`].
    async fn find_documents_by_url(
        &self,
        collection_id: &str,
        url: &str,
    ) -> Result<Vec<String>, AppError>;

    /// Deletes a single document by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Transient`] if the delete fails or the service
    /// reports an unexpected status, [`AppError::Authentication`] if the
    /// credentials are rejected.
    async fn delete_document(
        &self,
        collection_id: &str,
        document_id: &str,
    ) -> Result<(), AppError>;
}
