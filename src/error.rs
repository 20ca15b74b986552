//! Error taxonomy for the reconciliation run.
//!
//! Fatal variants abort the batch immediately; transient failures are
//! recorded per URL and surfaced in the final summary instead.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or invalid configuration, detected before any work begins.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The URL list file does not exist.
    #[error("URL file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The service rejected our credentials. Retrying will not help.
    #[error("authentication rejected by the Discovery service: {0}")]
    Authentication(String),

    /// The configured project (or a collection within it) does not exist.
    #[error("project or collection not found: {0}")]
    ProjectNotFound(String),

    /// A network or service failure scoped to a single query or delete.
    #[error("service error: {0}")]
    Transient(String),
}

impl AppError {
    /// Whether this error must abort the remaining batch.
    ///
    /// Everything except [`AppError::Transient`] is unrecoverable without
    /// operator intervention, so processing further URLs would only repeat
    /// the same failure.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Transient(_))
    }

    /// Remediation hint printed alongside fatal errors.
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            Self::Authentication(_) => {
                Some("verify DISCOVERY_API_KEY is valid and has not expired")
            }
            Self::ProjectNotFound(_) => {
                Some("verify DISCOVERY_PROJECT_ID and that DISCOVERY_URL points at the right instance")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_is_not_fatal() {
        assert!(!AppError::Transient("connection reset".into()).is_fatal());
    }

    #[test]
    fn test_fatal_classification() {
        assert!(AppError::Configuration("missing key".into()).is_fatal());
        assert!(AppError::FileNotFound(PathBuf::from("urls.txt")).is_fatal());
        assert!(AppError::Authentication("401".into()).is_fatal());
        assert!(AppError::ProjectNotFound("404".into()).is_fatal());
    }

    #[test]
    fn test_remediation_hints() {
        assert!(AppError::Authentication("401".into()).remediation().is_some());
        assert!(AppError::ProjectNotFound("404".into()).remediation().is_some());
        assert!(AppError::Transient("timeout".into()).remediation().is_none());
    }
}
