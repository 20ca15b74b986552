//! # Discovery URL Reconciler
//!
//! One-shot batch tool that deletes documents from Watson Discovery
//! collections by source URL. Reads a URL list, queries every collection of
//! the configured project for documents whose URL metadata field matches,
//! deletes the matches, and prints an aggregate summary.
//!
//! ## Architecture
//!
//! The crate is a plain function composition (load → reconcile → report)
//! with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities and the [`domain::repositories::DocumentIndex`] trait
//! - **Application Layer** ([`application`]) - The reconciliation loop and its counters
//! - **Infrastructure Layer** ([`infrastructure`]) - Watson Discovery v2 REST client
//!
//! ## Quick Start
//!
//! ```bash
//! export DISCOVERY_API_KEY="..."
//! export DISCOVERY_URL="https://api.us-south.discovery.watson.cloud.ibm.com/instances/..."
//! export DISCOVERY_PROJECT_ID="..."
//!
//! # Delete everything listed in urls_to_delete.txt
//! cargo run -- urls_to_delete.txt
//! ```
//!
//! ## Configuration
//!
//! Loaded from environment variables (or a `.env` file) via
//! [`config::Config`]. See the [`config`] module for available options.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod input;
pub mod report;

pub use error::AppError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for integration
/// tests.
pub mod prelude {
    pub use crate::application::services::{ReconcileOutcome, ReconcileService};
    pub use crate::config::Config;
    pub use crate::domain::entities::Collection;
    pub use crate::domain::repositories::DocumentIndex;
    pub use crate::error::AppError;
    pub use crate::infrastructure::discovery::DiscoveryClient;
}
