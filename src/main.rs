//! CLI entry point: load the URL list, reconcile, report.
//!
//! # Usage
//!
//! ```bash
//! # Default file (urls_to_delete.txt in the working directory)
//! cargo run
//!
//! # Explicit file
//! cargo run -- my-urls.txt
//! ```
//!
//! Exit status is non-zero when configuration or authentication failed, or
//! when any URL in the batch recorded an error.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use colored::*;
use tracing_subscriber::EnvFilter;

use discovery_reconciler::application::services::ReconcileService;
use discovery_reconciler::infrastructure::discovery::DiscoveryClient;
use discovery_reconciler::{config, input, report, AppError};

/// Delete documents matching a URL list from Watson Discovery collections.
#[derive(Parser)]
#[command(name = "discovery-reconciler")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the URL list file (one URL per line, `#` comments and blank
    /// lines ignored)
    #[arg(default_value = input::DEFAULT_URL_FILE)]
    url_file: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(clean) => {
            if clean {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("{} {e}", "ERROR:".red().bold());
            if let Some(hint) = e.remediation() {
                eprintln!("  hint: {hint}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Runs the batch. Returns `Ok(true)` when no errors were recorded.
async fn run(cli: Cli) -> Result<bool, AppError> {
    let config = config::load_from_env()?;
    config.print_summary();

    let urls = input::load_urls(&cli.url_file)?;
    if urls.is_empty() {
        tracing::info!("no URLs found in input file, nothing to do");
        return Ok(true);
    }
    tracing::info!("loaded {} URL(s) to delete", urls.len());

    let client = Arc::new(DiscoveryClient::new(&config)?);
    let service = ReconcileService::new(client);

    let outcome = service.reconcile(&urls).await?;
    report::print_summary(&outcome);

    Ok(outcome.errors.is_empty())
}
