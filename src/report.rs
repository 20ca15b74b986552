//! Human-readable run summary.
//!
//! Terminal output in the same style as the rest of the CLI: plain counters,
//! color only where it draws the eye to a problem.

use crate::application::services::{ReconcileError, ReconcileOutcome};
use colored::*;

/// Prints the final summary to stdout.
pub fn print_summary(outcome: &ReconcileOutcome) {
    println!();
    println!("{}", "--- Summary ---".bold());
    println!("URLs processed:    {}", outcome.processed);
    println!(
        "Documents deleted: {}",
        outcome.deleted.to_string().green()
    );

    if outcome.not_found > 0 {
        println!(
            "URLs not found:    {}",
            outcome.not_found.to_string().yellow()
        );
    } else {
        println!("URLs not found:    0");
    }

    if !outcome.errors.is_empty() {
        println!(
            "Errors:            {}",
            outcome.errors.len().to_string().red()
        );
        for error in &outcome.errors {
            println!("  {}", format_error_line(error));
        }
    } else {
        println!("Errors:            0");
    }
}

/// Formats one error entry: URL, collection, optional document id, message.
fn format_error_line(error: &ReconcileError) -> String {
    match &error.document_id {
        Some(doc_id) => format!(
            "{} | doc {} in '{}': {}",
            error.url, doc_id, error.collection, error.message
        ),
        None => format!("{} | '{}': {}", error.url, error.collection, error.message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_line_with_document() {
        let error = ReconcileError {
            url: "https://example.com/a".to_string(),
            collection: "News".to_string(),
            document_id: Some("doc-1".to_string()),
            message: "service error: 503".to_string(),
        };
        assert_eq!(
            format_error_line(&error),
            "https://example.com/a | doc doc-1 in 'News': service error: 503"
        );
    }

    #[test]
    fn test_format_error_line_without_document() {
        let error = ReconcileError {
            url: "https://example.com/a".to_string(),
            collection: "News".to_string(),
            document_id: None,
            message: "request failed: timeout".to_string(),
        };
        assert_eq!(
            format_error_line(&error),
            "https://example.com/a | 'News': request failed: timeout"
        );
    }
}
