//! URL list loading.
//!
//! One URL per line; blank lines and `#` comments are ignored, surrounding
//! whitespace is trimmed. Input order is preserved.

use crate::error::AppError;
use std::fs;
use std::path::Path;

/// Default URL file looked up in the working directory when no path is given.
pub const DEFAULT_URL_FILE: &str = "urls_to_delete.txt";

/// Loads the ordered URL list from a text file.
///
/// A file with no usable lines yields an empty vec, not an error.
///
/// # Errors
///
/// Returns [`AppError::FileNotFound`] if the path does not exist, or
/// [`AppError::Configuration`] if the file cannot be read.
pub fn load_urls(path: &Path) -> Result<Vec<String>, AppError> {
    if !path.exists() {
        return Err(AppError::FileNotFound(path.to_path_buf()));
    }

    let text = fs::read_to_string(path).map_err(|e| {
        AppError::Configuration(format!("failed to read {}: {e}", path.display()))
    })?;

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
