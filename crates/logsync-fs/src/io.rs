//! Text reading for reference and source files

use crate::{Error, NormalizedPath, Result};
use std::fs;

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    if path.as_str().is_empty() {
        return Err(Error::EmptyPath);
    }
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Read text content from a file without blocking the current task.
///
/// Reference files can be large build logs, so callers running inside the
/// editor event loop should prefer this over [`read_text`].
pub async fn read_text_async(path: &NormalizedPath) -> Result<String> {
    if path.as_str().is_empty() {
        return Err(Error::EmptyPath);
    }
    let native_path = path.to_native();
    tracing::debug!(path = %path, "Reading text file");
    tokio::fs::read_to_string(&native_path)
        .await
        .map_err(|e| Error::io(&native_path, e))
}
