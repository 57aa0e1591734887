//! Error types for logsync-index

/// Result type for logsync-index operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors in token and skip patterns
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid regex {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Path regex {pattern:?} must have exactly two capture groups (path, line), found {found}")]
    CaptureGroups { pattern: String, found: usize },
}
