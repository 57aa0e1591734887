//! Error types for logsync-core

use crate::host::HostError;
use std::path::PathBuf;

/// Result type for logsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in logsync-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Settings could not be turned into a usable configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A setting references `$workspaceRoot` but no workspace is open
    #[error("Setting {setting} uses $workspaceRoot but no workspace folder is open")]
    UnresolvedWorkspace { setting: String },

    /// Reference file or a referenced source file is missing
    #[error("File not found: {path}")]
    NotFound { path: PathBuf },

    /// The editor could not open or show a file
    #[error("Cannot open {path}: {message}")]
    Navigation { path: PathBuf, message: String },

    /// A highlight would run past the end of the document
    #[error("Cannot highlight {count} line(s) from line {line}: document has {available} line(s)")]
    Highlight {
        line: usize,
        count: usize,
        available: usize,
    },

    /// Error reported by the editor host
    #[error(transparent)]
    Host(#[from] HostError),

    /// Error from logsync-index
    #[error(transparent)]
    Index(#[from] logsync_index::Error),

    /// Filesystem error from logsync-fs
    #[error(transparent)]
    Fs(#[from] logsync_fs::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error disables synchronization until settings are reloaded.
    pub fn is_configuration(&self) -> bool {
        match self {
            Error::Configuration { .. }
            | Error::UnresolvedWorkspace { .. }
            | Error::Index(_)
            | Error::TomlDe(_) => true,
            _ => false,
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
