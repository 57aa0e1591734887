//! [`Workspace`]: a temporary directory with a reference file on disk.

use logsync_core::Settings;
use logsync_fs::PathStyle;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Name of the reference file written by [`Workspace::with_reference`].
pub const REFERENCE_NAME: &str = "trace.log";

/// A temporary workspace root.
///
/// # Example
///
/// ```rust
/// use logsync_test_utils::Workspace;
///
/// let ws = Workspace::with_reference("/src/a.c:1\nmov eax, 1\n");
/// assert!(ws.reference_path().exists());
/// ```
pub struct Workspace {
    temp_dir: TempDir,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    /// Create an empty workspace.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Create a workspace whose reference file holds `text`.
    pub fn with_reference(text: &str) -> Self {
        let ws = Self::new();
        ws.write(REFERENCE_NAME, text);
        ws
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn reference_path(&self) -> PathBuf {
        self.root().join(REFERENCE_NAME)
    }

    /// The reference path as a string, as it would appear in settings.
    pub fn reference_str(&self) -> String {
        self.reference_path().to_string_lossy().into_owned()
    }

    /// Write `text` to `relative` under the root, creating parents.
    pub fn write(&self, relative: &str, text: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, text).unwrap();
        path
    }

    /// Posix-style settings pointing at the reference file.
    pub fn settings(&self) -> Settings {
        Settings {
            path_style: PathStyle::Posix,
            ..Settings::for_reference(self.reference_str())
        }
    }
}
