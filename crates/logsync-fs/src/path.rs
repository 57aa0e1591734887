//! Normalized path handling for index keys
//!
//! Paths reach the index from two directions: captured out of log text and
//! reported by the editor for an open document. Both go through
//! [`NormalizedPath`] so they compare equal regardless of separator style or
//! drive-letter casing.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How strictly a path is canonicalized beyond separator conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    /// Follow the platform this process runs on.
    #[default]
    Native,
    /// Upper-case a leading single-letter drive prefix (`c:/` becomes `C:/`).
    Windows,
    /// Separator conversion only.
    Posix,
}

impl PathStyle {
    /// Resolve [`PathStyle::Native`] to the concrete style of this platform.
    pub fn resolve(self) -> Self {
        match self {
            PathStyle::Native if cfg!(windows) => PathStyle::Windows,
            PathStyle::Native => PathStyle::Posix,
            other => other,
        }
    }

    /// Whether drive letters are upper-cased under this style.
    pub fn uppercases_drive(self) -> bool {
        self.resolve() == PathStyle::Windows
    }
}

impl FromStr for PathStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "native" | "" => Ok(PathStyle::Native),
            "windows" | "win" => Ok(PathStyle::Windows),
            "posix" | "unix" => Ok(PathStyle::Posix),
            other => Err(format!("unknown path style: {other}")),
        }
    }
}

/// A path normalized to use forward slashes internally.
///
/// Under [`PathStyle::Windows`] a leading drive letter is also upper-cased,
/// so `c:\src\a.c` and `C:/src/a.c` produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes for internal storage.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: path_str.replace('\\', "/"),
        }
    }

    /// Create a NormalizedPath applying the drive-letter rule of `style`.
    pub fn with_style(path: impl AsRef<Path>, style: PathStyle) -> Self {
        let mut normalized = Self::new(path);
        if style.uppercases_drive() && normalized.has_drive_prefix() {
            normalized.inner[..1].make_ascii_uppercase();
        }
        normalized
    }

    /// Normalize a raw path string, returning `None` for empty input.
    pub fn normalize(raw: &str, style: PathStyle) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        Some(Self::with_style(raw, style))
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    /// Whether the path starts with a single-letter drive (`c:` or `c:/...`).
    pub fn has_drive_prefix(&self) -> bool {
        let bytes = self.inner.as_bytes();
        bytes.len() >= 2
            && bytes[0].is_ascii_alphabetic()
            && bytes[1] == b':'
            && (bytes.len() == 2 || bytes[2] == b'/')
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_style_resolves_to_concrete_style() {
        let resolved = PathStyle::Native.resolve();
        assert_ne!(resolved, PathStyle::Native);
        assert_eq!(PathStyle::Posix.resolve(), PathStyle::Posix);
    }

    #[test]
    fn drive_prefix_requires_single_letter() {
        assert!(NormalizedPath::new("c:/x").has_drive_prefix());
        assert!(NormalizedPath::new("c:").has_drive_prefix());
        assert!(!NormalizedPath::new("cc:/x").has_drive_prefix());
        assert!(!NormalizedPath::new("c:x").has_drive_prefix());
        assert!(!NormalizedPath::new("/c:/x").has_drive_prefix());
    }

    #[test]
    fn path_style_parses_from_config_strings() {
        assert_eq!("Windows".parse::<PathStyle>().unwrap(), PathStyle::Windows);
        assert_eq!("posix".parse::<PathStyle>().unwrap(), PathStyle::Posix);
        assert!("vms".parse::<PathStyle>().is_err());
    }
}
