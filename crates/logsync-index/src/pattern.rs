//! Compiled token and skip patterns
//!
//! Both regexes are validated once when configuration is loaded. After that
//! matching yields a typed [`TokenMatch`] or nothing.

use crate::{Error, Result};
use logsync_fs::{NormalizedPath, PathStyle};
use regex::Regex;
use std::sync::LazyLock;

/// Default token regex for Windows-style reference files.
pub const WINDOWS_DEFAULT_PATTERN: &str = r"^([A-Za-z]:[/\\].*?):(\d+)$";

/// Default token regex for POSIX-style reference files.
pub const POSIX_DEFAULT_PATTERN: &str = r"^([/\\].*?):(\d+)$";

/// Default skip regex: any line starting with whitespace.
pub const DEFAULT_SKIP_PATTERN: &str = r"^\s";

static WINDOWS_DEFAULT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(WINDOWS_DEFAULT_PATTERN).expect("Invalid windows token regex"));

static POSIX_DEFAULT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(POSIX_DEFAULT_PATTERN).expect("Invalid posix token regex"));

static SKIP_DEFAULT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_SKIP_PATTERN).expect("Invalid skip regex"));

/// A `path:line` token captured from one reference-file line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMatch {
    /// Captured path, as written in the log.
    pub path: String,
    /// Captured 1-based source line.
    pub line: u32,
}

impl TokenMatch {
    /// The captured path as an index key, `None` if the capture was empty.
    pub fn normalized_path(&self, style: PathStyle) -> Option<NormalizedPath> {
        NormalizedPath::normalize(&self.path, style)
    }

    /// Zero-based editor line for the captured source line.
    pub fn editor_line(&self) -> usize {
        self.line.saturating_sub(1) as usize
    }
}

/// Regex with exactly two capture groups: the source path and the line number.
#[derive(Debug, Clone)]
pub struct TokenPattern {
    regex: Regex,
}

impl TokenPattern {
    /// Compile and validate a token regex.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if the regex does not compile and
    /// [`Error::CaptureGroups`] if it does not have exactly two groups.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| Error::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        let found = regex.captures_len() - 1;
        if found != 2 {
            return Err(Error::CaptureGroups {
                pattern: pattern.to_string(),
                found,
            });
        }

        Ok(Self { regex })
    }

    /// The built-in pattern for a platform style.
    pub fn platform_default(style: PathStyle) -> Self {
        let regex = match style.resolve() {
            PathStyle::Windows => WINDOWS_DEFAULT.clone(),
            _ => POSIX_DEFAULT.clone(),
        };
        Self { regex }
    }

    /// Compile `pattern`, or fall back to the platform default when it is blank.
    pub fn or_default(pattern: Option<&str>, style: PathStyle) -> Result<Self> {
        match pattern.map(str::trim) {
            Some(p) if !p.is_empty() => Self::new(p),
            _ => Ok(Self::platform_default(style)),
        }
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Match one reference-file line.
    ///
    /// Both groups must participate and the line group must parse as an
    /// unsigned integer; anything else is not a token.
    pub fn match_line(&self, line: &str) -> Option<TokenMatch> {
        let caps = self.regex.captures(line)?;
        let path = caps.get(1)?.as_str();
        let line = caps.get(2)?.as_str().trim().parse().ok()?;
        Some(TokenMatch {
            path: path.to_string(),
            line,
        })
    }
}

/// Lines matching this regex are invisible to extraction and scanning.
#[derive(Debug, Clone)]
pub struct SkipPattern {
    regex: Regex,
}

impl SkipPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| Error::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { regex })
    }

    /// Compile `pattern`, or fall back to [`DEFAULT_SKIP_PATTERN`] when blank.
    pub fn or_default(pattern: Option<&str>) -> Result<Self> {
        match pattern {
            Some(p) if !p.trim().is_empty() => Self::new(p),
            _ => Ok(Self::default()),
        }
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }
}

impl Default for SkipPattern {
    fn default() -> Self {
        Self {
            regex: SKIP_DEFAULT.clone(),
        }
    }
}
