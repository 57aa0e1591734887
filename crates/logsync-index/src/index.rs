//! Reference-file extraction
//!
//! The reference file is scanned from its last line to its first. Each token
//! line records how far down its block reaches: up to (not including) the
//! nearest non-skipped line below it. Because the scan runs upward, a token
//! that appears more than once keeps the entry of its topmost occurrence.

use crate::{FileIndex, LocationEntry, SkipPattern, TokenMatch, TokenPattern};
use logsync_fs::{NormalizedPath, PathStyle};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Normalized source path to per-line entries, built from one reference file.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct LocationIndex {
    files: BTreeMap<NormalizedPath, Arc<FileIndex>>,
}

impl LocationIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from reference-file text.
    pub fn extract(
        text: &str,
        pattern: &TokenPattern,
        skip: &SkipPattern,
        style: PathStyle,
    ) -> Self {
        let lines: Vec<&str> = text.lines().collect();
        let mut last_boundary = lines.len();
        let mut files: BTreeMap<NormalizedPath, BTreeMap<u32, LocationEntry>> = BTreeMap::new();

        for (i, line) in lines.iter().enumerate().rev() {
            if skip.is_match(line) {
                continue;
            }

            if let Some(token) = pattern.match_line(line)
                && let Some(path) = token.normalized_path(style)
            {
                files.entry(path).or_default().insert(
                    token.line,
                    LocationEntry {
                        log_line: i,
                        span: last_boundary - i,
                    },
                );
            }

            last_boundary = i;
        }

        let index = Self {
            files: files
                .into_iter()
                .map(|(path, lines)| (path, Arc::new(FileIndex::from_map(lines))))
                .collect(),
        };
        tracing::debug!(
            lines = lines.len(),
            files = index.files.len(),
            entries = index.len(),
            "Extracted location index"
        );
        index
    }

    /// Line map for one source file.
    pub fn file(&self, path: &NormalizedPath) -> Option<Arc<FileIndex>> {
        self.files.get(path).cloned()
    }

    /// Entry for a 1-based source line.
    pub fn lookup(&self, path: &NormalizedPath, line: u32) -> Option<LocationEntry> {
        self.files.get(path)?.get(line).copied()
    }

    /// Tracked source files in path order.
    pub fn files(&self) -> impl Iterator<Item = (&NormalizedPath, &FileIndex)> {
        self.files.iter().map(|(path, file)| (path, file.as_ref()))
    }

    /// Total number of entries across all files.
    pub fn len(&self) -> usize {
        self.files.values().map(|f| f.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }
}

/// Find the nearest token at or above `start`.
///
/// `line_at` supplies reference-file text by zero-based line; lines it cannot
/// supply are passed over. Skipped lines are never tested against `pattern`.
pub fn scan_upward<F, S>(
    start: usize,
    pattern: &TokenPattern,
    skip: &SkipPattern,
    mut line_at: F,
) -> Option<(usize, TokenMatch)>
where
    F: FnMut(usize) -> Option<S>,
    S: AsRef<str>,
{
    (0..=start).rev().find_map(|i| {
        let text = line_at(i)?;
        let text = text.as_ref();
        if skip.is_match(text) {
            return None;
        }
        pattern.match_line(text).map(|token| (i, token))
    })
}
