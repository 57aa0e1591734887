//! Index entries and per-file line maps

use serde::Serialize;
use std::collections::BTreeMap;

/// Where a `(path, line)` token sits in the reference file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocationEntry {
    /// Zero-based reference-file line holding the token.
    pub log_line: usize,
    /// Number of reference-file lines, starting at `log_line`, that belong
    /// to this token. Always at least 1.
    pub span: usize,
}

impl LocationEntry {
    /// One past the last reference-file line covered by this entry.
    pub fn end_line(&self) -> usize {
        self.log_line + self.span
    }
}

/// Source line (1-based) to entry map for a single source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FileIndex {
    lines: BTreeMap<u32, LocationEntry>,
}

impl FileIndex {
    pub(crate) fn from_map(lines: BTreeMap<u32, LocationEntry>) -> Self {
        Self { lines }
    }

    /// Entry for a 1-based source line.
    pub fn get(&self, line: u32) -> Option<&LocationEntry> {
        self.lines.get(&line)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Entries in ascending source-line order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &LocationEntry)> {
        self.lines.iter().map(|(line, entry)| (*line, entry))
    }
}
