//! Role and line-tracking snapshot
//!
//! A cycle clones the snapshot, works on its copy across suspension points,
//! and writes it back whole. Fields are never patched in place.

use crate::host::ViewId;
use logsync_fs::NormalizedPath;
use logsync_index::FileIndex;
use std::sync::Arc;

/// The tracked source file.
#[derive(Debug, Clone)]
pub struct AssistantRole {
    pub view: ViewId,
    pub path: NormalizedPath,
    /// Index entries for `path`.
    pub file: Arc<FileIndex>,
}

#[derive(Debug, Clone, Default)]
pub struct SyncSnapshot {
    /// View showing the reference file.
    pub master: Option<ViewId>,
    pub assistant: Option<AssistantRole>,
    /// Master cursor line at the last completed cycle.
    pub master_previous_line: Option<usize>,
    /// Assistant cursor line at the last completed cycle.
    pub assistant_previous_line: Option<usize>,
    pub master_highlighted: bool,
    pub assistant_highlighted: bool,
}

impl SyncSnapshot {
    pub fn assistant_view(&self) -> Option<ViewId> {
        self.assistant.as_ref().map(|a| a.view)
    }

    /// Whether `view` currently holds either role.
    pub fn holds_role(&self, view: ViewId) -> bool {
        self.master == Some(view) || self.assistant_view() == Some(view)
    }

    pub(crate) fn adopt_assistant(&mut self, role: AssistantRole) {
        self.assistant = Some(role);
        self.assistant_previous_line = None;
    }

    pub(crate) fn adopt_master(&mut self, view: ViewId) {
        self.master = Some(view);
        self.master_previous_line = None;
    }
}
