//! Editor host seam
//!
//! The engine never talks to a concrete editor. Everything it needs (opening
//! documents, reading lines, moving selections, decorating ranges) goes
//! through [`EditorHost`], and the host feeds cursor movements back in as
//! [`SelectionEvent`]s.

use async_trait::async_trait;
use logsync_fs::NormalizedPath;
use std::path::PathBuf;

/// Opaque handle to an editor view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u64);

/// Opaque handle to an open document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u64);

/// A block of whole lines, `start` inclusive and `end` exclusive (zero-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    /// A single whole line.
    pub fn line(line: usize) -> Self {
        Self {
            start: line,
            end: line + 1,
        }
    }

    /// `count` consecutive lines starting at `start`.
    pub fn lines(start: usize, count: usize) -> Self {
        Self {
            start,
            end: start + count,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// How a view scrolls to bring a range into sight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealMode {
    #[default]
    Default,
    InCenter,
    InCenterIfOutsideViewport,
    AtTop,
}

/// Where a newly shown view is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewColumn {
    #[default]
    Active,
    Beside,
}

/// Options for [`EditorHost::show_view`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShowOptions {
    /// Line to select and reveal once shown.
    pub line: Option<usize>,
    pub column: ViewColumn,
    /// Preview views are replaced by the next opened document.
    pub preview: bool,
}

/// Decoration applied to highlighted lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecorationStyle {
    /// CSS color used as the line background.
    pub background_color: String,
    pub whole_line: bool,
}

impl DecorationStyle {
    pub fn background(color: impl Into<String>) -> Self {
        Self {
            background_color: color.into(),
            whole_line: true,
        }
    }
}

/// A cursor movement reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionEvent {
    pub view: ViewId,
    /// Zero-based line of the cursor after the movement.
    pub active_line: usize,
}

/// Errors reported by an editor host
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Document not found: {path}")]
    NotFound { path: PathBuf },

    #[error("View {view:?} is no longer open")]
    Closed { view: ViewId },

    #[error("Editor rejected the request: {message}")]
    Rejected { message: String },
}

/// Editor operations consumed by the engine.
///
/// Asynchronous methods are suspension points: while one is pending, the host
/// may deliver further selection events.
#[async_trait]
pub trait EditorHost: Send + Sync {
    /// Open a document from disk.
    async fn open_document(&self, path: &NormalizedPath) -> Result<DocumentId, HostError>;

    /// An already-open document for `path`, if any.
    fn find_open_document(&self, path: &NormalizedPath) -> Option<DocumentId>;

    /// An already-visible view showing `document`, if any.
    fn find_visible_view(&self, document: DocumentId) -> Option<ViewId>;

    /// Show `document` in a new view.
    async fn show_view(
        &self,
        document: DocumentId,
        options: ShowOptions,
    ) -> Result<ViewId, HostError>;

    /// The view that currently has focus.
    fn active_view(&self) -> Option<ViewId>;

    /// File path behind a view; `None` for views not backed by a file.
    fn view_path(&self, view: ViewId) -> Option<PathBuf>;

    /// Zero-based cursor line of a view.
    fn active_line(&self, view: ViewId) -> Option<usize>;

    fn line_count(&self, view: ViewId) -> Option<usize>;

    fn line_text(&self, view: ViewId, line: usize) -> Option<String>;

    /// Move the cursor of a view to the start of `line`.
    fn set_selection(&self, view: ViewId, line: usize) -> Result<(), HostError>;

    /// Scroll without moving the selection.
    fn reveal_range(&self, view: ViewId, range: LineRange, mode: RevealMode)
    -> Result<(), HostError>;

    /// Replace every decoration of `style` on the view with `ranges`.
    fn set_decorations(
        &self,
        view: ViewId,
        style: &DecorationStyle,
        ranges: &[LineRange],
    ) -> Result<(), HostError>;

    /// Show an error message to the user.
    fn show_error(&self, message: &str);

    /// Contents of a file that need not be open in the editor.
    ///
    /// Used to extract the reference file. Reads from disk unless the host
    /// serves files itself.
    async fn read_text(&self, path: &NormalizedPath) -> logsync_fs::Result<String> {
        logsync_fs::read_text_async(path).await
    }
}
