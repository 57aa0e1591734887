//! [`FakeHost`]: an in-memory [`EditorHost`] for engine tests.
//!
//! Files live in memory, keyed by their normalized path. Views are created
//! either by the test ([`FakeHost::open_view`]) or by the engine through
//! `show_view`. Every mutating call is recorded as a [`HostCall`].

use async_trait::async_trait;
use logsync_core::{
    DecorationStyle, DocumentId, EditorHost, HostError, LineRange, RevealMode, SelectionEvent,
    ShowOptions, ViewColumn, ViewId,
};
use logsync_fs::NormalizedPath;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Notify;

/// A recorded host call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    OpenDocument(NormalizedPath),
    ShowView {
        document: DocumentId,
        line: Option<usize>,
        column: ViewColumn,
    },
    SetSelection {
        view: ViewId,
        line: usize,
    },
    Reveal {
        view: ViewId,
        range: LineRange,
        mode: RevealMode,
    },
    SetDecorations {
        view: ViewId,
        ranges: Vec<LineRange>,
    },
}

struct Document {
    path: NormalizedPath,
    lines: Vec<String>,
}

struct View {
    document: Option<DocumentId>,
    active_line: usize,
    visible: bool,
    closed: bool,
}

#[derive(Default)]
struct State {
    files: BTreeMap<NormalizedPath, String>,
    documents: Vec<Document>,
    views: BTreeMap<ViewId, View>,
    next_view: u64,
    active: Option<ViewId>,
    decorations: BTreeMap<ViewId, Vec<LineRange>>,
    calls: Vec<HostCall>,
    errors: Vec<String>,
}

/// In-memory editor host.
///
/// # Example
///
/// ```rust
/// use logsync_test_utils::FakeHost;
///
/// let host = FakeHost::new();
/// host.add_file("/src/a.c", "int main() {}\n");
/// let view = host.open_view("/src/a.c");
/// let event = host.set_cursor(view, 0);
/// assert_eq!(event.view, view);
/// ```
#[derive(Default)]
pub struct FakeHost {
    state: Mutex<State>,
    open_gate: Mutex<Option<Arc<Notify>>>,
    read_gate: Mutex<Option<Arc<Notify>>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Make `path` available to `open_document`.
    pub fn add_file(&self, path: &str, text: &str) {
        self.state()
            .files
            .insert(NormalizedPath::new(path), text.to_string());
    }

    /// Open `path` in a new visible, focused view with the cursor on line 0.
    ///
    /// # Panics
    /// Panics if the file was never added.
    pub fn open_view(&self, path: &str) -> ViewId {
        let path = NormalizedPath::new(path);
        let mut state = self.state();
        let document = state
            .document_for(&path)
            .unwrap_or_else(|| panic!("FakeHost has no file {path}"));
        state.new_view(Some(document), 0)
    }

    /// Open a view that is not backed by a file.
    pub fn open_untitled(&self) -> ViewId {
        self.state().new_view(None, 0)
    }

    /// Move the cursor of `view` and return the event the editor would send.
    pub fn set_cursor(&self, view: ViewId, line: usize) -> SelectionEvent {
        let mut state = self.state();
        if let Some(v) = state.views.get_mut(&view) {
            v.active_line = line;
        }
        state.active = Some(view);
        SelectionEvent {
            view,
            active_line: line,
        }
    }

    /// Hide a view without closing it; it is no longer reused by navigation.
    pub fn hide_view(&self, view: ViewId) {
        if let Some(v) = self.state().views.get_mut(&view) {
            v.visible = false;
        }
    }

    /// Close a view; further calls on it fail with [`HostError::Closed`].
    pub fn close_view(&self, view: ViewId) {
        let mut state = self.state();
        if let Some(v) = state.views.get_mut(&view) {
            v.closed = true;
            v.visible = false;
        }
        if state.active == Some(view) {
            state.active = None;
        }
    }

    /// Hold every `open_document` call until the returned [`Notify`] fires.
    pub fn hold_opens(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.open_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    /// Hold every `read_text` call until the returned [`Notify`] fires.
    ///
    /// Reads themselves go to disk, where [`crate::Workspace`] keeps the
    /// reference file.
    pub fn hold_reads(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.read_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.state().calls.clone()
    }

    /// Number of recorded calls matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&HostCall) -> bool) -> usize {
        self.state().calls.iter().filter(|c| predicate(c)).count()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    /// Reveals in call order.
    pub fn reveals(&self) -> Vec<(ViewId, LineRange, RevealMode)> {
        self.state()
            .calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Reveal { view, range, mode } => Some((*view, *range, *mode)),
                _ => None,
            })
            .collect()
    }

    /// Currently highlighted lines of a view, as zero-based line numbers.
    pub fn highlighted_lines(&self, view: ViewId) -> Vec<usize> {
        self.state()
            .decorations
            .get(&view)
            .map(|ranges| ranges.iter().flat_map(|r| r.start..r.end).collect())
            .unwrap_or_default()
    }

    /// Messages passed to `show_error`.
    pub fn errors(&self) -> Vec<String> {
        self.state().errors.clone()
    }

    /// The view showing `path`, if one was opened.
    pub fn view_of(&self, path: &str) -> Option<ViewId> {
        let path = NormalizedPath::new(path);
        let state = self.state();
        state.views.iter().find_map(|(id, view)| {
            let document = view.document?;
            (!view.closed && state.documents[document.0 as usize].path == path).then_some(*id)
        })
    }

    pub fn cursor(&self, view: ViewId) -> Option<usize> {
        self.state().views.get(&view).map(|v| v.active_line)
    }

    fn live_view<'a>(state: &'a mut State, view: ViewId) -> Result<&'a mut View, HostError> {
        match state.views.get_mut(&view) {
            Some(v) if !v.closed => Ok(v),
            _ => Err(HostError::Closed { view }),
        }
    }
}

impl State {
    /// Existing document for `path`, or a new one if the file is known.
    fn document_for(&mut self, path: &NormalizedPath) -> Option<DocumentId> {
        if let Some(i) = self.documents.iter().position(|d| &d.path == path) {
            return Some(DocumentId(i as u64));
        }
        let text = self.files.get(path)?;
        let lines = text.lines().map(str::to_string).collect();
        self.documents.push(Document {
            path: path.clone(),
            lines,
        });
        Some(DocumentId(self.documents.len() as u64 - 1))
    }

    fn new_view(&mut self, document: Option<DocumentId>, line: usize) -> ViewId {
        self.next_view += 1;
        let id = ViewId(self.next_view);
        self.views.insert(
            id,
            View {
                document,
                active_line: line,
                visible: true,
                closed: false,
            },
        );
        self.active = Some(id);
        id
    }

    fn lines(&self, view: ViewId) -> Option<&[String]> {
        let view = self.views.get(&view).filter(|v| !v.closed)?;
        let document = view.document?;
        Some(&self.documents[document.0 as usize].lines)
    }
}

#[async_trait]
impl EditorHost for FakeHost {
    async fn open_document(&self, path: &NormalizedPath) -> Result<DocumentId, HostError> {
        let gate = self.open_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let mut state = self.state();
        state.calls.push(HostCall::OpenDocument(path.clone()));
        state.document_for(path).ok_or_else(|| HostError::NotFound {
            path: path.to_native(),
        })
    }

    fn find_open_document(&self, path: &NormalizedPath) -> Option<DocumentId> {
        self.state()
            .documents
            .iter()
            .position(|d| &d.path == path)
            .map(|i| DocumentId(i as u64))
    }

    fn find_visible_view(&self, document: DocumentId) -> Option<ViewId> {
        self.state().views.iter().find_map(|(id, view)| {
            (view.visible && !view.closed && view.document == Some(document)).then_some(*id)
        })
    }

    async fn show_view(
        &self,
        document: DocumentId,
        options: ShowOptions,
    ) -> Result<ViewId, HostError> {
        let mut state = self.state();
        state.calls.push(HostCall::ShowView {
            document,
            line: options.line,
            column: options.column,
        });
        Ok(state.new_view(Some(document), options.line.unwrap_or(0)))
    }

    fn active_view(&self) -> Option<ViewId> {
        self.state().active
    }

    fn view_path(&self, view: ViewId) -> Option<PathBuf> {
        let state = self.state();
        let view = state.views.get(&view).filter(|v| !v.closed)?;
        let document = view.document?;
        Some(state.documents[document.0 as usize].path.to_native())
    }

    fn active_line(&self, view: ViewId) -> Option<usize> {
        self.state()
            .views
            .get(&view)
            .filter(|v| !v.closed)
            .map(|v| v.active_line)
    }

    fn line_count(&self, view: ViewId) -> Option<usize> {
        self.state().lines(view).map(<[String]>::len)
    }

    fn line_text(&self, view: ViewId, line: usize) -> Option<String> {
        self.state().lines(view)?.get(line).cloned()
    }

    fn set_selection(&self, view: ViewId, line: usize) -> Result<(), HostError> {
        let mut state = self.state();
        Self::live_view(&mut state, view)?.active_line = line;
        state.active = Some(view);
        state.calls.push(HostCall::SetSelection { view, line });
        Ok(())
    }

    fn reveal_range(
        &self,
        view: ViewId,
        range: LineRange,
        mode: RevealMode,
    ) -> Result<(), HostError> {
        let mut state = self.state();
        Self::live_view(&mut state, view)?;
        state.calls.push(HostCall::Reveal { view, range, mode });
        Ok(())
    }

    fn set_decorations(
        &self,
        view: ViewId,
        _style: &DecorationStyle,
        ranges: &[LineRange],
    ) -> Result<(), HostError> {
        let mut state = self.state();
        Self::live_view(&mut state, view)?;
        state.decorations.insert(view, ranges.to_vec());
        state.calls.push(HostCall::SetDecorations {
            view,
            ranges: ranges.to_vec(),
        });
        Ok(())
    }

    fn show_error(&self, message: &str) {
        self.state().errors.push(message.to_string());
    }

    async fn read_text(&self, path: &NormalizedPath) -> logsync_fs::Result<String> {
        let gate = self.read_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        logsync_fs::read_text_async(path).await
    }
}
