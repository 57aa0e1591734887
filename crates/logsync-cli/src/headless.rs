//! Headless editor host over files on disk
//!
//! Every view is visible and nothing is drawn. Each host call is written to a
//! transcript that the replay command prints after every script step.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use logsync_core::{
    DecorationStyle, DocumentId, EditorHost, HostError, LineRange, RevealMode, SelectionEvent,
    ShowOptions, ViewId,
};
use logsync_fs::NormalizedPath;

use crate::error::Result;

struct Document {
    path: NormalizedPath,
    lines: Vec<String>,
}

struct View {
    document: usize,
    line: usize,
}

#[derive(Default)]
struct State {
    documents: Vec<Document>,
    views: Vec<View>,
    active: Option<ViewId>,
    transcript: Vec<String>,
}

impl State {
    fn document(&self, view: ViewId) -> Option<&Document> {
        let view = self.views.get(view.0 as usize)?;
        self.documents.get(view.document)
    }

    fn name(&self, view: ViewId) -> String {
        self.document(view)
            .map(|d| d.path.file_name().unwrap_or(d.path.as_str()).to_string())
            .unwrap_or_else(|| format!("view{}", view.0))
    }

    fn add_document(&mut self, path: &NormalizedPath, text: &str) -> DocumentId {
        self.documents.push(Document {
            path: path.clone(),
            lines: text.lines().map(str::to_string).collect(),
        });
        DocumentId(self.documents.len() as u64 - 1)
    }

    fn add_view(&mut self, document: DocumentId, line: usize) -> ViewId {
        self.views.push(View {
            document: document.0 as usize,
            line,
        });
        let id = ViewId(self.views.len() as u64 - 1);
        self.active = Some(id);
        id
    }

    fn find_document(&self, path: &NormalizedPath) -> Option<DocumentId> {
        self.documents
            .iter()
            .position(|d| &d.path == path)
            .map(|i| DocumentId(i as u64))
    }

    fn find_view(&self, document: DocumentId) -> Option<ViewId> {
        self.views
            .iter()
            .position(|v| v.document == document.0 as usize)
            .map(|i| ViewId(i as u64))
    }
}

#[derive(Default)]
pub struct HeadlessHost {
    state: Mutex<State>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The view a user would get by opening `path`: an existing one, or a
    /// new view read from disk.
    pub fn open_view(&self, path: &NormalizedPath) -> Result<ViewId> {
        let mut state = self.state();
        let document = match state.find_document(path) {
            Some(document) => document,
            None => {
                let text = logsync_fs::read_text(path)?;
                state.add_document(path, &text)
            }
        };
        let view = match state.find_view(document) {
            Some(view) => view,
            None => state.add_view(document, 0),
        };
        state.active = Some(view);
        Ok(view)
    }

    /// Move the cursor as a user would and return the resulting event.
    pub fn set_cursor(&self, view: ViewId, line: usize) -> SelectionEvent {
        let mut state = self.state();
        if let Some(v) = state.views.get_mut(view.0 as usize) {
            v.line = line;
        }
        state.active = Some(view);
        SelectionEvent {
            view,
            active_line: line,
        }
    }

    /// Transcript entries recorded since the last call.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut self.state().transcript)
    }

    fn record(&self, entry: String) {
        self.state().transcript.push(entry);
    }
}

/// 1-based inclusive display of a zero-based range.
fn display_range(range: LineRange) -> String {
    if range.len() <= 1 {
        format!("{}", range.start + 1)
    } else {
        format!("{}-{}", range.start + 1, range.end)
    }
}

#[async_trait]
impl EditorHost for HeadlessHost {
    async fn open_document(&self, path: &NormalizedPath) -> std::result::Result<DocumentId, HostError> {
        let text = logsync_fs::read_text_async(path).await.map_err(|e| {
            if e.is_not_found() {
                HostError::NotFound {
                    path: path.to_native(),
                }
            } else {
                HostError::Rejected {
                    message: e.to_string(),
                }
            }
        })?;

        let mut state = self.state();
        let document = state.add_document(path, &text);
        state.transcript.push(format!("open {path}"));
        Ok(document)
    }

    fn find_open_document(&self, path: &NormalizedPath) -> Option<DocumentId> {
        self.state().find_document(path)
    }

    fn find_visible_view(&self, document: DocumentId) -> Option<ViewId> {
        self.state().find_view(document)
    }

    async fn show_view(
        &self,
        document: DocumentId,
        options: ShowOptions,
    ) -> std::result::Result<ViewId, HostError> {
        let mut state = self.state();
        let line = options.line.unwrap_or(0);
        let view = state.add_view(document, line);
        let entry = format!("show {}:{}", state.name(view), line + 1);
        state.transcript.push(entry);
        Ok(view)
    }

    fn active_view(&self) -> Option<ViewId> {
        self.state().active
    }

    fn view_path(&self, view: ViewId) -> Option<PathBuf> {
        self.state().document(view).map(|d| d.path.to_native())
    }

    fn active_line(&self, view: ViewId) -> Option<usize> {
        self.state().views.get(view.0 as usize).map(|v| v.line)
    }

    fn line_count(&self, view: ViewId) -> Option<usize> {
        self.state().document(view).map(|d| d.lines.len())
    }

    fn line_text(&self, view: ViewId, line: usize) -> Option<String> {
        self.state().document(view)?.lines.get(line).cloned()
    }

    fn set_selection(&self, view: ViewId, line: usize) -> std::result::Result<(), HostError> {
        let mut state = self.state();
        let v = state
            .views
            .get_mut(view.0 as usize)
            .ok_or(HostError::Closed { view })?;
        v.line = line;
        state.active = Some(view);
        let entry = format!("cursor {}:{}", state.name(view), line + 1);
        state.transcript.push(entry);
        Ok(())
    }

    fn reveal_range(
        &self,
        view: ViewId,
        range: LineRange,
        _mode: RevealMode,
    ) -> std::result::Result<(), HostError> {
        let name = self.state().name(view);
        self.record(format!("reveal {name}:{}", display_range(range)));
        Ok(())
    }

    fn set_decorations(
        &self,
        view: ViewId,
        _style: &DecorationStyle,
        ranges: &[LineRange],
    ) -> std::result::Result<(), HostError> {
        let name = self.state().name(view);
        match (ranges.first(), ranges.last()) {
            (Some(first), Some(last)) => {
                let block = LineRange {
                    start: first.start,
                    end: last.end,
                };
                self.record(format!("highlight {name}:{}", display_range(block)));
            }
            _ => self.record(format!("clear {name}")),
        }
        Ok(())
    }

    fn show_error(&self, message: &str) {
        self.record(format!("error {message}"));
    }
}
