//! SyncEngine implementation
//!
//! One cycle per selection event:
//! 1. role resolution (an unknown view becomes master or assistant)
//! 2. no-op filter (neither role's line moved)
//! 3. highlight reset on both roles
//! 4. direction dispatch (assistant moved first, then master if bidirectional)
//! 5. commit of highlights and line memory, unless a command ran meanwhile

use std::ops::ControlFlow;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use logsync_index::{LocationEntry, LocationIndex, scan_upward};

use crate::config::{ResolvedConfig, Settings};
use crate::highlight::HighlightApplier;
use crate::host::{EditorHost, HostError, LineRange, RevealMode, SelectionEvent, ViewColumn, ViewId};
use crate::latch::BusyLatch;
use crate::log::LogSink;
use crate::mode::Mode;
use crate::navigator::Navigator;
use crate::{Error, Result};

use super::outcome::{Direction, IgnoreReason, SyncOutcome};
use super::state::{AssistantRole, SyncSnapshot};

/// Mutable engine state, only touched under the mutex and never across an await.
pub(super) struct EngineState {
    pub(super) mode: Mode,
    pub(super) config: Option<Arc<ResolvedConfig>>,
    /// Sticky until settings reload successfully.
    pub(super) config_error: bool,
    /// `None` until built, and again after the reference path changes.
    pub(super) index: Option<Arc<LocationIndex>>,
    pub(super) snapshot: SyncSnapshot,
    /// Bumped by commands; cycles started under an older generation do not commit.
    pub(super) generation: u64,
}

/// A located counterpart, ready to be highlighted.
struct Resolution {
    entry: LocationEntry,
    assistant: ViewId,
    /// Zero-based assistant line to highlight.
    assistant_line: usize,
    direction: Direction,
}

/// Keeps the reference view and the tracked source view in step.
///
/// Hosts forward every cursor movement to [`SyncEngine::handle_selection`]
/// and bind the user commands to [`SyncEngine::toggle_mapping_mode`] and
/// [`SyncEngine::disable_mapping`].
pub struct SyncEngine {
    pub(super) host: Arc<dyn EditorHost>,
    pub(super) sink: Arc<dyn LogSink>,
    pub(super) navigator: Navigator,
    latch: BusyLatch,
    state: Mutex<EngineState>,
}

impl SyncEngine {
    /// Create an engine in [`Mode::Off`].
    ///
    /// Invalid settings are surfaced to the user and leave the engine
    /// disabled until [`SyncEngine::reload`] succeeds.
    pub fn new(
        host: Arc<dyn EditorHost>,
        sink: Arc<dyn LogSink>,
        settings: &Settings,
        workspace_root: Option<&Path>,
    ) -> Self {
        let engine = Self {
            navigator: Navigator::new(host.clone()),
            host,
            sink,
            latch: BusyLatch::new(),
            state: Mutex::new(EngineState {
                mode: Mode::Off,
                config: None,
                config_error: false,
                index: None,
                snapshot: SyncSnapshot::default(),
                generation: 0,
            }),
        };
        // Errors are already surfaced and recorded in the sticky flag.
        let _ = engine.reload(settings, workspace_root);
        engine
    }

    pub fn mode(&self) -> Mode {
        self.state().mode
    }

    pub fn snapshot(&self) -> SyncSnapshot {
        self.state().snapshot.clone()
    }

    pub fn config(&self) -> Option<Arc<ResolvedConfig>> {
        self.state().config.clone()
    }

    pub fn has_configuration_error(&self) -> bool {
        self.state().config_error
    }

    /// Number of entries in the current index, 0 if none is built.
    pub fn index_len(&self) -> usize {
        self.state().index.as_ref().map_or(0, |index| index.len())
    }

    /// Whether a selection cycle is in flight.
    pub fn is_busy(&self) -> bool {
        self.latch.is_held()
    }

    pub(super) fn state(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Process one selection change.
    ///
    /// Never fails: errors are reported to the user and to the log sink, and
    /// the cycle ends as [`SyncOutcome::Failed`]. Events that arrive while a
    /// cycle is in flight are dropped.
    pub async fn handle_selection(&self, event: SelectionEvent) -> SyncOutcome {
        let (mode, config_error) = {
            let state = self.state();
            (state.mode, state.config_error)
        };
        if !mode.mapping_enabled() {
            return SyncOutcome::Ignored(IgnoreReason::MappingDisabled);
        }
        if config_error {
            return SyncOutcome::Ignored(IgnoreReason::ConfigurationError);
        }
        if self.navigator.is_navigating() {
            tracing::trace!(view = ?event.view, "Ignoring selection caused by navigation");
            return SyncOutcome::Ignored(IgnoreReason::ProgrammaticNavigation);
        }
        let Some(path) = self.host.view_path(event.view) else {
            return SyncOutcome::Ignored(IgnoreReason::NotFileBacked);
        };

        let Some(_guard) = self.latch.try_acquire() else {
            tracing::trace!(
                view = ?event.view,
                line = event.active_line,
                "Dropping selection event while a cycle is in flight"
            );
            return SyncOutcome::Busy;
        };

        match self.run_cycle(event, &path).await {
            Ok(outcome) => {
                tracing::debug!(view = ?event.view, line = event.active_line, ?outcome, "Selection cycle finished");
                outcome
            }
            Err(e) => {
                self.surface("Synchronization failed", &e);
                SyncOutcome::Failed
            }
        }
    }

    async fn run_cycle(&self, event: SelectionEvent, event_path: &Path) -> Result<SyncOutcome> {
        let (config, generation, mut snap) = {
            let state = self.state();
            (state.config.clone(), state.generation, state.snapshot.clone())
        };
        let config = config.ok_or_else(|| Error::configuration("no configuration loaded"))?;
        let index = self.ensure_index(&config).await?;
        if self.superseded(generation) {
            return Ok(SyncOutcome::Ignored(IgnoreReason::Superseded));
        }
        let highlighter = HighlightApplier::new(self.host.clone(), config.highlight.clone());

        if !snap.holds_role(event.view) {
            let path = config.normalize(event_path);
            if path == config.reference_file {
                if snap.master_highlighted
                    && let Some(old) = snap.master
                {
                    self.clear_quietly(&highlighter, old);
                    snap.master_highlighted = false;
                }
                tracing::debug!(view = ?event.view, "Adopting reference view");
                snap.adopt_master(event.view);
            } else {
                let Some(file) = index.file(&path) else {
                    return Ok(SyncOutcome::Untracked);
                };
                if snap.assistant_highlighted
                    && let Some(old) = snap.assistant_view()
                {
                    self.clear_quietly(&highlighter, old);
                    snap.assistant_highlighted = false;
                }
                tracing::debug!(view = ?event.view, path = %path, "Tracking source view");
                snap.adopt_assistant(AssistantRole {
                    view: event.view,
                    path,
                    file,
                });
            }
        }

        let Some(master) = snap.master else {
            self.commit(generation, snap);
            return Ok(SyncOutcome::Ignored(IgnoreReason::NoReferenceView));
        };

        let master_line = self.line_of(master, event);
        let assistant_line = snap
            .assistant_view()
            .and_then(|view| self.line_of(view, event));
        let master_changed = master_line.is_some() && master_line != snap.master_previous_line;
        let assistant_changed =
            assistant_line.is_some() && assistant_line != snap.assistant_previous_line;

        if !master_changed && !assistant_changed {
            self.commit(generation, snap);
            return Ok(SyncOutcome::Unchanged);
        }

        self.clear_highlights(&highlighter, &mut snap);

        let step = match (assistant_line, master_line) {
            (Some(line), _) if assistant_changed => self.resolve_from_assistant(&snap, master, line)?,
            (_, Some(line)) if self.mode().bidirectional_enabled() => {
                self.resolve_from_master(&mut snap, &config, &index, master, line)
                    .await?
            }
            _ => ControlFlow::Break(SyncOutcome::Ignored(IgnoreReason::SingleDirection)),
        };

        let resolution = match step {
            ControlFlow::Continue(resolution) => resolution,
            ControlFlow::Break(outcome) => {
                self.commit(generation, snap);
                return Ok(outcome);
            }
        };
        // Commands only clear highlights recorded in the committed snapshot.
        if self.superseded(generation) {
            tracing::debug!("Command ran while navigating; leaving views undecorated");
            return Ok(SyncOutcome::Ignored(IgnoreReason::Superseded));
        }

        snap.master_previous_line = master_line;
        snap.assistant_previous_line = self
            .line_of(resolution.assistant, event)
            .or(Some(resolution.assistant_line));

        if let Err(e) = highlighter.apply(resolution.assistant, resolution.assistant_line, 1) {
            self.surface("Cannot highlight source line", &e);
        }
        if let Err(e) = highlighter.apply(master, resolution.entry.log_line, resolution.entry.span)
        {
            self.surface("Cannot highlight reference lines", &e);
        }
        snap.master_highlighted = true;
        snap.assistant_highlighted = true;

        self.commit(generation, snap);
        Ok(SyncOutcome::Synced(resolution.direction))
    }

    /// Source cursor moved: reveal the reference block for that source line.
    fn resolve_from_assistant(
        &self,
        snap: &SyncSnapshot,
        master: ViewId,
        line: usize,
    ) -> Result<ControlFlow<SyncOutcome, Resolution>> {
        let Some(assistant) = snap.assistant.as_ref() else {
            return Ok(ControlFlow::Break(SyncOutcome::Unchanged));
        };
        let entry = u32::try_from(line + 1)
            .ok()
            .and_then(|source_line| assistant.file.get(source_line))
            .copied();
        let Some(entry) = entry else {
            return Ok(ControlFlow::Break(SyncOutcome::Missed));
        };

        self.host.reveal_range(
            master,
            LineRange::lines(entry.log_line, entry.span),
            RevealMode::InCenter,
        )?;

        Ok(ControlFlow::Continue(Resolution {
            entry,
            assistant: assistant.view,
            assistant_line: line,
            direction: Direction::AssistantToMaster,
        }))
    }

    /// Reference cursor moved: find the nearest token above it and bring its
    /// source line into view, opening the file if it is not the tracked one.
    async fn resolve_from_master(
        &self,
        snap: &mut SyncSnapshot,
        config: &ResolvedConfig,
        index: &LocationIndex,
        master: ViewId,
        line: usize,
    ) -> Result<ControlFlow<SyncOutcome, Resolution>> {
        let found = scan_upward(line, &config.path_pattern, &config.skip_pattern, |i| {
            self.host.line_text(master, i)
        });
        let Some((token_line, token)) = found else {
            return Ok(ControlFlow::Break(SyncOutcome::NoToken));
        };
        let Some(token_path) = token.normalized_path(config.path_style) else {
            return Ok(ControlFlow::Break(SyncOutcome::NoToken));
        };
        let target = token.editor_line();

        if let Some(assistant) = snap.assistant.as_ref().filter(|a| a.path == token_path) {
            let Some(entry) = assistant.file.get(token.line).copied() else {
                return Ok(ControlFlow::Break(SyncOutcome::Missed));
            };
            self.host
                .reveal_range(assistant.view, LineRange::line(target), RevealMode::InCenter)?;
            return Ok(ControlFlow::Continue(Resolution {
                entry,
                assistant: assistant.view,
                assistant_line: target,
                direction: Direction::MasterToAssistant,
            }));
        }

        tracing::debug!(path = %token_path, line = token.line, token_line, "Token references another file");
        let view = self
            .navigator
            .open(&token_path, target, ViewColumn::Beside)
            .await?;
        let Some(file) = index.file(&token_path) else {
            return Ok(ControlFlow::Break(SyncOutcome::Untracked));
        };
        snap.adopt_assistant(AssistantRole {
            view,
            path: token_path,
            file: file.clone(),
        });
        snap.assistant_previous_line = Some(target);
        let Some(entry) = file.get(token.line).copied() else {
            return Ok(ControlFlow::Break(SyncOutcome::Missed));
        };

        Ok(ControlFlow::Continue(Resolution {
            entry,
            assistant: view,
            assistant_line: target,
            direction: Direction::MasterToAssistant,
        }))
    }

    /// Return the index, extracting the reference file if none is built.
    pub(super) async fn ensure_index(
        &self,
        config: &Arc<ResolvedConfig>,
    ) -> Result<Arc<LocationIndex>> {
        let cached = self.state().index.clone();
        if let Some(index) = cached {
            return Ok(index);
        }

        let text = self
            .host
            .read_text(&config.reference_file)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    Error::NotFound {
                        path: config.reference_file.to_native(),
                    }
                } else {
                    e.into()
                }
            })?;
        let index = LocationIndex::extract(
            &text,
            &config.path_pattern,
            &config.skip_pattern,
            config.path_style,
        );

        self.sink.log(&format!(
            "Indexed {} locations in {} source files from {}",
            index.len(),
            index.files().count(),
            config.reference_file
        ));

        let index = Arc::new(index);
        let mut state = self.state();
        if state
            .config
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, config))
        {
            state.index = Some(index.clone());
        }
        Ok(index)
    }

    /// Cursor line of `view`, preferring the line carried by the event.
    fn line_of(&self, view: ViewId, event: SelectionEvent) -> Option<usize> {
        if view == event.view {
            Some(event.active_line)
        } else {
            self.host.active_line(view)
        }
    }

    /// A command ran since `generation` was read, or mapping is off.
    fn superseded(&self, generation: u64) -> bool {
        let state = self.state();
        state.generation != generation || !state.mode.mapping_enabled()
    }

    fn commit(&self, generation: u64, snap: SyncSnapshot) {
        let mut state = self.state();
        if state.generation == generation {
            state.snapshot = snap;
        } else {
            tracing::debug!("Discarding snapshot from a superseded cycle");
        }
    }

    pub(super) fn clear_highlights(&self, highlighter: &HighlightApplier, snap: &mut SyncSnapshot) {
        if snap.master_highlighted
            && let Some(master) = snap.master
        {
            self.clear_quietly(highlighter, master);
        }
        if snap.assistant_highlighted
            && let Some(assistant) = snap.assistant_view()
        {
            self.clear_quietly(highlighter, assistant);
        }
        snap.master_highlighted = false;
        snap.assistant_highlighted = false;
    }

    /// Clear a highlight; a view that has since closed is not an error.
    fn clear_quietly(&self, highlighter: &HighlightApplier, view: ViewId) {
        match highlighter.clear(view) {
            Ok(()) => {}
            Err(Error::Host(HostError::Closed { .. })) => {
                tracing::debug!(?view, "Highlighted view already closed");
            }
            Err(e) => self.surface("Cannot clear highlight", &e),
        }
    }

    /// Report an error to the user and the log sink.
    pub(super) fn surface(&self, context: &str, error: &Error) {
        tracing::warn!("{}: {}", context, error);
        self.sink.error(context, Some(&error.to_string()));
        self.host.show_error(&format!("{context}: {error}"));
    }
}
