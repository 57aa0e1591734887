//! User commands: toggle, disable, reload, deactivate

use std::path::Path;
use std::sync::Arc;

use crate::config::{ResolvedConfig, Settings};
use crate::highlight::HighlightApplier;
use crate::host::ViewColumn;
use crate::mode::Mode;
use crate::{Error, Result};

use super::engine::SyncEngine;
use super::state::{AssistantRole, SyncSnapshot};

impl SyncEngine {
    /// Cycle the mapping mode.
    ///
    /// Off and Bidirectional go to Single, Single goes to Bidirectional.
    /// Turning mapping on for the first time builds the index and opens the
    /// reference file beside the active editor; a view on a tracked source
    /// file that was active at that moment becomes the assistant.
    ///
    /// # Errors
    ///
    /// Fails (and leaves the mode unchanged) if the configuration is invalid,
    /// the reference file is missing, or it cannot be opened.
    pub async fn toggle_mapping_mode(&self) -> Result<Mode> {
        match self.try_toggle().await {
            Ok(mode) => {
                self.sink.log(&format!("Mapping mode: {mode}"));
                Ok(mode)
            }
            Err(e) => {
                self.surface("Cannot enable mapping", &e);
                Err(e)
            }
        }
    }

    async fn try_toggle(&self) -> Result<Mode> {
        let (mode, config, config_error, needs_session) = {
            let state = self.state();
            (
                state.mode,
                state.config.clone(),
                state.config_error,
                state.index.is_none() || state.snapshot.master.is_none(),
            )
        };
        if config_error {
            return Err(Error::configuration(
                "settings are invalid; fix them and reload before enabling mapping",
            ));
        }
        let config = config.ok_or_else(|| Error::configuration("no configuration loaded"))?;

        if mode == Mode::Off && needs_session {
            self.start_session(&config).await?;
        }

        let next = mode.toggled();
        let mut state = self.state();
        state.mode = next;
        state.generation += 1;
        Ok(next)
    }

    async fn start_session(&self, config: &Arc<ResolvedConfig>) -> Result<()> {
        let origin = self.host.active_view();
        let index = self.ensure_index(config).await?;
        let master = self
            .navigator
            .open(&config.reference_file, 0, ViewColumn::Beside)
            .await?;

        let mut snapshot = SyncSnapshot::default();
        snapshot.adopt_master(master);
        snapshot.master_previous_line = self.host.active_line(master);
        if let Some(view) = origin.filter(|view| *view != master)
            && let Some(path) = self.host.view_path(view)
        {
            let path = config.normalize(path);
            if let Some(file) = index.file(&path) {
                tracing::debug!(?view, path = %path, "Tracking active source view");
                snapshot.adopt_assistant(AssistantRole { view, path, file });
                snapshot.assistant_previous_line = self.host.active_line(view);
            }
        }

        let mut state = self.state();
        state.snapshot = snapshot;
        state.generation += 1;
        Ok(())
    }

    /// Switch mapping off and remove both highlights.
    ///
    /// Roles and the index are kept, so toggling back on resumes with the
    /// same pair of views.
    pub fn disable_mapping(&self) {
        let (config, snapshot) = {
            let mut state = self.state();
            state.mode = Mode::Off;
            state.generation += 1;
            let snapshot = state.snapshot.clone();
            state.snapshot.master_highlighted = false;
            state.snapshot.assistant_highlighted = false;
            (state.config.clone(), snapshot)
        };
        if let Some(config) = config {
            self.clear_with_style(&config, snapshot);
        }
        self.sink.log("Mapping disabled");
    }

    /// Apply new settings.
    ///
    /// A changed reference path drops the index and both roles; the index is
    /// rebuilt on next use. On failure the engine stops synchronizing until a
    /// reload succeeds.
    ///
    /// # Errors
    ///
    /// Returns the resolution error after reporting it to the user.
    pub fn reload(&self, settings: &Settings, workspace_root: Option<&Path>) -> Result<()> {
        let config = match ResolvedConfig::resolve(settings, workspace_root) {
            Ok(config) => Arc::new(config),
            Err(e) => {
                self.state().config_error = true;
                self.surface("Invalid logsync settings", &e);
                return Err(e);
            }
        };

        let (previous, snapshot) = {
            let mut state = self.state();
            let previous = state.config.replace(config.clone());
            state.config_error = false;
            let snapshot = state.snapshot.clone();

            let reference_changed = previous
                .as_ref()
                .is_none_or(|old| old.reference_file != config.reference_file);
            if reference_changed {
                state.index = None;
                state.snapshot = SyncSnapshot::default();
            } else {
                state.snapshot.master_highlighted = false;
                state.snapshot.assistant_highlighted = false;
            }
            state.generation += 1;
            (previous, snapshot)
        };

        // Highlights were drawn with the previous style.
        if let Some(previous) = previous {
            self.clear_with_style(&previous, snapshot);
        }

        tracing::debug!(reference = %config.reference_file, "Settings applied");
        Ok(())
    }

    /// Tear down: mapping off, highlights removed, index and roles dropped.
    pub fn deactivate(&self) {
        self.disable_mapping();
        let mut state = self.state();
        state.index = None;
        state.snapshot = SyncSnapshot::default();
        state.generation += 1;
    }

    fn clear_with_style(&self, config: &ResolvedConfig, mut snapshot: SyncSnapshot) {
        let highlighter = HighlightApplier::new(self.host.clone(), config.highlight.clone());
        self.clear_highlights(&highlighter, &mut snapshot);
    }
}
