//! Command implementations for logsync-cli

pub mod index;
pub mod lookup;
pub mod replay;

pub use index::run_index;
pub use lookup::{run_lookup, run_resolve};
pub use replay::run_replay;

use std::path::{Path, PathBuf};

use logsync_core::{ResolvedConfig, Settings};

use crate::error::{CliError, Result};

/// Settings file looked up in the workspace root when `--config` is absent.
pub const SETTINGS_FILE: &str = "logsync.toml";

/// Options shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    pub workspace: PathBuf,
    pub config: Option<PathBuf>,
}

impl Context {
    pub fn new(workspace: PathBuf, config: Option<PathBuf>) -> Self {
        Self { workspace, config }
    }

    /// Settings from `--config`, else from the workspace settings file, else
    /// defaults.
    pub fn settings(&self) -> Result<Settings> {
        let path = match &self.config {
            Some(path) => Some(self.workspace.join(path)),
            None => Some(self.workspace.join(SETTINGS_FILE)).filter(|p| p.is_file()),
        };
        match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading settings");
                Ok(Settings::load(&path)?)
            }
            None => Ok(Settings::default()),
        }
    }

    /// Resolve settings, with `reference` replacing `referenceFilePath`.
    pub fn resolve(&self, reference: Option<&Path>) -> Result<ResolvedConfig> {
        let mut settings = self.settings()?;
        if let Some(reference) = reference {
            settings.reference_file_path = Some(reference.to_string_lossy().into_owned());
        }
        if settings.reference_file_path.is_none() {
            return Err(CliError::user(format!(
                "No reference file given and {SETTINGS_FILE} does not set referenceFilePath"
            )));
        }
        Ok(ResolvedConfig::resolve(&settings, Some(&self.workspace))?)
    }
}
