//! Raw settings parsed from `logsync.toml`

use crate::Result;
use logsync_fs::{NormalizedPath, PathStyle};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// User-facing settings.
///
/// Unset or blank values fall back to defaults during resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Reference file to index; may contain `$workspaceRoot`.
    #[serde(default)]
    pub reference_file_path: Option<String>,

    /// Token regex with two capture groups: path and line number.
    #[serde(default)]
    pub path_regex: Option<String>,

    /// Lines matching this regex are ignored.
    #[serde(default)]
    pub skip_regex: Option<String>,

    /// CSS color for highlighted lines.
    #[serde(default)]
    pub highlight_color: Option<String>,

    /// Path comparison rules for index keys.
    #[serde(default)]
    pub path_style: PathStyle,
}

impl Settings {
    /// Parse settings from TOML content.
    pub fn parse(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = logsync_fs::read_text(&NormalizedPath::new(path))?;
        Self::parse(&content)
    }

    /// Settings pointing at a reference file with everything else defaulted.
    pub fn for_reference(path: impl Into<String>) -> Self {
        Self {
            reference_file_path: Some(path.into()),
            ..Self::default()
        }
    }
}
