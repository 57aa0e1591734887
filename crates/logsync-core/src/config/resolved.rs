//! Settings resolved into a runnable configuration

use crate::host::DecorationStyle;
use crate::{Error, Result};
use logsync_fs::{NormalizedPath, PathStyle};
use logsync_index::{SkipPattern, TokenPattern};
use std::path::Path;

use super::settings::Settings;

/// Placeholder expanded to the workspace root folder.
pub const WORKSPACE_ROOT_PLACEHOLDER: &str = "$workspaceRoot";

/// Translucent green.
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "rgba(0, 255, 0, 0.3)";

/// Configuration the engine runs on.
///
/// Built only through [`ResolvedConfig::resolve`], so holding one means both
/// regexes compiled and the reference path is concrete.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub reference_file: NormalizedPath,
    pub path_pattern: TokenPattern,
    pub skip_pattern: SkipPattern,
    pub highlight: DecorationStyle,
    /// Concrete style (never [`PathStyle::Native`]).
    pub path_style: PathStyle,
}

impl ResolvedConfig {
    /// Resolve raw settings against an optional workspace root.
    ///
    /// Relative reference paths are taken relative to the workspace root.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the reference path is missing, uses
    /// `$workspaceRoot` without a workspace, or either regex is invalid.
    pub fn resolve(settings: &Settings, workspace_root: Option<&Path>) -> Result<Self> {
        let path_style = settings.path_style.resolve();

        let raw_reference = settings
            .reference_file_path
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| Error::configuration("referenceFilePath is not set"))?;
        let expanded = expand_workspace_root("referenceFilePath", raw_reference, workspace_root)?;

        let reference_path = match workspace_root {
            Some(root) if Path::new(&expanded).is_relative() => root.join(&expanded),
            _ => expanded.into(),
        };
        let reference_file = NormalizedPath::with_style(reference_path, path_style);

        let path_pattern = TokenPattern::or_default(settings.path_regex.as_deref(), path_style)?;
        let skip_pattern = SkipPattern::or_default(settings.skip_regex.as_deref())?;

        let color = settings
            .highlight_color
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_HIGHLIGHT_COLOR);

        tracing::debug!(
            reference = %reference_file,
            path_regex = path_pattern.as_str(),
            skip_regex = skip_pattern.as_str(),
            "Resolved configuration"
        );

        Ok(Self {
            reference_file,
            path_pattern,
            skip_pattern,
            highlight: DecorationStyle::background(color),
            path_style,
        })
    }

    /// Normalize a path with this configuration's path style.
    pub fn normalize(&self, path: impl AsRef<Path>) -> NormalizedPath {
        NormalizedPath::with_style(path, self.path_style)
    }
}

fn expand_workspace_root(setting: &str, value: &str, root: Option<&Path>) -> Result<String> {
    if !value.contains(WORKSPACE_ROOT_PLACEHOLDER) {
        return Ok(value.to_string());
    }
    let root = root.ok_or_else(|| Error::UnresolvedWorkspace {
        setting: setting.to_string(),
    })?;
    Ok(value.replace(WORKSPACE_ROOT_PLACEHOLDER, &root.to_string_lossy()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use logsync_index::pattern::{DEFAULT_SKIP_PATTERN, POSIX_DEFAULT_PATTERN, WINDOWS_DEFAULT_PATTERN};

    fn posix(reference: &str) -> Settings {
        Settings {
            path_style: PathStyle::Posix,
            ..Settings::for_reference(reference)
        }
    }

    #[test]
    fn fills_in_defaults() {
        let config = ResolvedConfig::resolve(&posix("/tmp/debug.log"), None).unwrap();
        assert_eq!(config.reference_file.as_str(), "/tmp/debug.log");
        assert_eq!(config.path_pattern.as_str(), POSIX_DEFAULT_PATTERN);
        assert_eq!(config.skip_pattern.as_str(), DEFAULT_SKIP_PATTERN);
        assert_eq!(config.highlight.background_color, DEFAULT_HIGHLIGHT_COLOR);
        assert_eq!(config.path_style, PathStyle::Posix);
    }

    #[test]
    fn windows_style_uses_drive_pattern_and_upper_cases_reference() {
        let settings = Settings {
            path_style: PathStyle::Windows,
            ..Settings::for_reference("c:\\build\\debug.log")
        };
        let config = ResolvedConfig::resolve(&settings, None).unwrap();
        assert_eq!(config.reference_file.as_str(), "C:/build/debug.log");
        assert_eq!(config.path_pattern.as_str(), WINDOWS_DEFAULT_PATTERN);
    }

    #[test]
    fn expands_workspace_root() {
        let config = ResolvedConfig::resolve(
            &posix("$workspaceRoot/out/debug.log"),
            Some(Path::new("/work/proj")),
        )
        .unwrap();
        assert_eq!(config.reference_file.as_str(), "/work/proj/out/debug.log");
    }

    #[test]
    fn relative_reference_joins_workspace_root() {
        let config =
            ResolvedConfig::resolve(&posix("out/debug.log"), Some(Path::new("/work"))).unwrap();
        assert_eq!(config.reference_file.as_str(), "/work/out/debug.log");
    }

    #[test]
    fn placeholder_without_workspace_is_unresolved() {
        let err = ResolvedConfig::resolve(&posix("$workspaceRoot/debug.log"), None).unwrap_err();
        assert!(matches!(err, Error::UnresolvedWorkspace { .. }));
        assert!(err.is_configuration());
    }

    #[test]
    fn missing_reference_is_configuration_error() {
        let err = ResolvedConfig::resolve(&Settings::default(), None).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn malformed_regex_is_configuration_error() {
        let settings = Settings {
            path_regex: Some("^(.*):\\d+$".to_string()),
            ..posix("/tmp/debug.log")
        };
        let err = ResolvedConfig::resolve(&settings, None).unwrap_err();
        assert!(err.is_configuration(), "unexpected: {err}");
    }
}
