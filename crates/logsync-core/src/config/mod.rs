//! Settings loading and resolution
//!
//! [`Settings`] is the raw, user-editable form (TOML, camelCase keys, every
//! field optional). [`ResolvedConfig`] is what the engine runs on: the
//! `$workspaceRoot` placeholder expanded, both regexes compiled and validated,
//! defaults filled in.
//!
//! # Example
//!
//! ```
//! use logsync_core::config::{ResolvedConfig, Settings};
//! use std::path::Path;
//!
//! let settings = Settings::parse(r#"
//! referenceFilePath = "$workspaceRoot/build/debug.log"
//! pathStyle = "posix"
//! "#).unwrap();
//!
//! let config = ResolvedConfig::resolve(&settings, Some(Path::new("/work"))).unwrap();
//! assert_eq!(config.reference_file.as_str(), "/work/build/debug.log");
//! ```

mod resolved;
mod settings;

pub use resolved::{DEFAULT_HIGHLIGHT_COLOR, ResolvedConfig, WORKSPACE_ROOT_PLACEHOLDER};
pub use settings::Settings;
