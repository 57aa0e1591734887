//! Core synchronization layer for logsync
//!
//! Keeps an editor's focus synchronized between a reference file (a build or
//! debug log embedding `path:line` tokens) and the source files it points to:
//!
//! - **Configuration**: TOML settings resolved once into compiled patterns
//! - **Host seam**: [`EditorHost`], the editor operations the engine consumes
//! - **Navigator / HighlightApplier**: open-and-position and decoration helpers
//! - **SyncEngine**: the selection-event state machine and its commands
//!
//! # Architecture
//!
//! ```text
//!               editor host (selection events, commands)
//!                        |
//!                   SyncEngine
//!                        |
//!        +--------+------+------+-----------+
//!        |        |             |           |
//!   Navigator  HighlightApplier  config   logsync-index
//!                                            |
//!                                        logsync-fs
//! ```

pub mod config;
pub mod error;
pub mod highlight;
pub mod host;
pub mod latch;
pub mod log;
pub mod mode;
pub mod navigator;
pub mod sync;

pub use config::{ResolvedConfig, Settings};
pub use error::{Error, Result};
pub use highlight::HighlightApplier;
pub use host::{
    DecorationStyle, DocumentId, EditorHost, HostError, LineRange, RevealMode, SelectionEvent,
    ShowOptions, ViewColumn, ViewId,
};
pub use latch::{BusyGuard, BusyLatch};
pub use log::{LogSink, TracingSink};
pub use mode::Mode;
pub use navigator::Navigator;
pub use sync::{AssistantRole, Direction, IgnoreReason, SyncEngine, SyncOutcome, SyncSnapshot};
