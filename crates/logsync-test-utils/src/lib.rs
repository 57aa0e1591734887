//! Shared test utilities for the logsync workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`host`]: [`FakeHost`], an in-memory editor that records every call
//! - [`sink`]: [`RecordingSink`], a log sink that keeps its messages
//! - [`workspace`]: [`Workspace`], a temp directory holding a reference file

pub mod host;
pub mod sink;
pub mod workspace;

pub use host::{FakeHost, HostCall};
pub use sink::RecordingSink;
pub use workspace::Workspace;
