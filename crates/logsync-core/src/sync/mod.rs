//! Selection synchronization between the reference file and source files
//!
//! The [`SyncEngine`] owns two roles:
//! - **master**: the view showing the reference file
//! - **assistant**: the view showing the source file currently tracked
//!
//! Every selection event runs one cycle: resolve which role moved, find the
//! counterpart location, reveal it, and move the highlights.

mod commands;
mod engine;
mod outcome;
mod state;

pub use engine::SyncEngine;
pub use outcome::{Direction, IgnoreReason, SyncOutcome};
pub use state::{AssistantRole, SyncSnapshot};
