//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// logsync - Map build and debug logs back to the source lines they mention
#[derive(Parser, Debug)]
#[command(name = "logsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Workspace root used for `$workspaceRoot` and relative paths
    #[arg(short, long, global = true, env = "LOGSYNC_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Settings file (defaults to `logsync.toml` in the workspace root)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print every source location found in a reference file
    Index {
        /// Reference file (overrides referenceFilePath)
        reference: Option<PathBuf>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Find the reference block for a source line
    ///
    /// Examples:
    ///   logsync lookup build.log src/main.c 42
    Lookup {
        /// Reference file
        reference: PathBuf,

        /// Source file as it appears in the reference file
        source: String,

        /// 1-based source line
        line: u32,
    },

    /// Find the source location for a reference-file line
    ///
    /// Examples:
    ///   logsync resolve build.log 120
    Resolve {
        /// Reference file
        reference: PathBuf,

        /// 1-based line in the reference file
        log_line: usize,
    },

    /// Drive the sync engine from a script of editor actions
    ///
    /// Script commands, one per line (`#` starts a comment):
    ///   toggle             cycle the mapping mode
    ///   bidi               switch to bidirectional mode
    ///   disable            turn mapping off
    ///   select PATH LINE   move the cursor in a source file (1-based)
    ///   log LINE           move the cursor in the reference file (1-based)
    Replay {
        /// Script file
        script: PathBuf,
    },
}
