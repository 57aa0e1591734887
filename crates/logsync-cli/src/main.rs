//! logsync CLI
//!
//! Offline access to the location index and a scripted driver for the sync
//! engine.

mod cli;
mod commands;
mod error;
mod headless;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use commands::Context;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let Some(command) = cli.command else {
        println!("{} log/source location mapping", "logsync".green().bold());
        println!();
        println!("Run {} for available commands.", "logsync --help".cyan());
        return Ok(());
    };

    let workspace = match cli.workspace {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let ctx = Context::new(workspace, cli.config);
    execute_command(&ctx, command)
}

fn init_tracing(verbose: bool) -> Result<()> {
    let builder = FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_target(true);
    let result = if verbose {
        tracing::subscriber::set_global_default(builder.with_max_level(Level::DEBUG).finish())
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing::subscriber::set_global_default(builder.with_env_filter(filter).finish())
    };
    result.map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {e}")))?;
    tracing::debug!("Verbose mode enabled");
    Ok(())
}

fn execute_command(ctx: &Context, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Index { reference, json } => {
            commands::run_index(ctx, reference.as_deref(), json)
        }
        Commands::Lookup {
            reference,
            source,
            line,
        } => commands::run_lookup(ctx, &reference, &source, line),
        Commands::Resolve {
            reference,
            log_line,
        } => commands::run_resolve(ctx, &reference, log_line),
        Commands::Replay { script } => commands::run_replay(ctx, &script),
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn cli_error_user_displays_message() {
        let error = crate::error::CliError::user("no entry");
        assert_eq!(format!("{}", error), "no entry");
    }
}
