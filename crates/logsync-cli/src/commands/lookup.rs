//! Lookup and resolve commands: one step of the sync cycle, without an editor

use std::path::Path;

use colored::Colorize;
use logsync_index::{LocationIndex, scan_upward};

use super::Context;
use crate::error::{CliError, Result};

/// Run the lookup command: source line to reference block.
pub fn run_lookup(ctx: &Context, reference: &Path, source: &str, line: u32) -> Result<()> {
    let config = ctx.resolve(Some(reference))?;
    let text = logsync_fs::read_text(&config.reference_file)?;
    let index = LocationIndex::extract(
        &text,
        &config.path_pattern,
        &config.skip_pattern,
        config.path_style,
    );

    let path = config.normalize(source);
    if index.file(&path).is_none() {
        return Err(CliError::user(format!(
            "{path} is not mentioned in {}",
            config.reference_file
        )));
    }
    let entry = index
        .lookup(&path, line)
        .ok_or_else(|| CliError::user(format!("No entry for {path}:{line}")))?;

    println!(
        "{}:{} {} log lines {}-{} ({} line{})",
        path.as_str().cyan(),
        line,
        "->".dimmed(),
        entry.log_line + 1,
        entry.end_line(),
        entry.span,
        if entry.span == 1 { "" } else { "s" }
    );
    Ok(())
}

/// Run the resolve command: reference line to source location.
pub fn run_resolve(ctx: &Context, reference: &Path, log_line: usize) -> Result<()> {
    let config = ctx.resolve(Some(reference))?;
    let text = logsync_fs::read_text(&config.reference_file)?;
    let lines: Vec<&str> = text.lines().collect();

    let start = log_line
        .checked_sub(1)
        .filter(|i| *i < lines.len())
        .ok_or_else(|| {
            CliError::user(format!(
                "Line {log_line} is outside {} ({} lines)",
                config.reference_file,
                lines.len()
            ))
        })?;

    let (token_line, token) = scan_upward(start, &config.path_pattern, &config.skip_pattern, |i| {
        lines.get(i).copied()
    })
    .ok_or_else(|| CliError::user(format!("No source location at or above line {log_line}")))?;

    let path = token
        .normalized_path(config.path_style)
        .ok_or_else(|| CliError::user(format!("Empty path on line {}", token_line + 1)))?;

    println!(
        "{}:{} {} from log line {}",
        path.as_str().cyan(),
        token.line,
        "<-".dimmed(),
        token_line + 1
    );
    Ok(())
}
