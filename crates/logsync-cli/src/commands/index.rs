//! Index command implementation

use std::path::Path;

use colored::Colorize;
use logsync_index::LocationIndex;

use super::Context;
use crate::error::Result;

/// Run the index command
pub fn run_index(ctx: &Context, reference: Option<&Path>, json: bool) -> Result<()> {
    let config = ctx.resolve(reference)?;
    let text = logsync_fs::read_text(&config.reference_file)?;
    let index = LocationIndex::extract(
        &text,
        &config.path_pattern,
        &config.skip_pattern,
        config.path_style,
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&index)?);
        return Ok(());
    }

    println!("{}", config.reference_file.as_str().bold());
    println!();

    if index.is_empty() {
        println!("  {} (pattern {})", "No locations".dimmed(), config.path_pattern.as_str().cyan());
        return Ok(());
    }

    for (path, file) in index.files() {
        println!("{}:", path.as_str().cyan().bold());
        for (line, entry) in file.iter() {
            println!(
                "  {:>6} {} log {}-{}",
                line,
                "->".dimmed(),
                entry.log_line + 1,
                entry.end_line()
            );
        }
    }
    println!();
    println!(
        "{} {} locations in {} files",
        "Total:".dimmed(),
        index.len(),
        index.files().count()
    );

    Ok(())
}
