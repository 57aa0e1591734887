//! Replay command: drive a SyncEngine from a script of editor actions

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use colored::Colorize;
use logsync_core::{Direction, Mode, SyncEngine, SyncOutcome, TracingSink};

use super::Context;
use crate::error::{CliError, Result};
use crate::headless::HeadlessHost;

/// One script step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Toggle,
    Bidirectional,
    Disable,
    /// Source path and 1-based line.
    Select(String, usize),
    /// 1-based reference-file line.
    Log(usize),
}

impl FromStr for Step {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        let words: Vec<&str> = s.split_whitespace().collect();
        let line = |word: &str| -> Result<usize> {
            word.parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| CliError::user(format!("Invalid line number '{word}'")))
        };
        match words.as_slice() {
            ["toggle"] => Ok(Step::Toggle),
            ["bidi"] => Ok(Step::Bidirectional),
            ["disable"] => Ok(Step::Disable),
            ["select", path, n] => Ok(Step::Select(path.to_string(), line(n)?)),
            ["log", n] => Ok(Step::Log(line(n)?)),
            _ => Err(CliError::user(format!("Unknown script command '{s}'"))),
        }
    }
}

/// Parse a script, skipping blank lines and `#` comments.
pub fn parse_script(text: &str) -> Result<Vec<(usize, Step)>> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(number, line)| {
            line.parse()
                .map(|step| (number, step))
                .map_err(|e| CliError::user(format!("Script line {number}: {e}")))
        })
        .collect()
}

/// Run the replay command
pub fn run_replay(ctx: &Context, script: &Path) -> Result<()> {
    let script_path = ctx.workspace.join(script);
    let text = std::fs::read_to_string(&script_path)?;
    let steps = parse_script(&text)?;
    let settings = ctx.settings()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(replay(ctx, &settings, steps))
}

async fn replay(
    ctx: &Context,
    settings: &logsync_core::Settings,
    steps: Vec<(usize, Step)>,
) -> Result<()> {
    let host = Arc::new(HeadlessHost::new());
    let engine = SyncEngine::new(
        host.clone(),
        Arc::new(TracingSink),
        settings,
        Some(&ctx.workspace),
    );
    if engine.has_configuration_error() {
        let errors = host.drain().join("; ");
        return Err(CliError::user(format!("Invalid settings: {errors}")));
    }

    for (number, step) in steps {
        println!("{} {}", ">".dimmed(), describe_step(&step).bold());
        let result = run_step(ctx, &host, &engine, &step).await;
        for entry in host.drain() {
            println!("  {entry}");
        }
        match result {
            Ok(summary) => println!("  {}", summary.green()),
            Err(e) => {
                return Err(CliError::user(format!("Script line {number}: {e}")));
            }
        }
    }

    engine.deactivate();
    Ok(())
}

async fn run_step(
    ctx: &Context,
    host: &HeadlessHost,
    engine: &SyncEngine,
    step: &Step,
) -> Result<String> {
    match step {
        Step::Toggle => {
            let mode = engine.toggle_mapping_mode().await?;
            Ok(format!("mode {mode}"))
        }
        Step::Bidirectional => {
            while engine.mode() != Mode::Bidirectional {
                engine.toggle_mapping_mode().await?;
            }
            Ok(format!("mode {}", Mode::Bidirectional))
        }
        Step::Disable => {
            engine.disable_mapping();
            Ok(format!("mode {}", engine.mode()))
        }
        Step::Select(path, line) => {
            let config = engine
                .config()
                .ok_or_else(|| CliError::user("No configuration loaded"))?;
            let view = host.open_view(&config.normalize(ctx.workspace.join(path)))?;
            let outcome = engine.handle_selection(host.set_cursor(view, line - 1)).await;
            Ok(describe_outcome(outcome))
        }
        Step::Log(line) => {
            let master = engine
                .snapshot()
                .master
                .ok_or_else(|| CliError::user("The reference file is not open; run 'toggle' first"))?;
            let outcome = engine
                .handle_selection(host.set_cursor(master, line - 1))
                .await;
            Ok(describe_outcome(outcome))
        }
    }
}

fn describe_step(step: &Step) -> String {
    match step {
        Step::Toggle => "toggle".to_string(),
        Step::Bidirectional => "bidi".to_string(),
        Step::Disable => "disable".to_string(),
        Step::Select(path, line) => format!("select {path} {line}"),
        Step::Log(line) => format!("log {line}"),
    }
}

fn describe_outcome(outcome: SyncOutcome) -> String {
    match outcome {
        SyncOutcome::Synced(Direction::AssistantToMaster) => "synced source -> log".to_string(),
        SyncOutcome::Synced(Direction::MasterToAssistant) => "synced log -> source".to_string(),
        SyncOutcome::Ignored(reason) => format!("ignored ({reason:?})"),
        other => format!("{other:?}").to_lowercase(),
    }
}
