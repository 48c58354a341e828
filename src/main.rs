//! Scripted crystal grid runner (default binary).
//!
//! Builds a board from config, applies the `--swap` moves in order and prints
//! the board after each one. With `--json` every observer event and the final
//! snapshot go to stdout as JSON lines instead.

use anyhow::{Context, Result};

use crystal_grid::cli::{describe_outcome, outcome_json, parse_cli_args, render_board, USAGE};
use crystal_grid::core::{BoardConfig, RecordingObserver, TurnError};
use crystal_grid::engine::trace::{enable_trace, init_from_env};
use crystal_grid::engine::TraceObserver;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = parse_cli_args(&args)?;
    if opts.help {
        println!("{}", USAGE);
        return Ok(());
    }

    if opts.trace {
        enable_trace();
    } else {
        init_from_env();
    }

    let mut config = match &opts.config {
        Some(path) => BoardConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => BoardConfig::from_env().context("invalid CRYSTAL_GRID_* environment")?,
    };
    if let Some(seed) = opts.seed {
        config.seed = seed;
    }

    let mut turn = config
        .build_controller(TraceObserver::new(RecordingObserver::new()))
        .context("failed to build board")?;

    if !opts.json {
        println!("{}", render_board(turn.board()));
    }

    for (at, direction) in &opts.swaps {
        let result = turn.request_swap(*at, *direction);
        let events = turn.observer_mut().inner_mut().take();
        if opts.json {
            for event in &events {
                println!("{}", serde_json::to_string(event)?);
            }
        }

        match result {
            Ok(outcome) if opts.json => {
                println!("{}", serde_json::to_string(&outcome_json(&outcome))?);
            }
            Ok(outcome) => {
                println!("swap {} {}: {}", at, direction.as_str(), describe_outcome(&outcome));
                println!("{}", render_board(turn.board()));
            }
            Err(TurnError::Rejected(reason)) => {
                if opts.json {
                    let line = serde_json::json!({
                        "type": "rejected",
                        "at": at,
                        "direction": direction,
                        "reason": reason.to_string(),
                    });
                    println!("{}", line);
                } else {
                    println!("swap {} {}: rejected ({})", at, direction.as_str(), reason);
                }
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("swap {} {} failed", at, direction.as_str()));
            }
        }
    }

    if opts.json {
        println!("{}", serde_json::to_string(&turn.snapshot())?);
    }
    Ok(())
}
