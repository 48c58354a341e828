use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::core::{Board, TurnOutcome};
use crate::types::{Coord, Direction};

pub const USAGE: &str = "\
usage: crystal-grid [--config <file>] [--seed <n>] [--swap x,y,dir]... [--json] [--trace]

  --config <file>   board config JSON (default: CRYSTAL_GRID_* env over defaults)
  --seed <n>        override the fill seed
  --swap x,y,dir    swap the crystal at (x, y) toward dir (up/down/left/right)
  --json            print events and the final snapshot as JSON lines
  --trace           trace the turn cycle on stderr";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub seed: Option<u32>,
    pub swaps: Vec<(Coord, Direction)>,
    pub json: bool,
    pub trace: bool,
    pub help: bool,
}

pub fn parse_cli_args(args: &[String]) -> Result<CliOptions> {
    let mut opts = CliOptions::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --config"))?;
                opts.config = Some(PathBuf::from(v));
            }
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                let seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
                opts.seed = Some(seed);
            }
            "--swap" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --swap"))?;
                opts.swaps.push(parse_swap(v)?);
            }
            "--json" => opts.json = true,
            "--trace" => opts.trace = true,
            "-h" | "--help" => opts.help = true,
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(opts)
}

/// Parse `x,y,dir`, e.g. `3,4,left`.
pub fn parse_swap(s: &str) -> Result<(Coord, Direction)> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, dir] = parts.as_slice() else {
        return Err(anyhow!("--swap expects x,y,dir (got '{}')", s));
    };
    let x = x
        .parse::<u8>()
        .map_err(|_| anyhow!("invalid swap x: {}", x))?;
    let y = y
        .parse::<u8>()
        .map_err(|_| anyhow!("invalid swap y: {}", y))?;
    let dir = Direction::from_str(dir).ok_or_else(|| anyhow!("invalid swap direction: {}", dir))?;
    Ok((Coord::new(x, y), dir))
}

/// Board as text, one row per line with column and row labels.
pub fn render_board(board: &Board) -> String {
    let mut out = String::from("   ");
    for x in 0..board.width() {
        out.push_str(&format!("{}", x % 10));
    }
    out.push('\n');
    for (y, row) in board.to_rows().iter().enumerate() {
        out.push_str(&format!("{:>2} {}\n", y, row));
    }
    out
}

pub fn describe_outcome(outcome: &TurnOutcome) -> String {
    match outcome {
        TurnOutcome::RolledBack(record) => {
            format!("no match, rolled back {} <-> {}", record.from, record.to)
        }
        TurnOutcome::AwaitingDestruction { pending } => {
            format!("waiting on {} destruction(s)", pending)
        }
        TurnOutcome::Settled { passes, destroyed } => {
            format!("settled after {} pass(es), {} destroyed", passes, destroyed)
        }
    }
}

pub fn outcome_json(outcome: &TurnOutcome) -> serde_json::Value {
    match outcome {
        TurnOutcome::RolledBack(record) => serde_json::json!({
            "type": "outcome",
            "result": "rolled_back",
            "record": record,
        }),
        TurnOutcome::AwaitingDestruction { pending } => serde_json::json!({
            "type": "outcome",
            "result": "awaiting_destruction",
            "pending": pending,
        }),
        TurnOutcome::Settled { passes, destroyed } => serde_json::json!({
            "type": "outcome",
            "result": "settled",
            "passes": passes,
            "destroyed": destroyed,
        }),
    }
}
