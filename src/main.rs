//! Headless self-play runner (default binary).
//!
//! Stands in for the platform collaborator: drives a session by probing
//! adjacent swaps until one is accepted, printing one JSON line per resolved
//! move and a final serialized session. The engine itself performs no I/O.

use anyhow::{anyhow, Result};

use match3_engine::core::{EngineConfig, GameEngine, ResolutionOutcome, SwapOutcome};
use match3_engine::session::SavedSession;
use match3_engine::types::Position;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_args(&args)?;
    let mut engine =
        GameEngine::new(config).map_err(|e| anyhow!("invalid configuration: {}", e))?;

    let mut move_no = 0u32;
    while !engine.game_over() {
        let Some((a, b, outcome)) = play_first_available(&mut engine) else {
            // Unreachable while moves remain: the engine reshuffles itself
            // into a solvable state after every resolved swap.
            return Err(anyhow!("no playable swap found on a live board"));
        };
        move_no += 1;
        println!(
            "{}",
            serde_json::json!({
                "move": move_no,
                "from": [a.row, a.col],
                "to": [b.row, b.col],
                "cells_cleared": outcome.cells_cleared,
                "score_delta": outcome.score_delta,
                "waves": outcome.waves,
                "spawned": outcome.spawned.len(),
                "activations": outcome.activations.len(),
                "score": engine.score(),
                "moves_remaining": engine.moves_remaining(),
            })
        );
    }

    println!("{}", serde_json::to_string(&SavedSession::capture(&engine))?);
    Ok(())
}

/// Probe adjacent pairs in scan order and play the first accepted swap.
fn play_first_available(
    engine: &mut GameEngine,
) -> Option<(Position, Position, ResolutionOutcome)> {
    let size = engine.config().size;
    for row in 0..size {
        for col in 0..size {
            for (dr, dc) in [(0, 1), (1, 0)] {
                if row + dr >= size || col + dc >= size {
                    continue;
                }
                let a = Position::new(row, col);
                let b = Position::new(row + dr, col + dc);
                if let SwapOutcome::Resolved { outcome, .. } = engine.try_swap(a, b) {
                    return Some((a, b, outcome));
                }
            }
        }
    }
    None
}

fn parse_args(args: &[String]) -> Result<EngineConfig> {
    let mut config = EngineConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                config.seed = parse_value(args, i, "--seed")?;
            }
            "--size" => {
                i += 1;
                config.size = parse_value(args, i, "--size")?;
            }
            "--kinds" => {
                i += 1;
                config.ordinary_kinds = parse_value(args, i, "--kinds")?;
            }
            "--moves" => {
                i += 1;
                config.move_budget = parse_value(args, i, "--moves")?;
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(config)
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> Result<T> {
    let raw = args
        .get(i)
        .ok_or_else(|| anyhow!("missing value for {}", flag))?;
    raw.parse::<T>()
        .map_err(|_| anyhow!("invalid {} value: {}", flag, raw))
}
