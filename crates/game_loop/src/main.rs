//! Bot-vs-bot game from the command line.
//!
//! Settings come from an optional TOML file; flags override it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chess_core::Engine;
use clap::Parser;
use classical_engine::EvalProfile;
use game_loop::{BotKind, GameRunner, MoveSource, PlayConfig, Side};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play one game between two bots", long_about = None)]
struct Args {
    /// TOML file with [game], [white] and [black] tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// newborn, random or minimax
    #[arg(long)]
    white: Option<BotKind>,

    /// newborn, random or minimax
    #[arg(long)]
    black: Option<BotKind>,

    /// Start position
    #[arg(long)]
    fen: Option<String>,

    #[arg(long)]
    max_moves: Option<u32>,

    /// Search depth for both minimax sides
    #[arg(short, long)]
    depth: Option<u8>,

    /// Per-move budget for both minimax sides
    #[arg(long)]
    move_time_ms: Option<u64>,

    /// balanced, material or aggressive
    #[arg(long)]
    profile: Option<EvalProfile>,

    /// Write the game record as JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

impl Args {
    fn apply(&self, config: &mut PlayConfig) {
        if let Some(kind) = self.white {
            config.white.kind = kind;
        }
        if let Some(kind) = self.black {
            config.black.kind = kind;
        }
        if let Some(fen) = &self.fen {
            config.game.fen = fen.clone();
        }
        if let Some(max_moves) = self.max_moves {
            config.game.max_moves = max_moves;
        }
        for spec in [&mut config.white, &mut config.black] {
            if let Some(depth) = self.depth {
                spec.search.max_depth = depth;
            }
            if let Some(move_time_ms) = self.move_time_ms {
                spec.search.move_time_ms = move_time_ms;
            }
            if let Some(profile) = self.profile {
                spec.search.profile = profile;
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PlayConfig::load(path)?,
        None => PlayConfig::default(),
    };
    args.apply(&mut config);
    config.validate()?;

    let start = config.start_position()?;
    let mut runner = GameRunner::from_config(&config);

    println!("=== {} vs {} ===", runner.white().name(), runner.black().name());
    let record = runner
        .play_with(start, |played| {
            let number = (played.ply + 1) / 2;
            let dots = if played.side == Side::White { "." } else { "..." };
            let marker = if played.source == MoveSource::Fallback { " (random fallback)" } else { "" };
            println!("{number}{dots} {} [{} ms]{marker}", played.uci, played.elapsed_ms);
        })
        .await?;

    println!();
    println!("Result: {} ({:?})", record.result, record.end);
    if record.fallback_count() > 0 {
        println!("Fallback moves: {}", record.fallback_count());
    }

    if let Some(path) = &args.json {
        record
            .save(path)
            .with_context(|| format!("saving game record to {}", path.display()))?;
    }
    Ok(())
}
