//! Fixed-depth search benchmark for profiling with cargo-flamegraph.
//!
//! Usage:
//!   cargo flamegraph --profile profiling --example search_bench -p classical_engine -- [depth] [fen]

use std::env;
use std::time::{Duration, Instant};

use chess_core::{Engine, Position, SearchLimits};
use classical_engine::{ClassicalEngine, EngineConfig};

const BENCH_POSITIONS: &[(&str, &str)] = &[
    ("Starting position", "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
    ("Kiwipete", "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -"),
    ("Position 3", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -"),
    ("Position 4", "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq -"),
    ("Position 6", "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - -"),
];

fn main() {
    let args: Vec<String> = env::args().collect();
    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(4);

    let positions: Vec<(&str, &str)> = match args.get(2) {
        Some(fen) => vec![("Custom", fen.as_str())],
        None => BENCH_POSITIONS.to_vec(),
    };

    println!("=== Search Benchmark (depth {depth}) ===");
    println!();

    let mut total_nodes = 0u64;
    let mut total_time = Duration::ZERO;

    for (name, fen) in positions {
        let pos = match Position::from_fen(fen) {
            Ok(pos) => pos,
            Err(err) => {
                eprintln!("{name}: {err}");
                continue;
            }
        };
        let mut engine = ClassicalEngine::with_config(EngineConfig {
            max_depth: depth,
            ..EngineConfig::default()
        });

        let start = Instant::now();
        let result = engine.search(&pos, SearchLimits::depth(depth));
        let elapsed = start.elapsed();

        total_nodes += result.nodes;
        total_time += elapsed;

        let best = result.best_move.map_or_else(|| "none".to_string(), |mv| mv.to_string());
        println!(
            "{name:.<30} {best:<6} {:>7} cp {:>10} nodes in {elapsed:>8.3?} ({:>9.0} nps)",
            result.score,
            result.nodes,
            nps(result.nodes, elapsed)
        );
    }

    println!();
    println!("TOTAL: {total_nodes} nodes in {total_time:.3?} ({:.0} nps)", nps(total_nodes, total_time));
}

fn nps(nodes: u64, elapsed: Duration) -> f64 {
    if elapsed.as_secs_f64() > 0.0 {
        nodes as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    }
}
