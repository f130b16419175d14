//! Deadline-bounded move requests.
//!
//! A search runs synchronously, so it is moved onto tokio's blocking pool and
//! raced against `budget + grace`. Whatever goes wrong on the worker's side
//! (too slow, panicked, no answer, illegal answer) the caller still gets a
//! legal move: a uniformly random one. A worker that misses the deadline is
//! abandoned and winds down on its own clock.

use std::time::{Duration, Instant};

use chess_core::{Engine, Move, Position};
use random_engine::random_move;
use serde::Serialize;
use tokio::{task, time};
use tracing::{debug, info, warn};

/// Slack on top of the search budget before the worker is abandoned.
pub const DEFAULT_GRACE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveSource {
    Engine,
    Fallback,
}

/// A move obtained from [`request_move`].
#[derive(Debug, Clone, Copy)]
pub struct Dispatched {
    pub mv: Move,
    pub source: MoveSource,
    pub elapsed: Duration,
}

/// Asks `engine` for a move in `pos` and waits at most `budget + grace`.
///
/// Returns `None` only when `pos` has no legal move.
pub async fn request_move<E>(engine: &E, pos: &Position, budget: Duration, grace: Duration) -> Option<Dispatched>
where
    E: Engine + Clone + 'static,
{
    let legal = pos.legal_moves();
    if legal.is_empty() {
        return None;
    }

    let name = engine.name().to_string();
    let mut worker = engine.clone();
    let worker_pos = pos.clone();
    let started = Instant::now();

    let handle = task::spawn_blocking(move || worker.best_move(&worker_pos, budget));

    match time::timeout(budget + grace, handle).await {
        Ok(Ok(Some(mv))) if legal.contains(&mv) => {
            let elapsed = started.elapsed();
            debug!(bot = %name, %mv, elapsed_ms = elapsed.as_millis() as u64, "engine answered");
            return Some(Dispatched {
                mv,
                source: MoveSource::Engine,
                elapsed,
            });
        }
        Ok(Ok(Some(mv))) => warn!(bot = %name, %mv, "engine answered with an illegal move"),
        Ok(Ok(None)) => warn!(bot = %name, "engine returned no move in a live position"),
        Ok(Err(err)) => warn!(bot = %name, error = %err, "engine task failed"),
        Err(_) => warn!(
            bot = %name,
            budget_ms = budget.as_millis() as u64,
            grace_ms = grace.as_millis() as u64,
            "engine missed its deadline"
        ),
    }

    let mv = random_move(pos)?;
    info!(bot = %name, %mv, "playing random fallback move");
    Some(Dispatched {
        mv,
        source: MoveSource::Fallback,
        elapsed: started.elapsed(),
    })
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod dispatch_tests;
