//! Game loop for pitting bots against each other.
//!
//! This crate provides:
//! - The closed set of playable [`Bot`]s
//! - [`request_move`], which runs a bot on the blocking pool under an outer
//!   timeout and falls back to a random legal move
//! - [`GameRunner`], which plays one game to its end and records it
//!
//! # Usage
//!
//! ```bash
//! # Minimax against the random bot from the start position
//! cargo run -p game_loop --bin play -- --white minimax --black random
//!
//! # Settings from a file, record written as JSON
//! cargo run -p game_loop --bin play -- --config play.toml --json game.json
//! ```

mod bots;
mod config;
mod dispatch;
mod error;
mod runner;

pub use bots::*;
pub use config::*;
pub use dispatch::*;
pub use error::PlayError;
pub use runner::*;
