//! War game engine: domain model, rules and the round orchestrator.
//!
//! This module provides:
//! - Cards, players and the per-game state
//! - The `GameMode` rule strategy and its simple war implementation
//! - `GameController`, which synchronizes players, deals and scores rounds
//! - `run_session`, a loop that plays a game to the end

pub mod controller;
pub mod entities;
pub mod errors;
pub mod functional;
pub mod mode;
pub mod session;

pub use controller::{GameController, RoundOutcome, RoundResult};
pub use errors::{GameError, GameResult};
pub use mode::{DEFAULT_MAX_ROUNDS, DEFAULT_POINTS_PER_ROUND, GameMode, GameResolution, SimpleWar};
pub use session::run_session;
