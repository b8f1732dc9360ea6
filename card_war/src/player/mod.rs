//! Player controllers: the sources of "ready to draw" signals.
//!
//! This module implements:
//! - `PlayerController`: the single seam the game controller awaits each round
//! - `HumanController`: resolved by a user interaction, one pending request at a time
//! - `BotController`: resolved after a random (or fixed) delay
//!
//! Both controllers let a newer request supersede an older one, and both
//! honor the round's shared cancellation token.

pub mod bot;
pub mod human;

pub use bot::{BotController, BotDelay};
pub use human::HumanController;

use crate::game::errors::GameResult;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Source of a player's "ready to draw" signal
#[async_trait]
pub trait PlayerController: Send + Sync {
    /// Resolve once the player is ready to have a card drawn for them.
    ///
    /// Returns [`GameError::Cancelled`](crate::GameError::Cancelled) when
    /// `cancel` fires or a newer request supersedes this one.
    async fn request_draw(&self, cancel: &CancellationToken) -> GameResult<()>;
}
