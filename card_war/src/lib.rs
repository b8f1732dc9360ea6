//! # Card War
//!
//! A "War"-style card game engine. Each round every player signals that
//! they're ready, one card per player is drawn from a shared remote deck,
//! and the unique highest rank takes the round. After a fixed number of
//! rounds the player with the unique highest score wins.
//!
//! ## Architecture
//!
//! A game moves through four phases:
//!
//! - **NotStarted**: configured but no deck yet
//! - **Playing**: rounds are being dealt
//! - **GameOver**: decided but not yet announced
//! - **Finished**: announced, terminal
//!
//! ## Core Modules
//!
//! - [`deck`]: deck gateway contract, wire decoding and the deck provider
//! - [`player`]: human and bot player controllers
//! - [`game`]: domain model, rules and the round orchestrator
//! - [`view`]: presentation contract and serialized event queue
//!
//! ## Example
//!
//! ```
//! use card_war::{
//!     BotController, BotDelay, DeckProvider, GameController, LocalDeckGateway, Player,
//!     PlayerController, SimpleWar, ViewQueue, run_session,
//! };
//! use std::{sync::Arc, time::Duration};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bot = || -> Arc<dyn PlayerController> {
//!         Arc::new(BotController::new(BotDelay::Fixed(Duration::ZERO)))
//!     };
//!     let (view, _events) = ViewQueue::new();
//!     let mut game = GameController::new(
//!         DeckProvider::new(Arc::new(LocalDeckGateway::new())),
//!         vec![Player::new("a", "Alice"), Player::new("b", "Bob")],
//!         vec![bot(), bot()],
//!         Arc::new(view),
//!         SimpleWar::default(),
//!     )?;
//!
//!     run_session(&mut game, &CancellationToken::new()).await?;
//!     assert_eq!(game.state().current_round, 8);
//!     Ok(())
//! }
//! ```

/// Remote deck contract, wire DTOs and the deck provider.
pub mod deck;
pub use deck::{DeckError, DeckGateway, DeckProvider, DeckResult, LocalDeckGateway};

/// Game model, rules and orchestration.
pub mod game;
pub use game::{
    GameController, GameError, GameMode, GameResolution, GameResult, RoundOutcome, RoundResult,
    SimpleWar,
    entities::{self, Card, GamePhase, GameState, Player, Rank, Suit},
    functional, run_session,
};

/// Sources of per-round "ready" signals.
pub mod player;
pub use player::{BotController, BotDelay, HumanController, PlayerController};

/// Presentation contract.
pub mod view;
pub use view::{GameView, ViewEvent, ViewQueue, ViewRenderer, drain_view_events};
