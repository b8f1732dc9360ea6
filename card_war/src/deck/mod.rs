//! Deck module: remote deck contract, wire decoding and the deck provider.
//!
//! This module implements:
//! - `DeckGateway`: async contract for shuffle/draw services
//! - Wire DTOs for the Deck of Cards API and their decoding into cards
//! - `DeckProvider`: the single deck session a game draws from
//! - `LocalDeckGateway`: in-memory service for offline play and tests
//!
//! ## Example
//!
//! ```
//! use card_war::deck::{DeckProvider, LocalDeckGateway};
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut deck = DeckProvider::new(Arc::new(LocalDeckGateway::new()));
//!     let cancel = CancellationToken::new();
//!
//!     deck.initialize(&cancel).await?;
//!     let cards = deck.draw_cards(2, &cancel).await?;
//!     assert_eq!(cards.len(), 2);
//!     assert_eq!(deck.remaining(), Some(50));
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod gateway;
pub mod local;
pub mod models;
pub mod provider;

pub use errors::{DeckError, DeckResult};
pub use gateway::{DeckGateway, validate_count, validate_deck_id};
pub use local::LocalDeckGateway;
pub use models::{
    ApiCard, DeckResponse, DeckSession, DrawResponse, DrawnCards, STANDARD_DECK_SIZE,
    parse_response,
};
pub use provider::DeckProvider;
