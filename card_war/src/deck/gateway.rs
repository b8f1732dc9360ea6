//! Contract for remote shuffle/draw services.

use super::{
    errors::{DeckError, DeckResult},
    models::{DeckSession, DrawnCards},
};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// A stateless shuffle/draw service. The deck id is passed on every call;
/// implementations never remember which deck the caller is using.
#[async_trait]
pub trait DeckGateway: Send + Sync {
    /// Provision a new, fully shuffled 52-card deck.
    async fn create_and_shuffle(&self, cancel: &CancellationToken) -> DeckResult<DeckSession>;

    /// Return every card to `deck_id` and shuffle it again.
    async fn reshuffle(&self, deck_id: &str, cancel: &CancellationToken)
    -> DeckResult<DeckSession>;

    /// Draw `count` cards from `deck_id`.
    async fn draw(
        &self,
        deck_id: &str,
        count: u32,
        cancel: &CancellationToken,
    ) -> DeckResult<DrawnCards>;
}

/// Reject empty or whitespace-only deck ids.
pub fn validate_deck_id(deck_id: &str) -> DeckResult<()> {
    if deck_id.trim().is_empty() {
        return Err(DeckError::InvalidArgument(
            "Deck ID cannot be null or empty".to_string(),
        ));
    }
    Ok(())
}

/// Reject draws of zero cards.
pub fn validate_count(count: u32) -> DeckResult<()> {
    if count == 0 {
        return Err(DeckError::InvalidArgument(
            "Count must be greater than 0".to_string(),
        ));
    }
    Ok(())
}
