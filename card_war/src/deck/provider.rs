//! Stateful facade over a [`DeckGateway`] holding the active deck.

use super::{
    errors::{DeckError, DeckResult},
    gateway::{DeckGateway, validate_count},
    models::DeckSession,
};
use crate::game::entities::Card;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Owns the one deck session a game draws from.
///
/// Every mutating call takes `&mut self`, so a provider can never have two
/// draws or reshuffles in flight at once. The remaining count is always the
/// one the gateway last reported.
pub struct DeckProvider {
    gateway: Arc<dyn DeckGateway>,
    session: Option<DeckSession>,
}

impl DeckProvider {
    pub fn new(gateway: Arc<dyn DeckGateway>) -> Self {
        Self {
            gateway,
            session: None,
        }
    }

    /// Create and shuffle a fresh deck, replacing any previous session.
    pub async fn initialize(&mut self, cancel: &CancellationToken) -> DeckResult<()> {
        let session = self.gateway.create_and_shuffle(cancel).await?;
        log::debug!(
            "Deck {} ready with {} cards",
            session.deck_id,
            session.remaining
        );
        self.session = Some(session);
        Ok(())
    }

    /// Put every card back into the current deck and shuffle it.
    pub async fn reshuffle(&mut self, cancel: &CancellationToken) -> DeckResult<()> {
        let deck_id = self.current()?.deck_id.clone();
        let session = self.gateway.reshuffle(&deck_id, cancel).await?;
        self.session = Some(session);
        Ok(())
    }

    /// Draw `count` cards, preserving dealt order.
    pub async fn draw_cards(
        &mut self,
        count: u32,
        cancel: &CancellationToken,
    ) -> DeckResult<Vec<Card>> {
        validate_count(count)?;
        let deck_id = self.current()?.deck_id.clone();

        let drawn = self.gateway.draw(&deck_id, count, cancel).await?;
        if let Some(session) = self.session.as_mut() {
            session.remaining = drawn.remaining;
        }

        Ok(drawn.cards)
    }

    pub async fn draw_card(&mut self, cancel: &CancellationToken) -> DeckResult<Vec<Card>> {
        self.draw_cards(1, cancel).await
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    pub fn deck_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.deck_id.as_str())
    }

    pub fn remaining(&self) -> Option<u32> {
        self.session.as_ref().map(|s| s.remaining)
    }

    fn current(&self) -> DeckResult<&DeckSession> {
        self.session.as_ref().ok_or(DeckError::NotInitialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        deck::testing::ScriptedGateway,
        game::entities::{Rank, Suit},
    };
    use std::sync::atomic::Ordering;

    fn provider() -> (DeckProvider, Arc<ScriptedGateway>) {
        let gateway = Arc::new(ScriptedGateway::default());
        (DeckProvider::new(gateway.clone()), gateway)
    }

    #[tokio::test]
    async fn test_initialize_stores_session() {
        let (mut deck, gateway) = provider();
        deck.initialize(&CancellationToken::new()).await.unwrap();

        assert!(deck.is_initialized());
        assert_eq!(deck.deck_id(), Some(ScriptedGateway::DECK_ID));
        assert_eq!(deck.remaining(), Some(52));
        assert_eq!(gateway.create_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_draw_before_initialize_fails() {
        let (mut deck, gateway) = provider();
        let result = deck.draw_cards(2, &CancellationToken::new()).await;

        assert!(matches!(result, Err(DeckError::NotInitialized)));
        assert_eq!(gateway.draw_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_reshuffle_before_initialize_fails() {
        let (mut deck, _) = provider();
        let result = deck.reshuffle(&CancellationToken::new()).await;
        assert!(matches!(result, Err(DeckError::NotInitialized)));
    }

    #[tokio::test]
    async fn test_zero_count_is_invalid() {
        let (mut deck, gateway) = provider();
        deck.initialize(&CancellationToken::new()).await.unwrap();

        let result = deck.draw_cards(0, &CancellationToken::new()).await;
        assert!(matches!(result, Err(DeckError::InvalidArgument(_))));
        assert_eq!(gateway.draw_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_draw_returns_cards_and_tracks_remaining() {
        let (mut deck, gateway) = provider();
        let cards = vec![
            Card::new(Rank::Two, Suit::Hearts),
            Card::new(Rank::Ace, Suit::Spades),
        ];
        gateway.push_draw(Ok(cards.clone()));
        let cancel = CancellationToken::new();
        deck.initialize(&cancel).await.unwrap();

        let drawn = deck.draw_cards(2, &cancel).await.unwrap();
        assert_eq!(drawn, cards);
        assert_eq!(deck.remaining(), Some(50));
        assert_eq!(gateway.drawn_counts(), vec![2]);
    }

    #[tokio::test]
    async fn test_default_draw_is_one_card() {
        let (mut deck, gateway) = provider();
        gateway.push_draw(Ok(vec![Card::new(Rank::King, Suit::Clubs)]));
        let cancel = CancellationToken::new();
        deck.initialize(&cancel).await.unwrap();

        let drawn = deck.draw_card(&cancel).await.unwrap();
        assert_eq!(drawn.len(), 1);
        assert_eq!(gateway.drawn_counts(), vec![1]);
    }

    #[tokio::test]
    async fn test_reshuffle_restores_remaining() {
        let (mut deck, gateway) = provider();
        gateway.push_draw(Ok(vec![Card::new(Rank::Four, Suit::Diamonds); 3]));
        let cancel = CancellationToken::new();
        deck.initialize(&cancel).await.unwrap();
        deck.draw_cards(3, &cancel).await.unwrap();
        assert_eq!(deck.remaining(), Some(49));

        deck.reshuffle(&cancel).await.unwrap();
        assert_eq!(deck.remaining(), Some(52));
        assert_eq!(deck.deck_id(), Some(ScriptedGateway::DECK_ID));
        assert_eq!(gateway.reshuffle_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_draw_keeps_previous_remaining() {
        let (mut deck, gateway) = provider();
        gateway.push_draw(Err(DeckError::Transport("connection reset".to_string())));
        let cancel = CancellationToken::new();
        deck.initialize(&cancel).await.unwrap();

        let result = deck.draw_cards(2, &cancel).await;
        assert!(matches!(result, Err(DeckError::Transport(_))));
        assert_eq!(deck.remaining(), Some(52));
    }

    #[tokio::test]
    async fn test_cancelled_draw_propagates() {
        let (mut deck, _) = provider();
        let cancel = CancellationToken::new();
        deck.initialize(&cancel).await.unwrap();
        cancel.cancel();

        let result = deck.draw_cards(1, &cancel).await;
        assert!(matches!(result, Err(DeckError::Cancelled)));
    }
}
