//! In-process deck service with the same behavior as the remote API.
//!
//! Used for offline play and as a deterministic backend in tests.

use super::{
    errors::{DeckError, DeckResult},
    gateway::{DeckGateway, validate_count, validate_deck_id},
    models::{DeckSession, DrawnCards, STANDARD_DECK_SIZE},
};
use crate::game::entities::{Card, Rank, Suit};
use async_trait::async_trait;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

#[derive(Debug)]
struct LocalDeck {
    cards: Vec<Card>,
    deck_idx: usize,
}

impl LocalDeck {
    fn new(rng: &mut StdRng) -> Self {
        let mut cards = Vec::with_capacity(STANDARD_DECK_SIZE as usize);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        let mut deck = Self { cards, deck_idx: 0 };
        deck.shuffle(rng);
        deck
    }

    fn shuffle(&mut self, rng: &mut StdRng) {
        self.cards.shuffle(rng);
        self.deck_idx = 0;
    }

    fn remaining(&self) -> u32 {
        (self.cards.len() - self.deck_idx) as u32
    }

    fn session(&self, deck_id: &str) -> DeckSession {
        DeckSession {
            deck_id: deck_id.to_string(),
            remaining: self.remaining(),
        }
    }
}

/// Deck service that keeps every deck in memory
#[derive(Debug)]
pub struct LocalDeckGateway {
    decks: Mutex<HashMap<String, LocalDeck>>,
    rng: Mutex<StdRng>,
}

impl Default for LocalDeckGateway {
    fn default() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }
}

impl LocalDeckGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministic shuffles, for reproducible games.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            decks: Mutex::new(HashMap::new()),
            rng: Mutex::new(rng),
        }
    }

    fn ensure_live(cancel: &CancellationToken) -> DeckResult<()> {
        if cancel.is_cancelled() {
            return Err(DeckError::Cancelled);
        }
        Ok(())
    }

    fn unknown_deck(deck_id: &str) -> DeckError {
        DeckError::Protocol(format!("Deck ID {deck_id} does not exist."))
    }
}

#[async_trait]
impl DeckGateway for LocalDeckGateway {
    async fn create_and_shuffle(&self, cancel: &CancellationToken) -> DeckResult<DeckSession> {
        Self::ensure_live(cancel)?;

        let deck_id = Uuid::new_v4().simple().to_string()[..12].to_string();
        let deck = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            LocalDeck::new(&mut rng)
        };
        let session = deck.session(&deck_id);

        self.decks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(deck_id, deck);

        log::debug!("Created local deck {}", session.deck_id);
        Ok(session)
    }

    async fn reshuffle(
        &self,
        deck_id: &str,
        cancel: &CancellationToken,
    ) -> DeckResult<DeckSession> {
        validate_deck_id(deck_id)?;
        Self::ensure_live(cancel)?;

        let mut decks = self.decks.lock().unwrap_or_else(PoisonError::into_inner);
        let deck = decks
            .get_mut(deck_id)
            .ok_or_else(|| Self::unknown_deck(deck_id))?;
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        deck.shuffle(&mut rng);

        Ok(deck.session(deck_id))
    }

    async fn draw(
        &self,
        deck_id: &str,
        count: u32,
        cancel: &CancellationToken,
    ) -> DeckResult<DrawnCards> {
        validate_deck_id(deck_id)?;
        validate_count(count)?;
        Self::ensure_live(cancel)?;

        let mut decks = self.decks.lock().unwrap_or_else(PoisonError::into_inner);
        let deck = decks
            .get_mut(deck_id)
            .ok_or_else(|| Self::unknown_deck(deck_id))?;

        if count > deck.remaining() {
            return Err(DeckError::Protocol(format!(
                "Failed to draw cards: Not enough cards remaining to draw {count} additional"
            )));
        }

        let start = deck.deck_idx;
        deck.deck_idx += count as usize;
        Ok(DrawnCards {
            cards: deck.cards[start..deck.deck_idx].to_vec(),
            remaining: deck.remaining(),
        })
    }
}
