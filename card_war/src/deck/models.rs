//! Deck session values and the Deck of Cards API wire format.

use super::errors::{DeckError, DeckResult};
use crate::game::entities::{Card, ParseCardError};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Cards in a standard deck
pub const STANDARD_DECK_SIZE: u32 = 52;

/// Remote deck identity and how many cards it has left
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeckSession {
    pub deck_id: String,
    pub remaining: u32,
}

/// Cards returned by a draw, in the order the remote dealt them
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DrawnCards {
    pub cards: Vec<Card>,
    pub remaining: u32,
}

/// Envelope returned by the create/shuffle endpoints
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DeckResponse {
    pub success: bool,
    #[serde(default)]
    pub deck_id: String,
    #[serde(default)]
    pub shuffled: Option<bool>,
    #[serde(default)]
    pub remaining: u32,
    #[serde(default)]
    pub error: Option<String>,
}

/// Envelope returned by the draw endpoint
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DrawResponse {
    pub success: bool,
    #[serde(default)]
    pub deck_id: String,
    #[serde(default)]
    pub cards: Vec<ApiCard>,
    #[serde(default)]
    pub remaining: u32,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ApiCard {
    pub code: String,
    pub value: String,
    pub suit: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub images: Option<ApiCardImages>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ApiCardImages {
    pub svg: Option<String>,
    pub png: Option<String>,
}

impl ApiCard {
    /// Decode the card from its `value` and `suit` fields.
    pub fn to_card(&self) -> Result<Card, ParseCardError> {
        Ok(Card::new(self.value.parse()?, self.suit.parse()?))
    }
}

fn failure(operation: &str, error: Option<&str>) -> DeckError {
    DeckError::Protocol(format!(
        "Failed to {operation}: {}",
        error.unwrap_or("Unknown error")
    ))
}

impl DeckResponse {
    /// Turn a create/reshuffle response into a session.
    ///
    /// `operation` only shows up in error messages.
    pub fn into_session(self, operation: &str) -> DeckResult<DeckSession> {
        if !self.success {
            return Err(failure(operation, self.error.as_deref()));
        }
        if self.deck_id.trim().is_empty() {
            return Err(DeckError::Protocol(format!(
                "Failed to {operation}: response is missing deck_id"
            )));
        }

        Ok(DeckSession {
            deck_id: self.deck_id,
            remaining: self.remaining,
        })
    }
}

impl DrawResponse {
    /// Decode every card in the response, keeping the dealt order.
    pub fn into_drawn_cards(self) -> DeckResult<DrawnCards> {
        if !self.success {
            return Err(failure("draw cards", self.error.as_deref()));
        }

        let cards = self
            .cards
            .iter()
            .map(ApiCard::to_card)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DrawnCards {
            cards,
            remaining: self.remaining,
        })
    }
}

/// Parse a JSON response body. Empty bodies and malformed JSON are protocol
/// errors.
pub fn parse_response<T: DeserializeOwned>(body: &str) -> DeckResult<T> {
    if body.trim().is_empty() {
        return Err(DeckError::Protocol(
            "Empty response received from API".to_string(),
        ));
    }

    serde_json::from_str(body)
        .map_err(|e| DeckError::Protocol(format!("Failed to parse JSON response: {e}")))
}
