//! Game error types.

use crate::deck::DeckError;
use thiserror::Error;

/// Errors surfaced by the game controller and player controllers
#[derive(Debug, Error)]
pub enum GameError {
    /// Construction or call with inconsistent arguments
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A draw request, round, or deck call was cancelled
    #[error("Operation cancelled")]
    Cancelled,

    /// The deck failed for a reason other than cancellation
    #[error("Deck error: {0}")]
    Deck(DeckError),
}

impl From<DeckError> for GameError {
    fn from(value: DeckError) -> Self {
        match value {
            DeckError::Cancelled => Self::Cancelled,
            other => Self::Deck(other),
        }
    }
}

/// Result type for game operations
pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_cancellation_maps_to_cancelled() {
        let err: GameError = DeckError::Cancelled.into();
        assert!(matches!(err, GameError::Cancelled));
    }

    #[test]
    fn test_deck_failure_is_wrapped() {
        let err: GameError = DeckError::NotInitialized.into();
        assert!(matches!(err, GameError::Deck(DeckError::NotInitialized)));
        assert_eq!(err.to_string(), "Deck error: Deck not initialized");
    }
}
