//! Deck error types.

use crate::game::entities::ParseCardError;
use thiserror::Error;

/// Errors raised by deck gateways and the deck provider
#[derive(Debug, Error)]
pub enum DeckError {
    /// Caller passed a blank deck id or a non-positive count
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Draw or reshuffle before the deck was created
    #[error("Deck not initialized")]
    NotInitialized,

    /// The request never produced a response (connection, timeout, ...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote answered, but reported failure or sent something unusable
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// A card in the response couldn't be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] ParseCardError),

    /// The operation was cancelled while in flight
    #[error("Deck operation cancelled")]
    Cancelled,
}

/// Result type for deck operations
pub type DeckResult<T> = Result<T, DeckError>;
