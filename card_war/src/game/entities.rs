use super::mode::DEFAULT_MAX_ROUNDS;
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt, str::FromStr};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Self; 4] = [Self::Spades, Self::Hearts, Self::Diamonds, Self::Clubs];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Spades => "♠",
            Self::Hearts => "♥",
            Self::Diamonds => "♦",
            Self::Clubs => "♣",
        };
        write!(f, "{repr}")
    }
}

/// Error returned when a suit or rank string from the deck API isn't one
/// we know about.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ParseCardError {
    #[error("unknown suit: {0}")]
    UnknownSuit(String),
    #[error("unknown card value: {0}")]
    UnknownRank(String),
}

impl FromStr for Suit {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SPADES" => Ok(Self::Spades),
            "HEARTS" => Ok(Self::Hearts),
            "DIAMONDS" => Ok(Self::Diamonds),
            "CLUBS" => Ok(Self::Clubs),
            _ => Err(ParseCardError::UnknownSuit(s.to_string())),
        }
    }
}

/// Card rank. Aces are high.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[repr(u8)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Self; 13] = [
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
        Self::Ace,
    ];

    /// Numeric value used for comparisons (two=2 ... ace=14).
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Jack => write!(f, "J"),
            Self::Queen => write!(f, "Q"),
            Self::King => write!(f, "K"),
            Self::Ace => write!(f, "A"),
            other => write!(f, "{}", other.value()),
        }
    }
}

impl FromStr for Rank {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rank = match s.trim().to_ascii_uppercase().as_str() {
            "2" => Self::Two,
            "3" => Self::Three,
            "4" => Self::Four,
            "5" => Self::Five,
            "6" => Self::Six,
            "7" => Self::Seven,
            "8" => Self::Eight,
            "9" => Self::Nine,
            "10" => Self::Ten,
            "JACK" => Self::Jack,
            "QUEEN" => Self::Queen,
            "KING" => Self::King,
            "ACE" => Self::Ace,
            _ => return Err(ParseCardError::UnknownRank(s.to_string())),
        };
        Ok(rank)
    }
}

/// A playing card. Equality is structural; ordering is only available
/// through the explicit comparators since the game never compares suits
/// when deciding a round.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Compare two cards by rank only.
    pub fn cmp_rank(a: &Self, b: &Self) -> Ordering {
        a.rank.cmp(&b.rank)
    }

    /// Compare two cards by suit declaration order only.
    pub fn cmp_suit(a: &Self, b: &Self) -> Ordering {
        a.suit.cmp(&b.suit)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Identity of a seat at the table. Supplied by whoever sets up the game.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Player {
    id: String,
    display_name: String,
}

impl Player {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.display_name.fmt(f)
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum GamePhase {
    #[default]
    NotStarted,
    Playing,
    /// The game is decided but hasn't been announced yet.
    GameOver,
    Finished,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::NotStarted => "not started",
            Self::Playing => "playing",
            Self::GameOver => "game over",
            Self::Finished => "finished",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayerState {
    pub score: u32,
}

/// Mutable state of a single game. Player states are index-aligned with
/// the player list the game was configured with.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameState {
    pub current_round: u32,
    pub max_rounds: u32,
    pub phase: GamePhase,
    pub players: Vec<PlayerState>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            current_round: 0,
            max_rounds: DEFAULT_MAX_ROUNDS,
            phase: GamePhase::default(),
            players: Vec::new(),
        }
    }
}

impl GameState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn player_scores(&self) -> Vec<u32> {
        self.players.iter().map(|p| p.score).collect()
    }
}
