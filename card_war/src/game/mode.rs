//! Game mode strategies: the rules a game is played by.

use super::{
    entities::{Card, GamePhase, GameState, Player, PlayerState},
    functional::{unique_highest, unique_highest_by},
};

/// Default number of rounds in a simple war game
pub const DEFAULT_MAX_ROUNDS: u32 = 8;

/// Default points awarded to a round winner
pub const DEFAULT_POINTS_PER_ROUND: u32 = 1;

/// Whether a game has been decided
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GameResolution {
    /// More rounds to play
    Continue,
    /// The game is over. `winner` is `None` when the top score is shared.
    Decided { winner: Option<usize> },
}

/// Pluggable rule set
pub trait GameMode: Send + Sync {
    /// Points a round winner receives
    fn points_per_round(&self) -> u32;

    /// Reset `state` for a new game with `players`.
    fn configure_new_game(&self, state: &mut GameState, players: &[Player]);

    /// Score a round where `cards[i]` belongs to `players[i]`.
    ///
    /// Returns the round winner, or `None` for a tie or a fatal desync.
    fn evaluate_round_outcome(
        &self,
        state: &mut GameState,
        players: &[Player],
        cards: &[Card],
    ) -> Option<usize>;

    /// Check whether the game has ended and, if so, who won.
    fn try_resolve_game_winner(&self, state: &mut GameState, players: &[Player])
    -> GameResolution;
}

/// Highest card wins the round, most rounds won wins the game.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SimpleWar {
    max_rounds: u32,
    points_per_round: u32,
}

impl Default for SimpleWar {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ROUNDS, DEFAULT_POINTS_PER_ROUND)
    }
}

impl SimpleWar {
    #[must_use]
    pub const fn new(max_rounds: u32, points_per_round: u32) -> Self {
        Self {
            max_rounds,
            points_per_round,
        }
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }
}

impl GameMode for SimpleWar {
    fn points_per_round(&self) -> u32 {
        self.points_per_round
    }

    fn configure_new_game(&self, state: &mut GameState, players: &[Player]) {
        state.max_rounds = self.max_rounds;
        state.current_round = 0;
        state.phase = GamePhase::Playing;
        state.players = vec![PlayerState::default(); players.len()];
    }

    fn evaluate_round_outcome(
        &self,
        state: &mut GameState,
        players: &[Player],
        cards: &[Card],
    ) -> Option<usize> {
        if cards.len() != players.len() {
            log::error!(
                "Round desync: {} cards for {} players, ending game",
                cards.len(),
                players.len()
            );
            state.phase = GamePhase::GameOver;
            return None;
        }

        let winner = unique_highest_by(cards, Card::cmp_rank).map(|(idx, _)| idx);
        if let Some(idx) = winner {
            let score = &mut state.players[idx].score;
            *score = score.saturating_add(self.points_per_round);
        }

        state.current_round += 1;
        winner
    }

    fn try_resolve_game_winner(
        &self,
        state: &mut GameState,
        _players: &[Player],
    ) -> GameResolution {
        if state.current_round < state.max_rounds {
            return GameResolution::Continue;
        }

        state.phase = GamePhase::GameOver;
        let scores = state.player_scores();
        GameResolution::Decided {
            winner: unique_highest(&scores).map(|(idx, _)| idx),
        }
    }
}
