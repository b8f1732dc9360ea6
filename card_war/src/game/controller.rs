//! Game orchestrator: drives one game through its phases.

use super::{
    entities::{Card, GamePhase, GameState, Player},
    errors::{GameError, GameResult},
    mode::{GameMode, GameResolution, SimpleWar},
};
use crate::{
    deck::{DeckError, DeckProvider, DeckResult},
    player::PlayerController,
    view::GameView,
};
use futures_util::future::try_join_all;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// What happened in one played round
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundResult {
    /// Rounds completed so far, including this one
    pub round: u32,
    /// `cards[i]` was dealt to seat `i`
    pub cards: Vec<Card>,
    pub scores: Vec<u32>,
    /// `None` for a tied round
    pub winner: Option<usize>,
    /// Whether this round ended the game
    pub game_finished: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RoundOutcome {
    /// The game wasn't in a playable phase; nothing happened.
    Skipped,
    Played(RoundResult),
}

/// Orchestrates a game: player synchronization, dealing, rule evaluation
/// and presentation updates.
///
/// Players and controllers are index-aligned: `controllers[i]` decides when
/// `players[i]` is ready, and `players[i]` receives the `i`-th card of each
/// round's draw.
pub struct GameController<M: GameMode = SimpleWar> {
    deck: DeckProvider,
    players: Vec<Player>,
    controllers: Vec<Arc<dyn PlayerController>>,
    view: Arc<dyn GameView>,
    mode: M,
    state: GameState,
    winner: Option<usize>,
}

impl<M: GameMode> GameController<M> {
    pub fn new(
        deck: DeckProvider,
        players: Vec<Player>,
        controllers: Vec<Arc<dyn PlayerController>>,
        view: Arc<dyn GameView>,
        mode: M,
    ) -> GameResult<Self> {
        if players.len() != controllers.len() {
            return Err(GameError::InvalidArgument(format!(
                "{} players but {} player controllers",
                players.len(),
                controllers.len()
            )));
        }
        if players.is_empty() {
            return Err(GameError::InvalidArgument(
                "A game needs at least one player".to_string(),
            ));
        }

        Ok(Self {
            deck,
            players,
            controllers,
            view,
            mode,
            state: GameState::new(),
            winner: None,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn mode(&self) -> &M {
        &self.mode
    }

    /// Winner announced when the game finished, if any.
    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    /// Configure a new game, set up a fresh deck and announce the start.
    ///
    /// If the deck can't be set up the game stays in
    /// [`GamePhase::NotStarted`].
    pub async fn start_game(&mut self, cancel: &CancellationToken) -> GameResult<()> {
        if self.state.phase == GamePhase::Finished {
            log::warn!("Game already finished, not starting again");
            return Ok(());
        }

        self.mode.configure_new_game(&mut self.state, &self.players);
        self.winner = None;

        if let Err(e) = self.deck.initialize(cancel).await {
            self.state.phase = GamePhase::NotStarted;
            if !matches!(e, DeckError::Cancelled) {
                log::error!("Failed to set up deck: {e}");
            }
            return Err(e.into());
        }

        log::info!(
            "Game started with {} players over {} rounds",
            self.players.len(),
            self.state.max_rounds
        );
        self.view.start_game();
        self.view.update_scores(&self.state.player_scores());
        Ok(())
    }

    /// Play one round.
    ///
    /// Waits for every player to be ready, then deals one card per player.
    /// Nothing is drawn if the wait is cancelled, and a failed draw leaves
    /// the game state untouched.
    pub async fn play_round(&mut self, cancel: &CancellationToken) -> GameResult<RoundOutcome> {
        if self.state.phase != GamePhase::Playing {
            log::warn!("Can't play a round while the game is {}", self.state.phase);
            return Ok(RoundOutcome::Skipped);
        }

        self.await_players(cancel).await?;

        let cards = match self.deal(cancel).await {
            Ok(cards) => cards,
            Err(DeckError::Cancelled) => return Err(GameError::Cancelled),
            Err(e) => {
                log::error!("Round aborted, deck draw failed: {e}");
                return Err(e.into());
            }
        };

        let winner = self
            .mode
            .evaluate_round_outcome(&mut self.state, &self.players, &cards);
        let scores = self.state.player_scores();

        match winner {
            Some(idx) => log::debug!(
                "Round {} won by {}",
                self.state.current_round,
                self.players[idx]
            ),
            None => log::debug!("Round {} had no winner", self.state.current_round),
        }
        self.view
            .show_round_result(self.state.current_round, &cards, &scores, winner);
        self.view.update_scores(&scores);

        let game_finished = self.check_winner_and_end_game();
        Ok(RoundOutcome::Played(RoundResult {
            round: self.state.current_round,
            cards,
            scores,
            winner,
            game_finished,
        }))
    }

    /// Force an unfinished game to end, announcing the game mode's winner
    /// if it has one.
    pub fn end_game(&mut self) {
        if self.state.phase == GamePhase::Finished {
            log::warn!("Game already finished");
            return;
        }

        let winner = match self
            .mode
            .try_resolve_game_winner(&mut self.state, &self.players)
        {
            GameResolution::Decided { winner } => winner,
            GameResolution::Continue => None,
        };
        self.finish(winner);
    }

    /// Barrier: resolves only once every controller is ready.
    async fn await_players(&self, cancel: &CancellationToken) -> GameResult<()> {
        let requests = self.controllers.iter().map(|c| c.request_draw(cancel));
        try_join_all(requests).await?;

        // A controller may resolve in the same instant the round is cancelled.
        if cancel.is_cancelled() {
            return Err(GameError::Cancelled);
        }
        Ok(())
    }

    async fn deal(&mut self, cancel: &CancellationToken) -> DeckResult<Vec<Card>> {
        let count = u32::try_from(self.players.len())
            .map_err(|_| DeckError::InvalidArgument("too many players".to_string()))?;

        if let Some(remaining) = self.deck.remaining().filter(|r| *r < count) {
            log::info!("Only {remaining} cards left, reshuffling");
            self.deck.reshuffle(cancel).await?;
        }

        let cards = self.deck.draw_cards(count, cancel).await?;
        if cards.is_empty() {
            return Err(DeckError::Protocol("deck returned no cards".to_string()));
        }
        Ok(cards)
    }

    /// Returns whether the game finished.
    fn check_winner_and_end_game(&mut self) -> bool {
        let forced = self.state.phase == GamePhase::GameOver;

        match self
            .mode
            .try_resolve_game_winner(&mut self.state, &self.players)
        {
            GameResolution::Decided { winner } => {
                self.finish(winner);
                true
            }
            GameResolution::Continue if forced => {
                log::warn!("Game over without a decided winner, ending it");
                self.finish(None);
                true
            }
            GameResolution::Continue => false,
        }
    }

    fn finish(&mut self, winner: Option<usize>) {
        self.state.phase = GamePhase::Finished;
        self.winner = winner;

        match winner {
            Some(idx) => log::info!("Game over, {} wins", self.players[idx]),
            None => log::info!("Game over, no winner"),
        }
        self.view.show_game_over(winner);
        self.view.end_game();
    }
}
