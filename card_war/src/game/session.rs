use super::{
    controller::{GameController, RoundOutcome},
    entities::GamePhase,
    errors::{GameError, GameResult},
    mode::GameMode,
};
use tokio_util::sync::CancellationToken;

/// Play a game from start to finish and return its winner.
///
/// Stops at the first error. A game that's already finished isn't replayed;
/// its recorded winner is returned.
pub async fn run_session<M: GameMode>(
    game: &mut GameController<M>,
    cancel: &CancellationToken,
) -> GameResult<Option<usize>> {
    if let Err(e) = game.start_game(cancel).await {
        log_stop(&e, 0);
        return Err(e);
    }

    while game.phase() != GamePhase::Finished {
        match game.play_round(cancel).await {
            Ok(RoundOutcome::Played(result)) => {
                log::trace!("Scores after round {}: {:?}", result.round, result.scores);
            }
            Ok(RoundOutcome::Skipped) => {
                log::warn!("Game stuck in phase {}, ending it", game.phase());
                game.end_game();
            }
            Err(e) => {
                log_stop(&e, game.state().current_round);
                return Err(e);
            }
        }
    }

    Ok(game.winner())
}

fn log_stop(err: &GameError, round: u32) {
    match err {
        GameError::Cancelled => log::info!("Session cancelled after {round} rounds"),
        other => log::error!("Session stopped after {round} rounds: {other}"),
    }
}
