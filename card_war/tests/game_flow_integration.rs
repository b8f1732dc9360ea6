/// Integration tests for full game flows
///
/// These tests play complete games against the in-memory deck service with
/// bot and human seats, and check what the presentation layer receives.
use async_trait::async_trait;
use card_war::{
    BotController, BotDelay, DeckProvider, GameController, GameError, GamePhase, HumanController,
    LocalDeckGateway, Player, PlayerController, RoundOutcome, SimpleWar, ViewEvent, ViewQueue,
    ViewRenderer, drain_view_events, run_session,
};
use std::{sync::Arc, time::Duration};
use tokio_util::sync::CancellationToken;

fn instant_bot() -> Arc<dyn PlayerController> {
    Arc::new(BotController::new(BotDelay::Fixed(Duration::ZERO)))
}

fn seats(n: usize) -> Vec<Player> {
    (0..n)
        .map(|i| Player::new(format!("seat{i}"), format!("Seat {i}")))
        .collect()
}

fn bot_game(seed: u64, n_players: usize, mode: SimpleWar) -> (GameController, ViewQueueRx) {
    let (view, events) = ViewQueue::new();
    let game = GameController::new(
        DeckProvider::new(Arc::new(LocalDeckGateway::with_seed(seed))),
        seats(n_players),
        (0..n_players).map(|_| instant_bot()).collect(),
        Arc::new(view),
        mode,
    )
    .unwrap();
    (game, events)
}

type ViewQueueRx = tokio::sync::mpsc::UnboundedReceiver<ViewEvent>;

#[derive(Default)]
struct Recorder(Vec<ViewEvent>);

#[async_trait]
impl ViewRenderer for Recorder {
    async fn render(&mut self, event: ViewEvent) {
        self.0.push(event);
    }
}

async fn record(game: GameController, events: ViewQueueRx) -> Vec<ViewEvent> {
    // Dropping the controller closes the queue so the drain can finish.
    drop(game);
    let mut recorder = Recorder::default();
    drain_view_events(events, &mut recorder).await;
    recorder.0
}

#[tokio::test]
async fn test_two_bots_play_eight_rounds() {
    let (mut game, events) = bot_game(1, 2, SimpleWar::default());

    let winner = run_session(&mut game, &CancellationToken::new())
        .await
        .unwrap();

    let state = game.state().clone();
    assert_eq!(state.current_round, 8);
    assert_eq!(game.phase(), GamePhase::Finished);
    assert!(state.player_scores().iter().sum::<u32>() <= 8);
    if let Some(idx) = winner {
        let top = state.players[idx].score;
        assert!(
            state
                .players
                .iter()
                .enumerate()
                .all(|(i, p)| i == idx || p.score < top)
        );
    }

    let events = record(game, events).await;
    assert_eq!(events.first(), Some(&ViewEvent::GameStarted));
    assert_eq!(events.last(), Some(&ViewEvent::GameEnded));
    let rounds: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            ViewEvent::RoundResult { round, cards, .. } => {
                assert_eq!(cards.len(), 2);
                Some(*round)
            }
            _ => None,
        })
        .collect();
    assert_eq!(rounds, (1..=8).collect::<Vec<_>>());
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, ViewEvent::GameOver { .. }))
            .count(),
        1
    );
}

#[tokio::test]
async fn test_same_seed_same_game() {
    let (mut first, _first_events) = bot_game(42, 3, SimpleWar::default());
    let (mut second, _second_events) = bot_game(42, 3, SimpleWar::default());
    let cancel = CancellationToken::new();

    let a = run_session(&mut first, &cancel).await.unwrap();
    let b = run_session(&mut second, &cancel).await.unwrap();

    assert_eq!(a, b);
    assert_eq!(first.state(), second.state());
}

#[tokio::test]
async fn test_long_game_reshuffles_instead_of_running_dry() {
    // 4 players over 20 rounds need 80 cards from a 52 card deck.
    let (mut game, _events) = bot_game(3, 4, SimpleWar::new(20, 2));

    run_session(&mut game, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(game.state().current_round, 20);
    assert!(
        game.state()
            .player_scores()
            .iter()
            .all(|score| score % 2 == 0)
    );
}

#[tokio::test]
async fn test_round_cards_are_distinct_within_a_round() {
    let (mut game, _events) = bot_game(8, 4, SimpleWar::default());
    let cancel = CancellationToken::new();
    game.start_game(&cancel).await.unwrap();

    while let RoundOutcome::Played(result) = game.play_round(&cancel).await.unwrap() {
        let mut cards = result.cards.clone();
        cards.sort_by_key(|c| (c.rank, c.suit));
        cards.dedup();
        assert_eq!(cards.len(), 4);
    }
}

#[tokio::test]
async fn test_human_and_bot_game() {
    let human = HumanController::new();
    let (view, events) = ViewQueue::new();
    let mut game = GameController::new(
        DeckProvider::new(Arc::new(LocalDeckGateway::with_seed(5))),
        vec![Player::new("human", "Alice"), Player::new("bot", "Bot")],
        vec![Arc::new(human.clone()), instant_bot()],
        Arc::new(view),
        SimpleWar::new(4, 1),
    )
    .unwrap();

    // Press every time the draw affordance becomes active.
    let presser = {
        let human = human.clone();
        tokio::spawn(async move {
            let mut armed = human.armed();
            let mut presses = 0;
            while armed.wait_for(|armed| *armed).await.is_ok() {
                if human.press() {
                    presses += 1;
                }
                if presses == 4 {
                    break;
                }
            }
            presses
        })
    };

    run_session(&mut game, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(presser.await.unwrap(), 4);
    assert_eq!(game.state().current_round, 4);

    let events = record(game, events).await;
    assert_eq!(events.last(), Some(&ViewEvent::GameEnded));
}

#[tokio::test]
async fn test_cancelling_a_waiting_human_stops_the_session() {
    let human = HumanController::new();
    let (view, _events) = ViewQueue::new();
    let mut game = GameController::new(
        DeckProvider::new(Arc::new(LocalDeckGateway::with_seed(6))),
        vec![Player::new("human", "Alice"), Player::new("bot", "Bot")],
        vec![Arc::new(human.clone()), instant_bot()],
        Arc::new(view),
        SimpleWar::default(),
    )
    .unwrap();
    let cancel = CancellationToken::new();

    let canceller = {
        let human = human.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move {
            let mut armed = human.armed();
            let _ = armed.wait_for(|armed| *armed).await;
            cancel.cancel();
        })
    };

    let result = run_session(&mut game, &cancel).await;
    canceller.await.unwrap();

    assert!(matches!(result, Err(GameError::Cancelled)));
    assert_eq!(game.state().current_round, 0);
    assert_eq!(game.phase(), GamePhase::Playing);
    assert!(!human.is_armed());
}
