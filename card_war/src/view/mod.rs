//! Presentation contract and the serialized notification queue.
//!
//! The game controller only ever calls [`GameView`] methods; they're
//! fire-and-forget. [`ViewQueue`] turns each call into a [`ViewEvent`] on an
//! unbounded channel so a single consumer can render them strictly in
//! submission order, one at a time.

use crate::game::entities::Card;
use async_trait::async_trait;
use std::fmt;
use tokio::sync::mpsc;

/// Notifications a presentation layer receives from the game controller
pub trait GameView: Send + Sync {
    fn start_game(&self);
    fn update_scores(&self, scores: &[u32]);
    fn show_round_result(&self, round: u32, cards: &[Card], scores: &[u32], winner: Option<usize>);
    fn show_game_over(&self, winner: Option<usize>);
    fn end_game(&self);
}

/// Owned form of a [`GameView`] call
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ViewEvent {
    GameStarted,
    ScoresUpdated(Vec<u32>),
    RoundResult {
        round: u32,
        cards: Vec<Card>,
        scores: Vec<u32>,
        winner: Option<usize>,
    },
    GameOver {
        winner: Option<usize>,
    },
    GameEnded,
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for ViewEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::GameStarted => "game started".to_string(),
            Self::ScoresUpdated(scores) => format!("scores [{}]", join(scores)),
            Self::RoundResult {
                round,
                cards,
                winner,
                ..
            } => match winner {
                Some(idx) => format!("round {round}: [{}] won by seat {idx}", join(cards)),
                None => format!("round {round}: [{}] tied", join(cards)),
            },
            Self::GameOver { winner: Some(idx) } => format!("game over, seat {idx} wins"),
            Self::GameOver { winner: None } => "game over, no winner".to_string(),
            Self::GameEnded => "game ended".to_string(),
        };
        write!(f, "{repr}")
    }
}

/// [`GameView`] that enqueues every notification for a single consumer
#[derive(Clone, Debug)]
pub struct ViewQueue {
    sender: mpsc::UnboundedSender<ViewEvent>,
}

impl ViewQueue {
    /// Create the queue and the receiver its consumer drains.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ViewEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    fn push(&self, event: ViewEvent) {
        if let Err(e) = self.sender.send(event) {
            log::debug!("View consumer gone, dropping {}", e.0);
        }
    }
}

impl GameView for ViewQueue {
    fn start_game(&self) {
        self.push(ViewEvent::GameStarted);
    }

    fn update_scores(&self, scores: &[u32]) {
        self.push(ViewEvent::ScoresUpdated(scores.to_vec()));
    }

    fn show_round_result(&self, round: u32, cards: &[Card], scores: &[u32], winner: Option<usize>) {
        self.push(ViewEvent::RoundResult {
            round,
            cards: cards.to_vec(),
            scores: scores.to_vec(),
            winner,
        });
    }

    fn show_game_over(&self, winner: Option<usize>) {
        self.push(ViewEvent::GameOver { winner });
    }

    fn end_game(&self) {
        self.push(ViewEvent::GameEnded);
    }
}

/// Consumer side of a [`ViewQueue`]
#[async_trait]
pub trait ViewRenderer: Send {
    async fn render(&mut self, event: ViewEvent);
}

/// Render queued events one at a time until every [`ViewQueue`] handle is
/// dropped. Returns the number of events rendered.
pub async fn drain_view_events<R: ViewRenderer + ?Sized>(
    mut receiver: mpsc::UnboundedReceiver<ViewEvent>,
    renderer: &mut R,
) -> usize {
    let mut rendered = 0;
    while let Some(event) = receiver.recv().await {
        renderer.render(event).await;
        rendered += 1;
    }
    rendered
}
