//! Plain terminal front end: prints game events and turns Enter presses
//! into draws for the human seat.

use async_trait::async_trait;
use card_war::{HumanController, ViewEvent, ViewRenderer};
use std::{
    io::{BufRead, Write},
    time::Duration,
};
use tokio_util::sync::CancellationToken;

/// Prints each [`ViewEvent`] as a line of text
pub struct ConsoleRenderer<W> {
    names: Vec<String>,
    out: W,
    reveal_delay: Duration,
}

impl<W: Write + Send> ConsoleRenderer<W> {
    /// `names[i]` is the display name of seat `i`.
    pub fn new(names: Vec<String>, out: W) -> Self {
        Self {
            names,
            out,
            reveal_delay: Duration::ZERO,
        }
    }

    /// Pause after each round result so it can be read before the next one.
    pub fn with_reveal_delay(mut self, delay: Duration) -> Self {
        self.reveal_delay = delay;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn name(&self, seat: usize) -> &str {
        self.names.get(seat).map_or("?", String::as_str)
    }

    fn format_event(&self, event: &ViewEvent) -> String {
        match event {
            ViewEvent::GameStarted => format!("=== War: {} ===", self.names.join(" vs ")),
            ViewEvent::ScoresUpdated(scores) => {
                let scores = scores
                    .iter()
                    .enumerate()
                    .map(|(seat, score)| format!("{} {score}", self.name(seat)))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("Scores: {scores}")
            }
            ViewEvent::RoundResult {
                round,
                cards,
                winner,
                ..
            } => {
                let cards = cards
                    .iter()
                    .enumerate()
                    .map(|(seat, card)| format!("{} {card}", self.name(seat)))
                    .collect::<Vec<_>>()
                    .join(" | ");
                let verdict = match winner {
                    Some(seat) => format!("{} takes the round", self.name(*seat)),
                    None => "tie, nobody scores".to_string(),
                };
                format!("Round {round}: {cards} -> {verdict}")
            }
            ViewEvent::GameOver { winner: Some(seat) } => {
                format!("{} wins the game!", self.name(*seat))
            }
            ViewEvent::GameOver { winner: None } => "The game ends in a draw.".to_string(),
            ViewEvent::GameEnded => "Thanks for playing.".to_string(),
        }
    }
}

#[async_trait]
impl<W: Write + Send> ViewRenderer for ConsoleRenderer<W> {
    async fn render(&mut self, event: ViewEvent) {
        let line = self.format_event(&event);
        if let Err(e) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            log::warn!("Failed to write to console: {e}");
        }

        if matches!(event, ViewEvent::RoundResult { .. }) && !self.reveal_delay.is_zero() {
            tokio::time::sleep(self.reveal_delay).await;
        }
    }
}

/// Press the human's draw button once per input line.
///
/// Runs until `cancel` fires or the input ends; end of input cancels the
/// game since nobody is left to press. Returns how many presses completed
/// a pending draw.
pub fn forward_presses<R: BufRead>(
    input: R,
    human: &HumanController,
    cancel: &CancellationToken,
) -> usize {
    let mut presses = 0;

    for line in input.lines() {
        if cancel.is_cancelled() {
            return presses;
        }
        match line {
            Ok(_) if human.press() => presses += 1,
            Ok(_) => log::debug!("Not waiting for a draw, ignoring input"),
            Err(e) => {
                log::warn!("Failed to read input: {e}");
                break;
            }
        }
    }

    log::info!("Input closed, stopping the game");
    cancel.cancel();
    presses
}

/// Print a prompt every time the human's draw becomes available.
pub async fn prompt_when_armed(human: HumanController, cancel: CancellationToken) {
    let mut armed = human.armed();
    loop {
        tokio::select! {
            _ = cancel.cancelled() => return,
            changed = armed.wait_for(|armed| *armed) => {
                if changed.is_err() {
                    return;
                }
            }
        }
        println!("Press Enter to draw your card...");

        tokio::select! {
            _ = cancel.cancelled() => return,
            changed = armed.wait_for(|armed| !*armed) => {
                if changed.is_err() {
                    return;
                }
            }
        }
    }
}
