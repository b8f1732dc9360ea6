//! Player controller that signals readiness after a timed delay.

use super::PlayerController;
use crate::game::errors::{GameError, GameResult};
use async_trait::async_trait;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::{
    sync::{Mutex, PoisonError},
    time::Duration,
};
use tokio_util::sync::CancellationToken;

/// Default lower bound of the bot "thinking" delay
pub const DEFAULT_MIN_DELAY: Duration = Duration::from_secs(1);

/// Default upper bound of the bot "thinking" delay
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(3);

/// How long a bot waits before it's ready to draw
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BotDelay {
    /// Uniformly distributed in `[min, max]`
    Uniform { min: Duration, max: Duration },
    /// Always the same delay
    Fixed(Duration),
}

impl Default for BotDelay {
    fn default() -> Self {
        Self::Uniform {
            min: DEFAULT_MIN_DELAY,
            max: DEFAULT_MAX_DELAY,
        }
    }
}

impl BotDelay {
    /// Build a uniform delay range, rejecting `min > max`.
    pub fn uniform(min: Duration, max: Duration) -> GameResult<Self> {
        if min > max {
            return Err(GameError::InvalidArgument(format!(
                "Bot delay min ({min:?}) exceeds max ({max:?})"
            )));
        }
        Ok(Self::Uniform { min, max })
    }

    fn sample(&self, rng: &mut StdRng) -> Duration {
        match *self {
            Self::Fixed(delay) => delay,
            Self::Uniform { min, max } if min == max => min,
            Self::Uniform { min, max } => {
                // Bounds may arrive inverted.
                let (low, high) = if min <= max { (min, max) } else { (max, min) };
                Duration::from_secs_f64(rng.random_range(low.as_secs_f64()..=high.as_secs_f64()))
            }
        }
    }
}

/// Bot player. A newer request supersedes an older one still waiting.
pub struct BotController {
    delay: BotDelay,
    rng: Mutex<StdRng>,
    /// Token of the request currently waiting, if any
    pending: Mutex<Option<CancellationToken>>,
}

impl Default for BotController {
    fn default() -> Self {
        Self::new(BotDelay::default())
    }
}

impl BotController {
    pub fn new(delay: BotDelay) -> Self {
        Self::with_rng(delay, StdRng::from_os_rng())
    }

    /// Same delays for the same seed.
    pub fn with_seed(delay: BotDelay, seed: u64) -> Self {
        Self::with_rng(delay, StdRng::seed_from_u64(seed))
    }

    fn with_rng(delay: BotDelay, rng: StdRng) -> Self {
        Self {
            delay,
            rng: Mutex::new(rng),
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> BotDelay {
        self.delay
    }

    /// Get the next delay (with randomization)
    pub fn next_delay(&self) -> Duration {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        self.delay.sample(&mut rng)
    }
}

#[async_trait]
impl PlayerController for BotController {
    async fn request_draw(&self, cancel: &CancellationToken) -> GameResult<()> {
        let delay = self.next_delay();
        let token = cancel.child_token();

        if let Some(previous) = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(token.clone())
        {
            previous.cancel();
        }

        log::trace!("Bot ready in {delay:?}");
        tokio::select! {
            biased;
            _ = token.cancelled() => Err(GameError::Cancelled),
            _ = tokio::time::sleep(delay) => Ok(()),
        }
    }
}
