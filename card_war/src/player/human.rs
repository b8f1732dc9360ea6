//! Player controller driven by a user interaction (button, key press).

use super::PlayerController;
use crate::game::errors::{GameError, GameResult};
use async_trait::async_trait;
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicU64, Ordering},
};
use tokio::sync::{oneshot, watch};
use tokio_util::sync::CancellationToken;

struct Pending {
    id: u64,
    ready: oneshot::Sender<()>,
}

struct Inner {
    /// At most one outstanding request. Replacing it drops the old sender,
    /// which resolves the old waiter as cancelled.
    pending: Mutex<Option<Pending>>,
    next_id: AtomicU64,
    armed: watch::Sender<bool>,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, Option<Pending>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn register(&self) -> (u64, oneshot::Receiver<()>) {
        let (ready, receiver) = oneshot::channel();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        let mut pending = self.lock();
        if let Some(previous) = pending.replace(Pending { id, ready }) {
            log::debug!("Draw request {} superseded by {}", previous.id, id);
        }
        self.armed.send_replace(true);

        (id, receiver)
    }

    fn release(&self, id: u64) {
        let mut pending = self.lock();
        if pending.as_ref().is_some_and(|p| p.id == id) {
            *pending = None;
            self.armed.send_replace(false);
        }
    }
}

/// Clears the pending slot when a request finishes for any reason,
/// including the request future being dropped.
struct PendingGuard<'a> {
    inner: &'a Inner,
    id: u64,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.inner.release(self.id);
    }
}

/// Human player. Cloning gives another handle to the same controller, so
/// the input side (UI event, stdin reader) can call [`press`](Self::press)
/// while the game awaits [`request_draw`](PlayerController::request_draw).
#[derive(Clone)]
pub struct HumanController {
    inner: Arc<Inner>,
}

impl Default for HumanController {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanController {
    pub fn new() -> Self {
        let (armed, _) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                pending: Mutex::new(None),
                next_id: AtomicU64::new(1),
                armed,
            }),
        }
    }

    /// The user interaction. Completes the pending request, if any, and
    /// returns whether one was completed.
    pub fn press(&self) -> bool {
        let mut pending = self.inner.lock();
        self.inner.armed.send_replace(false);

        match pending.take() {
            Some(request) => request.ready.send(()).is_ok(),
            None => false,
        }
    }

    /// Whether the draw affordance should currently be active.
    pub fn is_armed(&self) -> bool {
        *self.inner.armed.borrow()
    }

    /// Subscribe to changes of the armed flag.
    pub fn armed(&self) -> watch::Receiver<bool> {
        self.inner.armed.subscribe()
    }

    /// Cancel any pending request and deactivate the affordance.
    pub fn disable(&self) {
        let mut pending = self.inner.lock();
        if let Some(request) = pending.take() {
            log::debug!("Draw request {} cancelled by disable", request.id);
        }
        self.inner.armed.send_replace(false);
    }
}

#[async_trait]
impl PlayerController for HumanController {
    async fn request_draw(&self, cancel: &CancellationToken) -> GameResult<()> {
        if cancel.is_cancelled() {
            return Err(GameError::Cancelled);
        }

        let (id, ready) = self.inner.register();
        let _guard = PendingGuard {
            inner: &self.inner,
            id,
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(GameError::Cancelled),
            result = ready => result.map_err(|_| GameError::Cancelled),
        }
    }
}
