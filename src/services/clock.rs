use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

/// Receiver half of the one-shot expiry signal. Taken by the host so it can
/// `select!` on expiry without holding a borrow of the engine.
pub type ExpirySignal = oneshot::Receiver<()>;

/// Countdown against a fixed deadline. Ticks at 1 Hz on a background task,
/// publishes whole seconds remaining, and fires the expiry signal exactly
/// once when the deadline passes, then stops ticking.
///
/// Without a time limit the clock is inert: no task, no signal. Dropping the
/// clock aborts the ticker, so a clock owned by a session can never fire
/// after the session is gone.
pub struct SessionClock {
    remaining: watch::Receiver<Option<i64>>,
    expiry: Option<ExpirySignal>,
    handle: Option<JoinHandle<()>>,
}

impl SessionClock {
    pub fn start(time_limit: Option<Duration>) -> Self {
        let Some(limit) = time_limit else {
            let (_, remaining) = watch::channel(None);
            return Self {
                remaining,
                expiry: None,
                handle: None,
            };
        };

        let deadline = Instant::now() + limit;
        let (remaining_tx, remaining_rx) = watch::channel(Some(limit.as_secs() as i64));
        let (expiry_tx, expiry_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            let mut ticker = time::interval_at(
                Instant::now() + Duration::from_secs(1),
                Duration::from_secs(1),
            );
            loop {
                ticker.tick().await;
                let left = deadline.saturating_duration_since(Instant::now());
                let _ = remaining_tx.send(Some(left.as_secs() as i64));
                if left.is_zero() {
                    break;
                }
            }
            log::info!("Session time limit reached, signalling auto-submit");
            let _ = expiry_tx.send(());
        });

        Self {
            remaining: remaining_rx,
            expiry: Some(expiry_rx),
            handle: Some(handle),
        }
    }

    /// Whole seconds until the deadline, or `None` when no limit is
    /// configured.
    pub fn remaining_secs(&self) -> Option<i64> {
        *self.remaining.borrow()
    }

    /// Watch channel mirroring `remaining_secs`, for rendering.
    pub fn subscribe(&self) -> watch::Receiver<Option<i64>> {
        self.remaining.clone()
    }

    /// Hand out the expiry signal. Yields `Some` at most once, and only for
    /// clocks with a time limit.
    pub fn take_expiry_signal(&mut self) -> Option<ExpirySignal> {
        self.expiry.take()
    }
}

impl Drop for SessionClock {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
