//! Cancelable deferred tasks driving the countdown and toast expiry.
//!
//! Timers never touch controller state. They post a [`UiEvent`] tagged with
//! the generation token of the element they belong to, and the task is
//! aborted when the timer value is dropped.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// One countdown unit of the undo prompt elapsed.
    UndoTick { token: u64 },
    /// The toast's display time is over.
    ToastExpired { token: u64 },
}

/// Posts `event` every `period`, starting one period from now.
/// Must be started inside a tokio runtime.
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    pub fn start(period: Duration, event: UiEvent, tx: UnboundedSender<UiEvent>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(event).is_err() {
                    break;
                }
            }
        });
        Self { handle }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Posts `event` once after `delay`.
/// Must be started inside a tokio runtime.
pub struct Deadline {
    handle: JoinHandle<()>,
}

impl Deadline {
    pub fn start(delay: Duration, event: UiEvent, tx: UnboundedSender<UiEvent>) -> Self {
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            let _ = tx.send(event);
        });
        Self { handle }
    }
}

impl Drop for Deadline {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
