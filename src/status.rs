// src/status.rs
//! Transient status messages shown after a form submission.

use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;
use tokio::{sync::watch, time::Instant};
use tokio_util::sync::CancellationToken;

pub const AUTO_CLEAR: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }
}

/// Holds at most one message. With an auto-clear delay, every `show`
/// restarts the countdown; the previous countdown is cancelled, never
/// stacked. Dropping the timer cancels whatever countdown is pending.
#[derive(Debug)]
pub struct StatusTimer {
    tx: Arc<watch::Sender<Option<StatusMessage>>>,
    auto_clear: Option<Duration>,
    pending: Mutex<Option<CancellationToken>>,
}

impl StatusTimer {
    pub fn new() -> Self {
        Self::with_delay(AUTO_CLEAR)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self::build(Some(delay))
    }

    /// Messages stay until replaced or cleared.
    pub fn persistent() -> Self {
        Self::build(None)
    }

    fn build(auto_clear: Option<Duration>) -> Self {
        let (tx, _) = watch::channel(None);
        Self {
            tx: Arc::new(tx),
            auto_clear,
            pending: Mutex::new(None),
        }
    }

    /// Replaces the current message. Must be called inside a tokio runtime
    /// when the timer auto-clears.
    pub fn show(&self, message: Option<StatusMessage>) {
        let mut pending = self.pending.lock();
        if let Some(prev) = pending.take() {
            prev.cancel();
        }

        let arm = message.is_some();
        self.tx.send_replace(message);

        let Some(delay) = self.auto_clear.filter(|_| arm) else {
            return;
        };
        let token = CancellationToken::new();
        *pending = Some(token.clone());

        let deadline = Instant::now() + delay;
        let tx = Arc::clone(&self.tx);
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {}
                _ = tokio::time::sleep_until(deadline) => {
                    tx.send_if_modified(|current| {
                        if token.is_cancelled() || current.is_none() {
                            return false;
                        }
                        *current = None;
                        true
                    });
                }
            }
        });
    }

    pub fn clear(&self) {
        self.show(None);
    }

    pub fn current(&self) -> Option<StatusMessage> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<StatusMessage>> {
        self.tx.subscribe()
    }
}

impl Default for StatusTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for StatusTimer {
    fn drop(&mut self) {
        if let Some(token) = self.pending.get_mut().take() {
            token.cancel();
        }
    }
}
