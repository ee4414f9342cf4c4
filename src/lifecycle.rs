// src/lifecycle.rs
//! Ties asynchronous work to the lifetime of a view instance.
//!
//! A [`Mount`] owns a cancellation token that is cancelled when the mount
//! is dropped. Work started through [`Mount::spawn`] or [`Mount::run`]
//! stops at its next await point once that happens, so a late response can
//! never be applied to a view that is gone.

use std::future::Future;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Default)]
pub struct Mount {
    token: CancellationToken,
}

impl Mount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token for work owned by this mount. Cancelled on drop.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_live(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn unmount(&self) {
        self.token.cancel();
    }

    /// Runs `fut` to completion unless the mount goes away first.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        guarded(&self.token, fut).await
    }

    /// Spawns `fut` on the runtime; it is dropped as soon as the mount is.
    pub fn spawn<F>(&self, fut: F) -> JoinHandle<Option<F::Output>>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let token = self.token();
        tokio::spawn(async move { guarded(&token, fut).await })
    }
}

impl Drop for Mount {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

pub async fn guarded<F: Future>(token: &CancellationToken, fut: F) -> Option<F::Output> {
    tokio::select! {
        biased;
        _ = token.cancelled() => None,
        out = fut => Some(out),
    }
}
