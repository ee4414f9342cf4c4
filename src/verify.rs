// src/verify.rs
//! Email verification: following the emailed link, and asking for a new one.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use tokio::sync::watch;
use tracing::{info, warn};

use crate::api::RecipeApi;
use crate::lifecycle::Mount;
use crate::route::{Navigator, Route};
use crate::status::{StatusMessage, StatusTimer};
use crate::types::ResendReq;

pub const REDIRECT_DELAY: Duration = Duration::from_secs(2);
pub const MSG_RESEND_FAILED: &str = "Failed to resend email.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationState {
    Verifying,
    Verified,
    Error,
}

/// Exchanges the token from a verification link on mount. Success moves to
/// `Verified` and, two seconds later, navigates to the confirmation page.
/// Failure is final.
#[derive(Debug)]
pub struct VerifyEmailHandler {
    rx: watch::Receiver<VerificationState>,
    _mount: Mount,
}

impl VerifyEmailHandler {
    pub fn mount(api: Arc<dyn RecipeApi>, nav: Navigator, token: &str) -> Self {
        let (tx, rx) = watch::channel(VerificationState::Verifying);
        let mount = Mount::new();
        let token = token.to_owned();

        mount.spawn(async move {
            match api.verify_email(&token).await {
                Ok(()) => {
                    info!("email verified");
                    tx.send_replace(VerificationState::Verified);
                    tokio::time::sleep(REDIRECT_DELAY).await;
                    nav.go(Route::Verified);
                }
                Err(e) => {
                    warn!("email verification failed: {e}");
                    tx.send_replace(VerificationState::Error);
                }
            }
        });

        Self { rx, _mount: mount }
    }

    pub fn state(&self) -> VerificationState {
        *self.rx.borrow()
    }

    /// Waits until verification leaves `Verifying`.
    pub async fn settled(&mut self) -> VerificationState {
        let settled = self
            .rx
            .wait_for(|s| *s != VerificationState::Verifying)
            .await
            .ok()
            .map(|state| *state);
        settled.unwrap_or_else(|| self.state())
    }
}

/// Re-enables the resend button when the request finishes or is abandoned.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// "Check your inbox" page with a resend button.
pub struct VerifyNotice {
    api: Arc<dyn RecipeApi>,
    email: String,
    status: StatusTimer,
    in_flight: AtomicBool,
}

impl VerifyNotice {
    pub fn new(api: Arc<dyn RecipeApi>, email: impl Into<String>) -> Self {
        Self {
            api,
            email: email.into(),
            status: StatusTimer::persistent(),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn is_sending(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn status(&self) -> Option<StatusMessage> {
        self.status.current()
    }

    /// Requests a fresh verification email. Returns `false` without doing
    /// anything while a previous request is still in flight.
    pub async fn resend(&self) -> bool {
        let Some(_sending) = InFlight::acquire(&self.in_flight) else {
            return false;
        };
        self.status.clear();

        let req = ResendReq {
            email: self.email.clone(),
        };
        let message = match self.api.resend_verification(&req).await {
            Ok(res) => {
                info!("verification email resent");
                res.message
                    .filter(|m| !m.is_empty())
                    .map(StatusMessage::success)
            }
            Err(e) => {
                warn!("resend verification failed: {e}");
                Some(StatusMessage::error(
                    e.server_message().unwrap_or(MSG_RESEND_FAILED),
                ))
            }
        };
        self.status.show(message);
        true
    }
}
