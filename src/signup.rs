// src/signup.rs
use std::sync::Arc;

use tracing::{info, warn};

use crate::api::RecipeApi;
use crate::form::{FormDraft, UnknownField};
use crate::route::{Navigator, Route};
use crate::types::SignUpReq;
use crate::validate::validate_sign_up;

pub const FIELDS: &[&str] = &["name", "email", "password"];
pub const MSG_REGISTRATION_FAILED: &str = "Registration failed.";
pub const MSG_SOMETHING_WRONG: &str = "Something went wrong.";

pub struct SignUpForm {
    api: Arc<dyn RecipeApi>,
    nav: Navigator,
    draft: FormDraft,
    error: Option<String>,
    loading: bool,
}

impl SignUpForm {
    pub fn new(api: Arc<dyn RecipeApi>, nav: Navigator) -> Self {
        Self {
            api,
            nav,
            draft: FormDraft::new(FIELDS),
            error: None,
            loading: false,
        }
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), UnknownField> {
        self.draft.set(name, value)
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Validates locally, then registers. On success navigates to the
    /// verification notice for the submitted address and returns `true`.
    pub async fn submit(&mut self) -> bool {
        self.error = None;

        let email = self.draft.get("email").to_owned();
        let password = self.draft.get("password");
        if let Err(e) = validate_sign_up(&email, password) {
            info!("sign-up rejected locally: {e:?}");
            self.error = Some(e.to_string());
            return false;
        }

        let req = SignUpReq {
            name: self.draft.get("name").to_owned(),
            email: email.clone(),
            password: password.to_owned(),
        };

        self.loading = true;
        let result = self.api.sign_up(&req).await;
        self.loading = false;

        match result {
            Ok(res) if res.success => {
                info!("account created, awaiting email verification");
                self.nav.go(Route::VerifyNotice { email });
                true
            }
            Ok(res) => {
                self.error = Some(
                    res.message
                        .filter(|m| !m.is_empty())
                        .unwrap_or_else(|| MSG_REGISTRATION_FAILED.to_owned()),
                );
                false
            }
            Err(e) => {
                warn!("sign-up failed: {e}");
                self.error = Some(
                    e.server_message()
                        .unwrap_or(MSG_SOMETHING_WRONG)
                        .to_owned(),
                );
                false
            }
        }
    }
}
