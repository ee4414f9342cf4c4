// src/contact.rs
use std::sync::Arc;

use tracing::{error, info};

use crate::api::RecipeApi;
use crate::error::ApiError;
use crate::form::{FormDraft, UnknownField};
use crate::status::{StatusMessage, StatusTimer};
use crate::types::ContactReq;

pub const FIELDS: &[&str] = &["name", "email", "message"];
pub const MSG_SENT: &str = "Message sent successfully!";
pub const MSG_SEND_FAILED: &str = "Failed to send message.";
pub const MSG_UNREACHABLE: &str = "Something went wrong. Please try again.";

pub struct ContactForm {
    api: Arc<dyn RecipeApi>,
    draft: FormDraft,
    status: StatusTimer,
}

impl ContactForm {
    pub fn new(api: Arc<dyn RecipeApi>) -> Self {
        Self::with_status(api, StatusTimer::new())
    }

    pub fn with_status(api: Arc<dyn RecipeApi>, status: StatusTimer) -> Self {
        Self {
            api,
            draft: FormDraft::new(FIELDS),
            status,
        }
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), UnknownField> {
        self.draft.set(name, value)
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn status(&self) -> Option<StatusMessage> {
        self.status.current()
    }

    pub fn status_timer(&self) -> &StatusTimer {
        &self.status
    }

    pub async fn submit(&mut self) {
        self.status.clear();

        let req = ContactReq {
            name: self.draft.get("name").to_owned(),
            email: self.draft.get("email").to_owned(),
            message: self.draft.get("message").to_owned(),
        };

        let message = match self.api.contact(&req).await {
            Ok(_) => {
                info!("contact message sent");
                self.draft.reset();
                StatusMessage::success(MSG_SENT)
            }
            Err(e @ ApiError::Status { .. }) => {
                info!("contact message rejected: {e}");
                StatusMessage::error(format!(
                    "Error: {}",
                    e.server_message().unwrap_or(MSG_SEND_FAILED)
                ))
            }
            Err(e) => {
                error!("error submitting contact form: {e}");
                StatusMessage::error(MSG_UNREACHABLE)
            }
        };
        self.status.show(Some(message));
    }
}
