// src/fake.rs
//! In-process [`RecipeApi`] for controller tests.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::StatusCode;

use crate::api::RecipeApi;
use crate::error::ApiError;
use crate::types::*;

#[derive(Debug, Clone)]
pub(crate) enum Reply<T> {
    Ok(T),
    Fail(u16, Option<&'static str>),
}

impl<T: Clone> Reply<T> {
    fn get(&self) -> Result<T, ApiError> {
        match self {
            Reply::Ok(v) => Ok(v.clone()),
            Reply::Fail(code, message) => Err(ApiError::Status {
                status: StatusCode::from_u16(*code).unwrap(),
                message: message.map(str::to_owned),
            }),
        }
    }
}

pub(crate) struct FakeApi {
    pub featured: Reply<Vec<RecipeSummary>>,
    pub recipe: Reply<Option<RecipeDetail>>,
    pub contact: Reply<MessageRes>,
    pub sign_up: Reply<SignUpRes>,
    pub verify: Reply<()>,
    pub resend: Reply<MessageRes>,
    /// Applied before every reply.
    pub delay: Duration,
    pub calls: Mutex<Vec<String>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            featured: Reply::Ok(Vec::new()),
            recipe: Reply::Ok(None),
            contact: Reply::Ok(MessageRes::default()),
            sign_up: Reply::Ok(SignUpRes::default()),
            verify: Reply::Ok(()),
            resend: Reply::Ok(MessageRes::default()),
            delay: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeApi {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    async fn hit(&self, call: String) {
        self.calls.lock().push(call);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

pub(crate) fn recipe(id: &str, title: &str) -> RecipeSummary {
    RecipeSummary {
        id: Some(id.into()),
        recipe_id: None,
        title: title.into(),
        image: None,
        link: Some(format!("/recipes/{id}")),
        source_url: None,
        calories: Some(400.0),
        time: Some(20.0),
    }
}

#[async_trait]
impl RecipeApi for FakeApi {
    async fn featured(&self, token: &str) -> Result<Vec<RecipeSummary>, ApiError> {
        self.hit(format!("featured:{token}")).await;
        self.featured.get()
    }

    async fn recipe(&self, slug: &str) -> Result<Option<RecipeDetail>, ApiError> {
        self.hit(format!("recipe:{slug}")).await;
        self.recipe.get()
    }

    async fn contact(&self, req: &ContactReq) -> Result<MessageRes, ApiError> {
        self.hit(format!("contact:{}", req.email)).await;
        self.contact.get()
    }

    async fn sign_up(&self, req: &SignUpReq) -> Result<SignUpRes, ApiError> {
        self.hit(format!("signup:{}", req.email)).await;
        self.sign_up.get()
    }

    async fn verify_email(&self, token: &str) -> Result<(), ApiError> {
        self.hit(format!("verify:{token}")).await;
        self.verify.get()
    }

    async fn resend_verification(&self, req: &ResendReq) -> Result<MessageRes, ApiError> {
        self.hit(format!("resend:{}", req.email)).await;
        self.resend.get()
    }
}
