// src/api.rs
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;
use crate::types::*;

/// The recipe backend as seen by the client.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// `GET /api/recipes/featured` with a bearer token.
    async fn featured(&self, token: &str) -> Result<Vec<RecipeSummary>, ApiError>;

    /// `GET /api/recipes/:slug`. A `null` body is `Ok(None)`.
    async fn recipe(&self, slug: &str) -> Result<Option<RecipeDetail>, ApiError>;

    async fn contact(&self, req: &ContactReq) -> Result<MessageRes, ApiError>;

    async fn sign_up(&self, req: &SignUpReq) -> Result<SignUpRes, ApiError>;

    async fn verify_email(&self, token: &str) -> Result<(), ApiError>;

    async fn resend_verification(&self, req: &ResendReq) -> Result<MessageRes, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base: Url,
}

impl HttpApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_owned()));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Appends path segments to the base url, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Turns a non-2xx response into [`ApiError::Status`], keeping the server's
/// `message` when the body carries one.
async fn check(resp: Response) -> Result<Vec<u8>, ApiError> {
    let status = resp.status();
    let body = resp.bytes().await?.to_vec();
    if status.is_success() {
        return Ok(body);
    }
    let message = serde_json::from_slice::<MessageRes>(&body)
        .ok()
        .and_then(|m| m.message);
    debug!(%status, ?message, "request rejected");
    Err(ApiError::Status { status, message })
}

async fn read<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let body = check(resp).await?;
    Ok(serde_json::from_slice(&body)?)
}

#[async_trait]
impl RecipeApi for HttpApi {
    async fn featured(&self, token: &str) -> Result<Vec<RecipeSummary>, ApiError> {
        let url = self.endpoint(&["api", "recipes", "featured"])?;
        debug!(%url, "GET featured");
        let resp = self
            .client
            .get(url)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await?;
        read(resp).await
    }

    async fn recipe(&self, slug: &str) -> Result<Option<RecipeDetail>, ApiError> {
        let url = self.endpoint(&["api", "recipes", slug])?;
        debug!(%url, "GET recipe");
        let resp = self.client.get(url).send().await?;
        read(resp).await
    }

    async fn contact(&self, req: &ContactReq) -> Result<MessageRes, ApiError> {
        let url = self.endpoint(&["contact"])?;
        debug!(%url, "POST contact");
        let resp = self.client.post(url).json(req).send().await?;
        read(resp).await
    }

    async fn sign_up(&self, req: &SignUpReq) -> Result<SignUpRes, ApiError> {
        let url = self.endpoint(&["api", "auth", "signup"])?;
        debug!(%url, "POST signup");
        let resp = self.client.post(url).json(req).send().await?;
        read(resp).await
    }

    async fn verify_email(&self, token: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "auth", "verify-email", token])?;
        debug!("GET verify-email");
        let resp = self.client.get(url).send().await?;
        check(resp).await.map(|_| ())
    }

    async fn resend_verification(&self, req: &ResendReq) -> Result<MessageRes, ApiError> {
        let url = self.endpoint(&["api", "auth", "resend-verification"])?;
        debug!(%url, "POST resend-verification");
        let resp = self.client.post(url).json(req).send().await?;
        read(resp).await
    }
}
