// src/detail.rs
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info};

use crate::api::RecipeApi;
use crate::lifecycle::Mount;
use crate::types::RecipeDetail;

pub const MSG_DETAIL_FAILED: &str = "Failed to load recipe details.";

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Loaded(RecipeDetail),
    NotFound,
    Error(String),
}

impl DetailState {
    pub fn is_settled(&self) -> bool {
        !matches!(self, DetailState::Loading)
    }
}

pub async fn load_detail(api: &dyn RecipeApi, slug: &str) -> DetailState {
    match api.recipe(slug).await {
        Ok(Some(recipe)) => DetailState::Loaded(recipe),
        Ok(None) => DetailState::NotFound,
        Err(e) if e.is_not_found() => {
            info!(slug, "recipe not found");
            DetailState::NotFound
        }
        Err(e) => {
            error!(slug, "error fetching recipe details: {e}");
            DetailState::Error(MSG_DETAIL_FAILED.to_owned())
        }
    }
}

/// Recipe detail view keyed by slug. Every slug change starts over with a
/// fresh request and abandons the previous one.
pub struct RecipeDetailLoader {
    api: Arc<dyn RecipeApi>,
    tx: Arc<watch::Sender<DetailState>>,
    rx: watch::Receiver<DetailState>,
    slug: Option<String>,
    load: Option<Mount>,
}

impl RecipeDetailLoader {
    pub fn new(api: Arc<dyn RecipeApi>) -> Self {
        let (tx, rx) = watch::channel(DetailState::Loading);
        Self {
            api,
            tx: Arc::new(tx),
            rx,
            slug: None,
            load: None,
        }
    }

    pub fn open(api: Arc<dyn RecipeApi>, slug: &str) -> Self {
        let mut loader = Self::new(api);
        loader.set_slug(slug);
        loader
    }

    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    pub fn set_slug(&mut self, slug: &str) {
        if self.slug.as_deref() == Some(slug) {
            return;
        }
        // Dropping the previous mount cancels its request.
        self.load = None;
        self.slug = Some(slug.to_owned());

        if slug.is_empty() {
            self.tx.send_replace(DetailState::NotFound);
            return;
        }
        self.tx.send_replace(DetailState::Loading);

        let mount = Mount::new();
        let token = mount.token();
        let api = Arc::clone(&self.api);
        let tx = Arc::clone(&self.tx);
        let slug = slug.to_owned();
        mount.spawn(async move {
            let next = load_detail(api.as_ref(), &slug).await;
            tx.send_if_modified(|state| {
                if token.is_cancelled() {
                    return false;
                }
                *state = next;
                true
            });
        });
        self.load = Some(mount);
    }

    pub fn state(&self) -> DetailState {
        self.rx.borrow().clone()
    }

    /// Waits for the current slug's load to finish. Returns immediately
    /// when nothing is loading.
    pub async fn settled(&mut self) -> DetailState {
        if self.load.is_none() {
            return self.state();
        }
        let settled = self
            .rx
            .wait_for(DetailState::is_settled)
            .await
            .ok()
            .map(|state| state.clone());
        settled.unwrap_or_else(|| self.state())
    }
}
