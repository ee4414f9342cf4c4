// src/featured.rs
//! Featured recipes: personalized recommendations for signed-in users,
//! a fixed fallback list for everyone else.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::api::RecipeApi;
use crate::lifecycle::Mount;
use crate::session::SessionContext;
use crate::types::RecipeSummary;

pub const MSG_SESSION_EXPIRED: &str = "Session expired or not authorized. Please log in again.";
pub const MSG_FEATURED_FAILED: &str =
    "Failed to load personalized recipes. Displaying general recommendations.";

fn placeholder(n: u8, slug: &str, title: &str, image: &str, calories: f64, time: f64) -> RecipeSummary {
    RecipeSummary {
        id: Some(format!("d{n}")),
        recipe_id: Some(format!("dummy{n}")),
        title: title.to_owned(),
        image: Some(image.to_owned()),
        link: Some(format!("/recipes/{slug}")),
        source_url: None,
        calories: Some(calories),
        time: Some(time),
    }
}

/// The three placeholder recipes shown when personalization is unavailable.
pub fn fallback_recipes() -> Vec<RecipeSummary> {
    vec![
        placeholder(
            1,
            "spaghetti-carbonara",
            "Spaghetti Carbonara (Dummy)",
            "/assets/images/carbonara.jpg",
            500.0,
            30.0,
        ),
        placeholder(
            2,
            "avocado-toast",
            "Avocado Toast (Dummy)",
            "/assets/images/avocado-toast.jfif",
            250.0,
            10.0,
        ),
        placeholder(
            3,
            "berry-smoothie",
            "Berry Smoothie (Dummy)",
            "/assets/images/berry-smoothie.jfif",
            180.0,
            5.0,
        ),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Fallback,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeaturedState {
    pub phase: Phase,
    pub recipes: Vec<RecipeSummary>,
    pub error: Option<String>,
    /// A token was present when loading started. Only affects the loading
    /// text.
    pub personalized: bool,
}

/// What one fetch attempt produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Personalized(Vec<RecipeSummary>),
    General,
    Failed(String),
}

impl Default for FeaturedState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            recipes: fallback_recipes(),
            error: None,
            personalized: false,
        }
    }
}

impl FeaturedState {
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn is_settled(&self) -> bool {
        matches!(self.phase, Phase::Success | Phase::Fallback | Phase::Error)
    }

    pub fn begin(&mut self, personalized: bool) {
        self.error = None;
        self.phase = Phase::Loading;
        self.personalized = personalized;
    }

    pub fn apply(&mut self, outcome: Outcome) {
        self.error = None;
        match outcome {
            Outcome::Personalized(recipes) if !recipes.is_empty() => {
                self.phase = Phase::Success;
                self.recipes = recipes;
            }
            Outcome::Personalized(_) | Outcome::General => {
                self.phase = Phase::Fallback;
                self.recipes = fallback_recipes();
            }
            Outcome::Failed(message) => {
                self.phase = Phase::Error;
                self.error = Some(message);
                self.recipes = fallback_recipes();
            }
        }
    }
}

/// One pass of the fetch sequence. Without a token no request is made.
/// A 401 clears the session before reporting.
pub async fn fetch_featured(api: &dyn RecipeApi, session: &SessionContext) -> Outcome {
    let Some(token) = session.token() else {
        info!("no session token, showing general recipes");
        return Outcome::General;
    };

    info!("session token present, fetching personalized recipes");
    match api.featured(&token).await {
        Ok(recipes) if recipes.is_empty() => {
            info!("no recommendations returned, falling back to general recipes");
            Outcome::General
        }
        Ok(recipes) => {
            info!(count = recipes.len(), "personalized recipes loaded");
            Outcome::Personalized(recipes)
        }
        Err(e) if e.is_unauthorized() => {
            warn!("featured recipes rejected the session, signing out");
            session.clear();
            Outcome::Failed(MSG_SESSION_EXPIRED.to_owned())
        }
        Err(e) => {
            error!("error fetching recommended recipes: {e}");
            Outcome::Failed(MSG_FEATURED_FAILED.to_owned())
        }
    }
}

/// A mounted featured-recipes view. The fetch runs once, at mount; dropping
/// the view abandons it.
#[derive(Debug)]
pub struct FeaturedRecipes {
    rx: watch::Receiver<FeaturedState>,
    _mount: Mount,
}

impl FeaturedRecipes {
    pub fn mount(api: Arc<dyn RecipeApi>, session: SessionContext) -> Self {
        let mut initial = FeaturedState::default();
        initial.begin(session.token().is_some());
        let (tx, rx) = watch::channel(initial);

        let mount = Mount::new();
        let token = mount.token();
        mount.spawn(async move {
            let outcome = fetch_featured(api.as_ref(), &session).await;
            tx.send_if_modified(|state| {
                if token.is_cancelled() {
                    return false;
                }
                state.apply(outcome);
                true
            });
        });

        Self { rx, _mount: mount }
    }

    pub fn state(&self) -> FeaturedState {
        self.rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FeaturedState> {
        self.rx.clone()
    }

    /// Waits for a terminal state.
    pub async fn settled(&mut self) -> FeaturedState {
        let settled = self
            .rx
            .wait_for(FeaturedState::is_settled)
            .await
            .ok()
            .map(|state| state.clone());
        settled.unwrap_or_else(|| self.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{recipe, FakeApi, Reply};
    use std::time::Duration;

    fn signed_in() -> SessionContext {
        let session = SessionContext::in_memory();
        session.sign_in("jwt-abc", Some("user-1")).unwrap();
        session
    }

    #[test]
    fn fallback_has_three_unique_keys() {
        let list = fallback_recipes();
        assert_eq!(list.len(), 3);
        let mut keys: Vec<_> = list.iter().map(|r| r.key().unwrap()).collect();
        keys.dedup();
        assert_eq!(keys, ["d1", "d2", "d3"]);
    }

    #[test]
    fn apply_clears_previous_error() {
        let mut state = FeaturedState::default();
        state.apply(Outcome::Failed("boom".into()));
        assert_eq!(state.phase, Phase::Error);

        state.begin(true);
        assert_eq!(state.error, None);
        assert!(state.is_loading());

        state.apply(Outcome::Personalized(vec![recipe("r1", "Ramen")]));
        assert_eq!(state.phase, Phase::Success);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn no_token_never_calls_backend() {
        let api = Arc::new(FakeApi {
            featured: Reply::Ok(vec![recipe("r1", "Ramen")]),
            ..FakeApi::default()
        });
        let mut view = FeaturedRecipes::mount(api.clone(), SessionContext::in_memory());
        assert!(!view.state().personalized);

        let state = view.settled().await;
        assert_eq!(state.phase, Phase::Fallback);
        assert_eq!(state.recipes, fallback_recipes());
        assert_eq!(state.error, None);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn server_list_rendered_in_order() {
        let list = vec![recipe("r3", "Curry"), recipe("r1", "Ramen"), recipe("r2", "Pho")];
        let api = Arc::new(FakeApi {
            featured: Reply::Ok(list.clone()),
            ..FakeApi::default()
        });
        let mut view = FeaturedRecipes::mount(api.clone(), signed_in());
        assert!(view.state().is_loading());

        let state = view.settled().await;
        assert_eq!(state.phase, Phase::Success);
        assert_eq!(state.recipes, list);
        assert_eq!(api.calls(), ["featured:jwt-abc"]);
    }

    #[tokio::test]
    async fn empty_list_falls_back_without_error() {
        let api = Arc::new(FakeApi::default());
        let mut view = FeaturedRecipes::mount(api, signed_in());

        let state = view.settled().await;
        assert_eq!(state.phase, Phase::Fallback);
        assert_eq!(state.error, None);
        assert_eq!(state.recipes.len(), 3);
    }

    #[tokio::test]
    async fn unauthorized_clears_session() {
        let session = signed_in();
        let api = Arc::new(FakeApi {
            featured: Reply::Fail(401, Some("jwt expired")),
            ..FakeApi::default()
        });
        let mut view = FeaturedRecipes::mount(api, session.clone());

        let state = view.settled().await;
        assert_eq!(state.phase, Phase::Error);
        assert_eq!(state.error.as_deref(), Some(MSG_SESSION_EXPIRED));
        assert_eq!(state.recipes, fallback_recipes());
        assert_eq!(session.token(), None);
        assert_eq!(session.user_id(), None);
    }

    #[tokio::test]
    async fn server_error_keeps_session() {
        let session = signed_in();
        let api = Arc::new(FakeApi {
            featured: Reply::Fail(503, None),
            ..FakeApi::default()
        });
        let mut view = FeaturedRecipes::mount(api, session.clone());

        let state = view.settled().await;
        assert_eq!(state.phase, Phase::Error);
        assert_eq!(state.error.as_deref(), Some(MSG_FEATURED_FAILED));
        assert_eq!(state.recipes, fallback_recipes());
        assert!(session.token().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_view_discards_late_result() {
        let session = signed_in();
        let api = Arc::new(FakeApi {
            featured: Reply::Fail(401, None),
            delay: Duration::from_secs(2),
            ..FakeApi::default()
        });
        let view = FeaturedRecipes::mount(api.clone(), session.clone());
        let rx = view.subscribe();
        tokio::task::yield_now().await;
        drop(view);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.borrow().is_loading());
        // The abandoned request never got as far as touching the session.
        assert!(session.token().is_some());
        assert_eq!(api.calls(), ["featured:jwt-abc"]);
    }

    #[tokio::test]
    async fn each_mount_fetches_once() {
        let api = Arc::new(FakeApi {
            featured: Reply::Ok(vec![recipe("r1", "Ramen")]),
            ..FakeApi::default()
        });
        let session = signed_in();
        for _ in 0..2 {
            let mut view = FeaturedRecipes::mount(api.clone(), session.clone());
            view.settled().await;
        }
        assert_eq!(api.calls().len(), 2);
    }
}
