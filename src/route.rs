// src/route.rs
use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Everything but RFC 3986 unreserved characters is escaped in a segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn encode(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

fn decode(segment: &str) -> Option<String> {
    percent_decode_str(segment)
        .decode_utf8()
        .ok()
        .map(|s| s.into_owned())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    RecipeDetail { slug: String },
    SignUp,
    Contact,
    Login,
    /// Carries the address that was just registered. The email travels as
    /// navigation state, not in the path.
    VerifyNotice { email: String },
    VerifyEmail { token: String },
    Verified,
}

impl Route {
    /// Maps a path to a route. Unknown paths yield `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let route = match segments.as_slice() {
            [] => Route::Home,
            ["recipes", slug] => Route::RecipeDetail {
                slug: decode(slug)?,
            },
            ["signup"] => Route::SignUp,
            ["contact"] => Route::Contact,
            ["login"] => Route::Login,
            ["verify-notice"] => Route::VerifyNotice {
                email: String::new(),
            },
            ["verify-email", token] => Route::VerifyEmail {
                token: decode(token)?,
            },
            ["verified"] => Route::Verified,
            _ => return None,
        };
        Some(route)
    }

    /// Slug and token segments are percent-encoded, so any string comes
    /// back unchanged through [`Route::parse`].
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".into(),
            Route::RecipeDetail { slug } => format!("/recipes/{}", encode(slug)),
            Route::SignUp => "/signup".into(),
            Route::Contact => "/contact".into(),
            Route::Login => "/login".into(),
            Route::VerifyNotice { .. } => "/verify-notice".into(),
            Route::VerifyEmail { token } => format!("/verify-email/{}", encode(token)),
            Route::Verified => "/verified".into(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Sends navigation requests to whoever owns the receiving end.
#[derive(Debug, Clone)]
pub struct Navigator {
    tx: mpsc::UnboundedSender<Route>,
}

impl Navigator {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Route>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn go(&self, route: Route) {
        info!(path = %route, "navigate");
        if self.tx.send(route).is_err() {
            warn!("navigation dropped, no router listening");
        }
    }
}
