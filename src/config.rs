// src/config.rs
use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use tracing::{info, warn};

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_SESSION_FILE: &str = ".recipe-session.json";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub session_file: PathBuf,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            http_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl Config {
    /// Reads `RECIPE_API_URL`, `RECIPE_SESSION_FILE` and
    /// `RECIPE_HTTP_TIMEOUT_MS`, after loading a `.env` file if present.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url: String = try_load(&lookup, "RECIPE_API_URL", DEFAULT_API_URL.to_owned());
        let session_file: String = try_load(
            &lookup,
            "RECIPE_SESSION_FILE",
            DEFAULT_SESSION_FILE.to_owned(),
        );
        let timeout_ms: u64 = try_load(&lookup, "RECIPE_HTTP_TIMEOUT_MS", DEFAULT_TIMEOUT_MS);
        Self {
            api_url,
            session_file: PathBuf::from(session_file),
            http_timeout: Duration::from_millis(timeout_ms),
        }
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key).filter(|v| !v.trim().is_empty()) else {
        info!("{key} not set, using default: {default}");
        return default;
    };
    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        default
    })
}
