// src/lib.rs
//! Client core for the recipe site: session handling, the featured and
//! detail recipe views, the contact and sign-up forms, and the email
//! verification pages. Views hold state and talk to the backend through
//! [`api::RecipeApi`]; [`view`] turns that state into text.

pub mod api;
pub mod config;
pub mod contact;
pub mod detail;
pub mod error;
pub mod featured;
pub mod form;
pub mod lifecycle;
pub mod route;
pub mod session;
pub mod signup;
pub mod status;
pub mod telemetry;
pub mod types;
pub mod validate;
pub mod verify;
pub mod view;

#[cfg(test)]
mod fake;

pub use api::{HttpApi, RecipeApi};
pub use config::Config;
pub use error::{ApiError, StoreError};
pub use session::{FileStore, MemoryStore, SessionContext, SessionStore};
