// src/view.rs
//! Plain-text rendering of view state. Nothing here performs I/O or
//! changes state.

use std::fmt::Write;

use crate::contact::ContactForm;
use crate::detail::DetailState;
use crate::featured::FeaturedState;
use crate::signup::SignUpForm;
use crate::status::{StatusKind, StatusMessage};
use crate::types::{Instructions, RecipeSummary};
use crate::verify::{VerificationState, VerifyNotice};

/// Whole numbers print without a fractional part.
fn number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

fn status_line(out: &mut String, status: &StatusMessage) {
    let tag = match status.kind {
        StatusKind::Success => "ok",
        StatusKind::Error => "error",
    };
    let _ = writeln!(out, "[{tag}] {}", status.text);
}

fn recipe_card(out: &mut String, index: usize, recipe: &RecipeSummary) {
    let key = recipe
        .key()
        .map(str::to_owned)
        .unwrap_or_else(|| format!("#{index}"));
    let _ = writeln!(out, "- {} ({key})", recipe.title);
    let mut facts = Vec::new();
    if let Some(c) = recipe.calories {
        facts.push(format!("{} kcal", number(c)));
    }
    if let Some(t) = recipe.time {
        facts.push(format!("{} min", number(t)));
    }
    if !facts.is_empty() {
        let _ = writeln!(out, "  {}", facts.join(", "));
    }
    if let Some(href) = recipe.href() {
        let _ = writeln!(out, "  View Recipe -> {href}");
    }
}

pub fn featured(state: &FeaturedState) -> String {
    let mut out = String::from("Featured Recipes\n");
    if state.is_loading() {
        out.push_str(if state.personalized {
            "Loading your personalized recipes...\n"
        } else {
            "Loading general recipes...\n"
        });
    }
    if let Some(error) = &state.error {
        let _ = writeln!(out, "{error}");
    }
    if !state.is_loading() {
        for (i, recipe) in state.recipes.iter().enumerate() {
            recipe_card(&mut out, i, recipe);
        }
    }
    out
}

pub fn detail(state: &DetailState) -> String {
    let recipe = match state {
        DetailState::Loading => return "Loading recipe details...\n".into(),
        DetailState::Error(message) => return format!("{message}\n"),
        DetailState::NotFound => return "Recipe not found.\n".into(),
        DetailState::Loaded(recipe) => recipe,
    };

    let mut out = String::new();
    let summary = &recipe.summary;
    let _ = writeln!(out, "{}", summary.title);
    if let Some(image) = &summary.image {
        let _ = writeln!(out, "[image: {image}]");
    }
    let _ = writeln!(
        out,
        "{}",
        recipe
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or("No description available.")
    );
    let unknown = || "?".to_owned();
    let _ = writeln!(
        out,
        "Calories: {}",
        summary.calories.map(number).unwrap_or_else(unknown)
    );
    let _ = writeln!(
        out,
        "Time: {} minutes",
        summary.time.map(number).unwrap_or_else(unknown)
    );
    match &recipe.instructions {
        Some(Instructions::Text(text)) => {
            let _ = writeln!(out, "Instructions:\n{text}");
        }
        Some(Instructions::Steps(steps)) => {
            out.push_str("Instructions:\n");
            for (i, step) in steps.iter().enumerate() {
                let _ = writeln!(out, "{}. {step}", i + 1);
            }
        }
        None => {}
    }
    out
}

pub fn contact(form: &ContactForm) -> String {
    let mut out = String::from("Contact Us\n");
    if let Some(status) = form.status() {
        status_line(&mut out, &status);
    }
    for (name, value) in form.draft().fields() {
        let _ = writeln!(out, "{name}: {value}");
    }
    out
}

pub fn sign_up(form: &SignUpForm) -> String {
    let mut out = String::from("Create Your Account\n");
    if let Some(error) = form.error() {
        let _ = writeln!(out, "[error] {error}");
    }
    out.push_str(if form.is_loading() {
        "Creating Account...\n"
    } else {
        "Sign Up\n"
    });
    out.push_str("Already have an account? Sign in -> /login\n");
    out
}

pub fn verification(state: VerificationState) -> String {
    match state {
        VerificationState::Verifying => "Verifying your email...\n",
        VerificationState::Verified => "Email verified! Redirecting...\n",
        VerificationState::Error => "Invalid or expired verification link.\n",
    }
    .to_owned()
}

pub fn verify_notice(notice: &VerifyNotice) -> String {
    let mut out = String::from("Verify Your Email\n");
    let _ = writeln!(
        out,
        "A verification link has been sent to {}. Please check your inbox. This link will expire in 10 minutes.",
        notice.email()
    );
    if let Some(status) = notice.status() {
        status_line(&mut out, &status);
    }
    out.push_str(if notice.is_sending() {
        "Resending...\n"
    } else {
        "Resend Verification Link\n"
    });
    out
}

pub fn verified() -> String {
    "Email Verified!\nYour email has been successfully verified. You may now log in to your account.\nGo to Login -> /login\n"
        .to_owned()
}
