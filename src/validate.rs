// src/validate.rs
//! Local checks run before a sign-up is sent.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

const EMAIL_FORBIDDEN: &[char] = &['#', '$', '%', '^', '&', '*', '(', ')', '_', '+', '='];
const PASSWORD_SYMBOLS: &[char] = &['@', '$', '!', '%', '*', '?', '&'];
pub const PASSWORD_MIN_LEN: usize = 8;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid email format.")]
    Email,

    #[error("Password must be at least 8 characters long and include both letters, Special characters, and numbers.")]
    Password,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email) && !email.contains(EMAIL_FORBIDDEN)
}

/// At least eight characters, at least one ASCII letter and one digit, and
/// nothing outside letters, digits and `@$!%*?&`.
pub fn is_valid_password(password: &str) -> bool {
    let mut len = 0;
    let mut letter = false;
    let mut digit = false;
    for c in password.chars() {
        len += 1;
        if c.is_ascii_alphabetic() {
            letter = true;
        } else if c.is_ascii_digit() {
            digit = true;
        } else if !PASSWORD_SYMBOLS.contains(&c) {
            return false;
        }
    }
    len >= PASSWORD_MIN_LEN && letter && digit
}

/// Email is checked before password, so a form with both wrong reports the
/// email.
pub fn validate_sign_up(email: &str, password: &str) -> Result<(), ValidationError> {
    if !is_valid_email(email) {
        return Err(ValidationError::Email);
    }
    if !is_valid_password(password) {
        return Err(ValidationError::Password);
    }
    Ok(())
}
