//! Client-side checks run before a submission leaves the browser.
//!
//! The same function is called again by the backend on the received form, so
//! both sides reject the same inputs with the same wording. Checks run in a
//! fixed order and stop at the first failure:
//!
//! 1. a file is selected
//! 2. weights and impacts have the same number of comma separated tokens
//! 3. every impact token is `+` or `-`
//! 4. the email looks like `local@domain.tld`
//!
//! Weights are only counted here, not parsed; numeric parsing belongs to
//! [`crate::model::criteria::Criteria::parse`].

use crate::model::submission::FormFields;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Why a submission was blocked. `Display` is the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a file.")]
    MissingFile,
    #[error("Number of weights and impacts must be the same.")]
    CountMismatch,
    #[error("Impacts must be either + or -")]
    InvalidImpact,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

/// Splits on `,` and trims every token. Empty input yields one empty token.
pub fn split_tokens(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Runs every check in order and returns the first failure.
pub fn validate(file_selected: bool, fields: &FormFields) -> Result<(), ValidationError> {
    if !file_selected {
        return Err(ValidationError::MissingFile);
    }

    let weights: Vec<&str> = split_tokens(&fields.weights).collect();
    let impacts: Vec<&str> = split_tokens(&fields.impacts).collect();
    if weights.len() != impacts.len() {
        return Err(ValidationError::CountMismatch);
    }

    if !impacts.iter().all(|i| *i == "+" || *i == "-") {
        return Err(ValidationError::InvalidImpact);
    }

    if !is_valid_email(&fields.email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(())
}
