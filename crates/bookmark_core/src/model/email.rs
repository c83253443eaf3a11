//! Email shape check.
//!
//! This is a format gate for the prompt loop, not address verification:
//! `local@domain` with no whitespace and a dotted domain.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email shape regex must compile")
});

/// Reason an input was rejected as an email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EmailValidationError {
    #[error("email cannot be empty")]
    Empty,
    #[error("email cannot contain whitespace")]
    ContainsWhitespace,
    #[error("email must contain `@`")]
    MissingAt,
    #[error("email must contain exactly one `@`")]
    MultipleAt,
    #[error("email domain must contain a `.`")]
    MissingDomainDot,
    #[error("email must look like `name@domain.tld`")]
    Malformed,
}

/// Checks that `email` has the basic `local@domain.tld` shape.
pub fn validate_email(email: &str) -> Result<(), EmailValidationError> {
    if email.is_empty() {
        return Err(EmailValidationError::Empty);
    }
    if email.chars().any(char::is_whitespace) {
        return Err(EmailValidationError::ContainsWhitespace);
    }

    let Some((_, domain)) = email.rsplit_once('@') else {
        return Err(EmailValidationError::MissingAt);
    };
    if email.matches('@').count() > 1 {
        return Err(EmailValidationError::MultipleAt);
    }
    if !domain.contains('.') {
        return Err(EmailValidationError::MissingDomainDot);
    }
    if !EMAIL_SHAPE.is_match(email) {
        return Err(EmailValidationError::Malformed);
    }

    Ok(())
}
