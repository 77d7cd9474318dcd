use std::sync::LazyLock;

use regex::Regex;
use shared::{domain::FormState, error::ValidationError, protocol::SignupRequest};

pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

// Letters and digits only; the letter/digit requirements are checked separately
// because the regex engine has no lookahead.
static PASSWORD_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("password pattern"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn is_strong_password(password: &str) -> bool {
    password.len() >= MIN_PASSWORD_LEN
        && PASSWORD_CHARSET.is_match(password)
        && password.bytes().any(|b| b.is_ascii_alphabetic())
        && password.bytes().any(|b| b.is_ascii_digit())
}

/// Trims Unicode whitespace plus the byte-order mark, which `str::trim` keeps.
pub fn trim_input(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Checks the form in submission order and builds the outbound request.
///
/// All three fields are trimmed, including the password. The email is
/// lower-cased only after it has passed validation.
pub fn validate(form: &FormState) -> Result<SignupRequest, ValidationError> {
    let full_name = trim_input(&form.full_name);
    let email = trim_input(&form.email);
    let password = trim_input(&form.password);

    if full_name.is_empty() || email.is_empty() {
        return Err(ValidationError::MissingRequiredField);
    }
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmailFormat);
    }
    if !is_strong_password(password) {
        return Err(ValidationError::WeakPassword);
    }

    Ok(SignupRequest {
        full_name: full_name.to_string(),
        email: email.to_lowercase(),
        password: password.to_string(),
    })
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
