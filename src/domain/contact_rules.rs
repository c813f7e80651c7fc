use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::MAX_FIELD_CHARS;

/// Something@something.tld with no whitespace or extra `@`.
/// Deliberately looser than RFC 5322.
pub static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Trims surrounding whitespace and caps the result at `MAX_FIELD_CHARS` chars.
pub fn sanitize_input(input: &str) -> String {
    input.trim().chars().take(MAX_FIELD_CHARS).collect()
}

pub fn compose_message(name: &str, email: &str, message: &str) -> String {
    format!("New Contact: {name}\nEmail: {email}\nMessage: {message}")
}
