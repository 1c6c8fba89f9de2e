//! Credential and format predicates.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::UtilsResult;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,4}$").expect("email pattern is valid")
});

/// Whether `s` looks like an email address.
///
/// ASCII lowercase only: uppercase letters and non-ASCII characters are rejected, and the
/// top-level domain must be 2 to 4 letters.
pub fn is_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

/// Hash a password with bcrypt at [`bcrypt::DEFAULT_COST`].
pub fn hash_password(password: &str) -> UtilsResult<String> {
    hash_password_with_cost(password, bcrypt::DEFAULT_COST)
}

/// Hash a password with bcrypt at an explicit cost (4..=31).
pub fn hash_password_with_cost(password: &str, cost: u32) -> UtilsResult<String> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Whether `password` matches a bcrypt `hash`. A malformed hash never matches.
pub fn check_password_hash(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_email("123_%b@123.com"));
        assert!(!is_email("123_%B@123.com"));
        assert!(!is_email("123_%B123.com"));
        assert!(!is_email("123_%Я@123.com"));
        assert!(!is_email("a@b.toolong"));
    }

    #[test]
    fn password_round_trip() {
        let hash = hash_password_with_cost("123abc", 4).unwrap();
        assert!(check_password_hash("123abc", &hash));
        assert!(!check_password_hash("123abc1", &hash));
        assert!(!check_password_hash("123abc", "not-a-hash"));
    }

    #[test]
    fn invalid_cost_is_an_error() {
        assert!(hash_password_with_cost("x", 99).is_err());
    }
}
