//! Input grammar checks for registration and login identifiers.

use crate::domain::types::{USERNAME_MAX_LEN, USERNAME_MIN_LEN};

/// Username grammar: 3–20 chars from `[A-Za-z0-9_]`.
pub fn is_valid_username(username: &str) -> bool {
    let len = username.chars().count();
    if len < USERNAME_MIN_LEN || len > USERNAME_MAX_LEN {
        return false;
    }
    username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// RFC-shaped email check: one `@`, non-empty local part, domain with at
/// least one dot and a 2+ letter TLD. Control characters are rejected
/// rather than stripped.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.is_empty() || email.chars().any(|c| c.is_control()) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty()
        || !local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "+_.-".contains(c))
    {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    if host.is_empty()
        || !host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || ".-".contains(c))
    {
        return false;
    }
    tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}
