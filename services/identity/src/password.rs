//! Password hashing and policy checks.
//!
//! Hashes are bcrypt with per-hash salt; the work factor comes from
//! configuration so tests can run at the minimum cost.

use crate::domain::types::PASSWORD_MIN_LEN;
use crate::error::IdentityError;

/// Hash a plain password at the given bcrypt cost.
pub fn hash_password(plain: &str, cost: u32) -> Result<String, IdentityError> {
    bcrypt::hash(plain, cost).map_err(|e| IdentityError::Internal(e.into()))
}

/// Verify a plain password against a stored hash. A malformed hash
/// verifies as `false` rather than erroring; the caller cannot tell it
/// apart from a wrong password, which is the point.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    bcrypt::verify(plain, hash).unwrap_or(false)
}

/// Password policy: at least 8 chars with one uppercase, one lowercase
/// and one digit. Applied at registration, reset, and password change.
pub fn check_password_policy(password: &str) -> Result<(), IdentityError> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(IdentityError::Validation(format!(
            "password must be at least {PASSWORD_MIN_LEN} characters"
        )));
    }
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_upper && has_lower && has_digit) {
        return Err(IdentityError::Validation(
            "password must contain an uppercase letter, a lowercase letter, and a digit"
                .to_owned(),
        ));
    }
    Ok(())
}
