//! Secret generation: verification codes, session ids, CSRF secrets,
//! reset tokens. Everything draws from the CSPRNG behind `rand::rng()`.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::RngExt;
use sha2::{Digest, Sha256};

use crate::domain::types::{TOKEN_BYTES, VERIFICATION_CODE_LEN};

/// Zero-padded numeric verification code, e.g. `"042917"`.
pub fn generate_verification_code() -> String {
    let mut rng = rand::rng();
    let modulus = 10u32.pow(VERIFICATION_CODE_LEN);
    let code = rng.random_range(0..modulus);
    format!("{code:0width$}", width = VERIFICATION_CODE_LEN as usize)
}

/// Session id: SHA-256 over the owning user id, the high-resolution
/// clock, and 32 random bytes, hex-encoded. The digest keeps the id a
/// fixed 64-char opaque string regardless of its inputs.
pub fn generate_session_id(user_id: i32) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_nanos();

    let mut hasher = Sha256::new();
    hasher.update(user_id.to_be_bytes());
    hasher.update(nanos.to_be_bytes());
    hasher.update(random_bytes());
    hex::encode(hasher.finalize())
}

/// Per-session CSRF secret, independent of the session id.
pub fn generate_csrf_secret() -> String {
    hex::encode(random_bytes())
}

/// Single-use password-reset token.
pub fn generate_reset_token() -> String {
    hex::encode(random_bytes())
}

fn random_bytes() -> [u8; TOKEN_BYTES] {
    let mut rng = rand::rng();
    let mut bytes = [0u8; TOKEN_BYTES];
    for b in &mut bytes {
        *b = rng.random_range(0..=u8::MAX);
    }
    bytes
}
