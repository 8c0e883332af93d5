//! Single-use password reset tokens.
//!
//! The plaintext token goes into the emailed link; only its SHA-256 hex
//! digest is stored, so a database leak does not expose usable links.

use chrono::{Duration, Utc};
use portfolio_core::types::Timestamp;
use portfolio_notify::templates::RESET_LINK_EXPIRY_MINUTES;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Random bytes per token (hex-encoded to 64 characters).
const TOKEN_BYTES: usize = 32;

/// Generate a reset token. Returns `(plaintext, sha256_hex_hash)`.
pub fn generate_reset_token() -> (String, String) {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    let plaintext: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    let hash = hash_reset_token(&plaintext);
    (plaintext, hash)
}

/// Compute the SHA-256 hex digest of a reset token.
pub fn hash_reset_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.trim().as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Expiry timestamp for a token issued now.
pub fn reset_expiry() -> Timestamp {
    Utc::now() + Duration::minutes(RESET_LINK_EXPIRY_MINUTES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_hash_is_stable() {
        let (plaintext, hash) = generate_reset_token();
        assert_eq!(plaintext.len(), 64);
        assert_eq!(hash, hash_reset_token(&plaintext));
        assert_eq!(hash.len(), 64);
        assert_ne!(hash, plaintext);
    }

    #[test]
    fn tokens_are_unique() {
        let (a, _) = generate_reset_token();
        let (b, _) = generate_reset_token();
        assert_ne!(a, b);
    }

    #[test]
    fn expiry_is_thirty_minutes_out() {
        let minutes = (reset_expiry() - Utc::now()).num_minutes();
        assert!((29..=30).contains(&minutes));
    }
}
