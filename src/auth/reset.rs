// src/auth/reset.rs
//
// Password-reset tokens. The raw token goes to the user (via the reset
// link); only its SHA-256 digest is stored, so a leaked database row cannot
// be replayed.

use rand::RngCore;
use sha2::{Digest, Sha256};

pub const RESET_TOKEN_LIFETIME_MINUTES: i64 = 10;

/// Returns `(raw_token, stored_hash)`.
pub fn generate_reset_token() -> (String, String) {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    let raw = hex(&bytes);
    let hash = hash_reset_token(&raw);
    (raw, hash)
}

/// Digest of a presented token, matching what `generate_reset_token` stores.
pub fn hash_reset_token(raw: &str) -> String {
    hex(&Sha256::digest(raw.as_bytes()))
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_token_hashes_to_stored_value() {
        let (raw, stored) = generate_reset_token();
        assert_eq!(raw.len(), 64);
        assert_eq!(hash_reset_token(&raw), stored);
        assert_ne!(raw, stored);
    }

    #[test]
    fn tokens_are_unique() {
        let (a, _) = generate_reset_token();
        let (b, _) = generate_reset_token();
        assert_ne!(a, b);
    }
}
