//! PBKDF2-HMAC-SHA256 password hashing.
//!
//! Stored format: `pbkdf2-sha256$<iterations>$<salt hex>$<hash hex>`.

use std::num::NonZeroU32;

use anyhow::{anyhow, Result};
use ring::rand::{SecureRandom, SystemRandom};
use ring::{digest, pbkdf2};

static ALGORITHM: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;
const SCHEME: &str = "pbkdf2-sha256";
const DEFAULT_ITERATIONS: u32 = 100_000;
const SALT_LEN: usize = 16;
const HASH_LEN: usize = digest::SHA256_OUTPUT_LEN;

pub fn hash_password(password: &str) -> Result<String> {
    hash_password_with(password, DEFAULT_ITERATIONS)
}

fn hash_password_with(password: &str, iterations: u32) -> Result<String> {
    let rounds = NonZeroU32::new(iterations).ok_or_else(|| anyhow!("iterations must be > 0"))?;

    let mut salt = [0u8; SALT_LEN];
    SystemRandom::new()
        .fill(&mut salt)
        .map_err(|_| anyhow!("failed to generate password salt"))?;

    let mut hash = [0u8; HASH_LEN];
    pbkdf2::derive(ALGORITHM, rounds, &salt, password.as_bytes(), &mut hash);

    Ok(format!(
        "{SCHEME}${iterations}${}${}",
        hex::encode(salt),
        hex::encode(hash)
    ))
}

/// Returns false for a wrong password and for any malformed stored hash.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (Some(scheme), Some(iterations), Some(salt), Some(hash), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return false;
    };
    if scheme != SCHEME {
        return false;
    }

    let Some(rounds) = iterations.parse::<u32>().ok().and_then(NonZeroU32::new) else {
        return false;
    };
    let (Ok(salt), Ok(hash)) = (hex::decode(salt), hex::decode(hash)) else {
        return false;
    };

    pbkdf2::verify(ALGORITHM, rounds, &salt, password.as_bytes(), &hash).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Low iteration count keeps debug-build tests fast.
    const TEST_ITERATIONS: u32 = 1_000;

    #[test]
    fn test_correct_password_verifies() {
        let stored = hash_password_with("hunter2hunter2", TEST_ITERATIONS).unwrap();
        assert!(verify_password("hunter2hunter2", &stored));
    }

    #[test]
    fn test_wrong_password_rejected() {
        let stored = hash_password_with("hunter2hunter2", TEST_ITERATIONS).unwrap();
        assert!(!verify_password("hunter3hunter3", &stored));
    }

    #[test]
    fn test_salts_differ_between_hashes() {
        let a = hash_password_with("same-password", TEST_ITERATIONS).unwrap();
        let b = hash_password_with("same-password", TEST_ITERATIONS).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_stored_format() {
        let stored = hash_password_with("password123", TEST_ITERATIONS).unwrap();
        let parts: Vec<_> = stored.split('$').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "pbkdf2-sha256");
        assert_eq!(parts[1], "1000");
        assert_eq!(parts[2].len(), SALT_LEN * 2);
        assert_eq!(parts[3].len(), HASH_LEN * 2);
    }

    #[test]
    fn test_malformed_hash_rejected() {
        assert!(!verify_password("anything", "seed"));
        assert!(!verify_password("anything", "pbkdf2-sha256$0$00$00"));
        assert!(!verify_password("anything", "bcrypt$10$zz$zz"));
    }
}
