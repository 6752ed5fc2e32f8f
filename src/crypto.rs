// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Password hashing and opaque id generation.

use anyhow::anyhow;
use hmac::{Hmac, Mac};
use ring::rand::{SecureRandom, SystemRandom};
use sha2::Sha256;
use subtle::ConstantTimeEq;

// Type alias for HMAC-SHA256
type HmacSha256 = Hmac<Sha256>;

/// Alphabet for generated ids (tokens, checks).
const ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Hash a password with HMAC-SHA256 under the configured secret,
/// hex encoded.
pub fn hash_password(secret: &str, password: &str) -> anyhow::Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| anyhow!("HMAC init failed: {e}"))?;
    mac.update(password.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Compare a candidate password against a stored hash in constant time.
pub fn verify_password(secret: &str, password: &str, stored_hash: &str) -> anyhow::Result<bool> {
    let candidate = hash_password(secret, password)?;
    Ok(candidate.as_bytes().ct_eq(stored_hash.as_bytes()).into())
}

/// Generate a random lowercase-alphanumeric id of the given length.
pub fn random_id(length: usize) -> anyhow::Result<String> {
    let rng = SystemRandom::new();
    let mut bytes = vec![0u8; length];
    rng.fill(&mut bytes)
        .map_err(|_| anyhow!("system RNG failure"))?;

    Ok(bytes
        .iter()
        .map(|b| ID_ALPHABET[*b as usize % ID_ALPHABET.len()] as char)
        .collect())
}
