//! Observability for the auth service
//!
//! # Privacy by Default
//!
//! Token and credential operations use `#[instrument(skip_all)]` and log an
//! explicit allow-list of fields:
//! - **SAFE**: plaintext (error kinds, statuses, algorithm names)
//! - **HASHED**: SHA-256 prefix for correlation (subjects, usernames)
//! - **NEVER**: tokens, passwords, secrets

pub mod metrics;

use sha2::{Digest, Sha256};

/// Hash a field value for correlation in logs (SHA-256, first 8 hex chars)
///
/// Not suitable for secrets. The truncation keeps enough uniqueness for
/// debugging while limiting reversibility.
pub fn hash_for_correlation(value: &str) -> String {
    let digest = Sha256::digest(value.as_bytes());
    hex::encode(digest.get(..4).unwrap_or_default())
}
