use crate::config::{MAX_BCRYPT_COST, MIN_BCRYPT_COST};
use crate::errors::ApiError;
use crate::observability::metrics::record_bcrypt_duration;
use std::time::Instant;
use tracing::instrument;

/// Hash a password with bcrypt at the given cost.
///
/// # Errors
///
/// Returns `ApiError::Crypto` if the cost is outside 10-14 or hashing fails.
#[instrument(skip_all)]
pub fn hash_password(password: &str, cost: u32) -> Result<String, ApiError> {
    if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
        return Err(ApiError::Crypto(format!(
            "Invalid bcrypt cost: {cost} (must be {MIN_BCRYPT_COST}-{MAX_BCRYPT_COST})"
        )));
    }

    let start = Instant::now();
    let result = bcrypt::hash(password, cost)
        .map_err(|e| ApiError::Crypto(format!("Password hashing failed: {e}")));
    record_bcrypt_duration("hash", start.elapsed());
    result
}

/// Build the hash verified against when a login names an unknown user.
///
/// Must be computed at the configured cost: stored hashes carry that cost, so
/// the unknown-user path then takes as long as the wrong-password path. The
/// hashed input is a random UUID that no submitted password can match.
///
/// # Errors
///
/// Same as [`hash_password`].
pub fn dummy_password_hash(cost: u32) -> Result<String, ApiError> {
    hash_password(&uuid::Uuid::new_v4().to_string(), cost)
}

/// Verify a password against a bcrypt hash
#[instrument(skip_all)]
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ApiError> {
    let start = Instant::now();
    let result = bcrypt::verify(password, hash)
        .map_err(|e| ApiError::Crypto(format!("Password verification failed: {e}")));
    record_bcrypt_duration("verify", start.elapsed());
    result
}
