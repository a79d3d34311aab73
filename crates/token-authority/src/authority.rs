//! Token issuance and verification.
//!
//! A [`TokenAuthority`] owns the HMAC signing secret (plus an optional
//! previous secret accepted during rotation) and a [`Clock`]. It holds no
//! mutable state, so one instance can be shared across request handlers
//! behind an `Arc`.
//!
//! # Verification order
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. Structure: size limit, three non-empty base64url segments, JSON header
//!    and payload (`MalformedToken`)
//! 2. Signature against the current secret, then the previous one
//!    (`InvalidSignature`)
//! 3. Expiry: `exp <= now` (`Expired`)
//! 4. Activation: `nbf` or `iat` later than `now + clock_skew` (`NotYetValid`)

use crate::claims::{find_reserved, Claims, CustomClaims};
use crate::clock::{Clock, SystemClock};
use crate::error::{AuthError, IssueError, KeyError};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::instrument;

/// Maximum accepted token size in bytes (8KB).
///
/// Checked before any base64 decoding or signature work.
pub const MAX_JWT_SIZE_BYTES: usize = 8192;

/// Minimum HMAC secret length in bytes.
pub const MIN_SECRET_BYTES: usize = 32;

/// Upper bound on the `nbf`/`iat` clock skew tolerance (10 minutes).
pub const MAX_CLOCK_SKEW_SECONDS: i64 = 600;

/// HMAC algorithms the authority can sign with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SigningAlgorithm {
    #[default]
    Hs256,
    Hs384,
    Hs512,
}

impl SigningAlgorithm {
    /// JOSE `alg` header value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SigningAlgorithm::Hs256 => "HS256",
            SigningAlgorithm::Hs384 => "HS384",
            SigningAlgorithm::Hs512 => "HS512",
        }
    }

    fn as_jwt(self) -> Algorithm {
        match self {
            SigningAlgorithm::Hs256 => Algorithm::HS256,
            SigningAlgorithm::Hs384 => Algorithm::HS384,
            SigningAlgorithm::Hs512 => Algorithm::HS512,
        }
    }
}

impl FromStr for SigningAlgorithm {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HS256" => Ok(SigningAlgorithm::Hs256),
            "HS384" => Ok(SigningAlgorithm::Hs384),
            "HS512" => Ok(SigningAlgorithm::Hs512),
            other => Err(KeyError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for SigningAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issues and verifies signed, time-bounded bearer tokens.
#[derive(Clone)]
pub struct TokenAuthority {
    algorithm: SigningAlgorithm,
    encoding_key: EncodingKey,
    /// Current key first, then the previous key if rotation is in progress.
    decoding_keys: Vec<DecodingKey>,
    validation: Validation,
    clock: Arc<dyn Clock>,
    clock_skew_seconds: i64,
}

impl fmt::Debug for TokenAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAuthority")
            .field("algorithm", &self.algorithm)
            .field("keys", &"[REDACTED]")
            .field("verification_keys", &self.decoding_keys.len())
            .field("clock", &self.clock)
            .field("clock_skew_seconds", &self.clock_skew_seconds)
            .finish()
    }
}

fn check_secret(secret: &[u8]) -> Result<(), KeyError> {
    if secret.len() < MIN_SECRET_BYTES {
        return Err(KeyError::SecretTooShort {
            min: MIN_SECRET_BYTES,
            actual: secret.len(),
        });
    }
    Ok(())
}

impl TokenAuthority {
    /// Build an authority that signs and verifies with `secret`.
    ///
    /// Uses the system clock and zero clock skew tolerance.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::SecretTooShort` if `secret` is shorter than
    /// [`MIN_SECRET_BYTES`].
    pub fn from_secret(secret: &[u8], algorithm: SigningAlgorithm) -> Result<Self, KeyError> {
        check_secret(secret)?;

        // exp/nbf/iat are checked against our own clock after decoding, so
        // jsonwebtoken only verifies structure and signature.
        let mut validation = Validation::new(algorithm.as_jwt());
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();
        validation.leeway = 0;

        Ok(Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_keys: vec![DecodingKey::from_secret(secret)],
            validation,
            clock: Arc::new(SystemClock),
            clock_skew_seconds: 0,
        })
    }

    /// Also accept tokens signed with a previous secret.
    ///
    /// New tokens are always signed with the current secret.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::SecretTooShort` under the same rule as
    /// [`TokenAuthority::from_secret`].
    pub fn with_previous_secret(mut self, secret: &[u8]) -> Result<Self, KeyError> {
        check_secret(secret)?;
        self.decoding_keys.truncate(1);
        self.decoding_keys.push(DecodingKey::from_secret(secret));
        Ok(self)
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Tolerance applied to `nbf` and `iat`. Clamped to `0..=MAX_CLOCK_SKEW_SECONDS`.
    #[must_use]
    pub fn with_clock_skew(mut self, seconds: i64) -> Self {
        self.clock_skew_seconds = seconds.clamp(0, MAX_CLOCK_SKEW_SECONDS);
        self
    }

    #[must_use]
    pub fn algorithm(&self) -> SigningAlgorithm {
        self.algorithm
    }

    /// Issue a token for `principal_id` that expires `ttl_seconds` from now.
    ///
    /// The payload is `{sub, iat, exp, ...claims}`. Two calls in the same
    /// second with identical inputs produce identical tokens.
    ///
    /// # Errors
    ///
    /// - `EmptyPrincipal` if `principal_id` is empty
    /// - `NonPositiveTtl` if `ttl_seconds <= 0`
    /// - `ReservedClaim` if `claims` contains `sub`, `iat`, `exp` or `nbf`
    /// - `TtlOverflow` if the expiry does not fit in an `i64`
    /// - `Signing` if encoding fails
    #[instrument(skip_all)]
    pub fn issue(
        &self,
        principal_id: &str,
        claims: CustomClaims,
        ttl_seconds: i64,
    ) -> Result<String, IssueError> {
        self.sign_claims(principal_id, claims, ttl_seconds, None)
    }

    /// Issue a token that only becomes valid `delay_seconds` from now.
    ///
    /// The token carries `nbf = now + delay_seconds` and stays valid for
    /// `ttl_seconds` after that.
    ///
    /// # Errors
    ///
    /// Same as [`TokenAuthority::issue`], plus `NegativeDelay` if
    /// `delay_seconds < 0`.
    #[instrument(skip_all)]
    pub fn issue_not_before(
        &self,
        principal_id: &str,
        claims: CustomClaims,
        ttl_seconds: i64,
        delay_seconds: i64,
    ) -> Result<String, IssueError> {
        if delay_seconds < 0 {
            return Err(IssueError::NegativeDelay(delay_seconds));
        }
        self.sign_claims(principal_id, claims, ttl_seconds, Some(delay_seconds))
    }

    fn sign_claims(
        &self,
        principal_id: &str,
        claims: CustomClaims,
        ttl_seconds: i64,
        delay_seconds: Option<i64>,
    ) -> Result<String, IssueError> {
        if principal_id.is_empty() {
            return Err(IssueError::EmptyPrincipal);
        }
        if ttl_seconds <= 0 {
            return Err(IssueError::NonPositiveTtl(ttl_seconds));
        }
        if let Some(key) = find_reserved(&claims) {
            return Err(IssueError::ReservedClaim(key.to_string()));
        }

        let now = self.clock.now();
        let nbf = match delay_seconds {
            Some(delay) => Some(
                now.checked_add(delay)
                    .ok_or(IssueError::DelayOverflow(delay))?,
            ),
            None => None,
        };
        let exp = nbf
            .unwrap_or(now)
            .checked_add(ttl_seconds)
            .ok_or(IssueError::TtlOverflow(ttl_seconds))?;

        let payload = Claims {
            sub: principal_id.to_string(),
            iat: now,
            exp,
            nbf,
            extra: claims,
        };

        // Header::new sets typ = "JWT".
        let header = Header::new(self.algorithm.as_jwt());
        encode(&header, &payload, &self.encoding_key)
            .map_err(|e| IssueError::Signing(e.to_string()))
    }

    /// Verify `token` and return its claims.
    ///
    /// Pure function of the token, the clock reading and the configured keys.
    ///
    /// # Errors
    ///
    /// `MalformedToken`, `InvalidSignature`, `Expired` or `NotYetValid`, in
    /// the order documented at module level.
    #[instrument(skip_all)]
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        check_structure(token)?;

        let claims = self.decode_signed(token)?;

        let now = self.clock.now();
        if claims.exp <= now {
            tracing::debug!(
                target: "token_authority",
                exp = claims.exp,
                now = now,
                "Token rejected: expired"
            );
            return Err(AuthError::Expired);
        }

        let latest_start = now.saturating_add(self.clock_skew_seconds);
        if claims.nbf.is_some_and(|nbf| nbf > latest_start) || claims.iat > latest_start {
            tracing::debug!(
                target: "token_authority",
                iat = claims.iat,
                nbf = ?claims.nbf,
                now = now,
                clock_skew_seconds = self.clock_skew_seconds,
                "Token rejected: not yet valid"
            );
            return Err(AuthError::NotYetValid);
        }

        Ok(claims)
    }

    fn decode_signed(&self, token: &str) -> Result<Claims, AuthError> {
        for (index, key) in self.decoding_keys.iter().enumerate() {
            match decode::<Claims>(token, key, &self.validation) {
                Ok(data) => {
                    if index > 0 {
                        tracing::debug!(target: "token_authority", "Token verified with previous secret");
                    }
                    return Ok(data.claims);
                }
                Err(e) => match e.kind() {
                    ErrorKind::InvalidSignature => continue,
                    // A foreign alg can never carry a valid signature for our key.
                    ErrorKind::InvalidAlgorithm => {
                        tracing::debug!(target: "token_authority", "Token rejected: unexpected algorithm");
                        return Err(AuthError::InvalidSignature);
                    }
                    _ => {
                        tracing::debug!(target: "token_authority", error = %e, "Token rejected: undecodable");
                        return Err(AuthError::MalformedToken);
                    }
                },
            }
        }

        tracing::debug!(target: "token_authority", "Token rejected: signature mismatch");
        Err(AuthError::InvalidSignature)
    }
}

/// Size and segment checks done before any signature work.
fn check_structure(token: &str) -> Result<(), AuthError> {
    if token.len() > MAX_JWT_SIZE_BYTES {
        tracing::debug!(
            target: "token_authority",
            token_size = token.len(),
            max_size = MAX_JWT_SIZE_BYTES,
            "Token rejected: size exceeds maximum allowed"
        );
        return Err(AuthError::MalformedToken);
    }

    let mut segments = 0usize;
    for segment in token.split('.') {
        segments += 1;
        if segments > 3 || segment.is_empty() {
            tracing::debug!(target: "token_authority", "Token rejected: invalid segment");
            return Err(AuthError::MalformedToken);
        }
        let Ok(bytes) = URL_SAFE_NO_PAD.decode(segment) else {
            tracing::debug!(target: "token_authority", "Token rejected: invalid segment");
            return Err(AuthError::MalformedToken);
        };
        // Header and payload must be JSON objects; the signature is opaque.
        if segments < 3 && serde_json::from_slice::<Map<String, Value>>(&bytes).is_err() {
            tracing::debug!(target: "token_authority", segment = segments, "Token rejected: segment is not a JSON object");
            return Err(AuthError::MalformedToken);
        }
    }

    if segments != 3 {
        tracing::debug!(target: "token_authority", segments, "Token rejected: wrong segment count");
        return Err(AuthError::MalformedToken);
    }

    Ok(())
}
