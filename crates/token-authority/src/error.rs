//! Error types for token issuance and verification.

use thiserror::Error;

/// Reasons a presented credential is rejected.
///
/// Every variant is a client-fault condition. The messages are for logs and
/// metrics only; callers that face the network must collapse all variants
/// into one generic rejection.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// No credential carrier was present on the request.
    #[error("missing credentials")]
    MissingCredentials,

    /// The carrier was present but not of the form `Bearer <token>`.
    #[error("malformed authorization header")]
    MalformedHeader,

    /// The token is not a three-segment base64url JWT with JSON header and payload.
    #[error("malformed token")]
    MalformedToken,

    /// The signature does not match any configured key.
    #[error("invalid token signature")]
    InvalidSignature,

    /// The token's `exp` has been reached.
    #[error("token expired")]
    Expired,

    /// The token's `nbf` (or `iat`) lies in the future beyond the allowed skew.
    #[error("token not yet valid")]
    NotYetValid,
}

impl AuthError {
    /// Bounded label for metrics and structured logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::MissingCredentials => "missing_credentials",
            AuthError::MalformedHeader => "malformed_header",
            AuthError::MalformedToken => "malformed_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::Expired => "expired",
            AuthError::NotYetValid => "not_yet_valid",
        }
    }
}

/// Errors returned by [`crate::TokenAuthority::issue`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IssueError {
    #[error("principal id must not be empty")]
    EmptyPrincipal,

    #[error("token lifetime must be positive, got {0} seconds")]
    NonPositiveTtl(i64),

    #[error("token lifetime of {0} seconds overflows the expiry timestamp")]
    TtlOverflow(i64),

    #[error("activation delay must not be negative, got {0} seconds")]
    NegativeDelay(i64),

    #[error("activation delay of {0} seconds overflows the not-before timestamp")]
    DelayOverflow(i64),

    #[error("claim `{0}` is reserved and set by the authority")]
    ReservedClaim(String),

    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Errors building a [`crate::TokenAuthority`] from key material.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("signing secret must be at least {min} bytes, got {actual}")]
    SecretTooShort { min: usize, actual: usize },

    #[error("unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),
}
