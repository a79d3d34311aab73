//! Token payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Payload keys the authority sets itself. Custom claims may not use them.
pub const RESERVED_CLAIMS: &[&str] = &["sub", "iat", "exp", "nbf"];

/// Custom claims supplied at issuance.
pub type CustomClaims = Map<String, Value>;

/// Decoded JWT payload.
///
/// Registered claims are typed fields; everything else the issuer embedded
/// lives in `extra` and is flattened into the same JSON object on the wire.
///
/// The `sub` field identifies a principal and is redacted in `Debug` output.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (principal id).
    pub sub: String,

    /// Issued-at timestamp (Unix epoch seconds).
    pub iat: i64,

    /// Expiration timestamp (Unix epoch seconds).
    pub exp: i64,

    /// Not-before timestamp (Unix epoch seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,

    /// Custom claims.
    #[serde(flatten)]
    pub extra: CustomClaims,
}

impl fmt::Debug for Claims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Claims")
            .field("sub", &"[REDACTED]")
            .field("iat", &self.iat)
            .field("exp", &self.exp)
            .field("nbf", &self.nbf)
            .field("extra_keys", &self.extra.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Claims {
    /// Look up a custom claim.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Look up a custom claim that is expected to be a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }
}

/// First reserved key present in `claims`, if any.
pub(crate) fn find_reserved(claims: &CustomClaims) -> Option<&'static str> {
    RESERVED_CLAIMS
        .iter()
        .copied()
        .find(|key| claims.contains_key(*key))
}
