//! Custom test assertions for expressive tests
//!
//! Inspects tokens without verifying them; signature checks belong to the
//! authority under test.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::Deserialize;
use serde_json::Value;

/// JWT header structure
#[derive(Debug, Deserialize)]
struct JwtHeader {
    pub alg: String,
    pub typ: String,
}

fn decode_segment(token: &str, index: usize) -> Value {
    let segment = token
        .split('.')
        .nth(index)
        .unwrap_or_else(|| panic!("JWT has no segment {index}"));
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .unwrap_or_else(|e| panic!("Failed to base64 decode JWT segment {index}: {e}"));
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("Failed to parse JWT segment {index} as JSON: {e}"))
}

fn payload(token: &str) -> Value {
    decode_segment(token, 1)
}

/// Custom assertions for issued tokens
///
/// # Example
/// ```rust,ignore
/// token
///     .assert_valid_jwt()
///     .assert_for_subject("amy-1")
///     .assert_has_claim("role", "user");
/// ```
pub trait TokenAssertions {
    /// Assert that the token is a well-formed HMAC-signed JWT
    fn assert_valid_jwt(&self) -> &Self;

    /// Assert that the token is for the specified subject
    fn assert_for_subject(&self, subject: &str) -> &Self;

    /// Assert that a custom claim has the given value
    fn assert_has_claim(&self, key: &str, expected: impl Into<Value>) -> &Self;

    /// Assert that the token expires within the specified seconds
    fn assert_expires_in(&self, seconds: i64) -> &Self;
}

impl TokenAssertions for str {
    fn assert_valid_jwt(&self) -> &Self {
        let parts = self.split('.').count();
        assert_eq!(
            parts, 3,
            "JWT must have 3 parts (header.payload.signature), got {parts}"
        );

        let header: JwtHeader = serde_json::from_value(decode_segment(self, 0))
            .expect("JWT header must have alg and typ");
        assert!(
            matches!(header.alg.as_str(), "HS256" | "HS384" | "HS512"),
            "Expected an HMAC algorithm, got {}",
            header.alg
        );
        assert_eq!(header.typ, "JWT", "Expected JWT type");

        let claims = payload(self);
        for key in ["sub", "iat", "exp"] {
            assert!(claims.get(key).is_some(), "JWT payload is missing {key}");
        }

        self
    }

    fn assert_for_subject(&self, subject: &str) -> &Self {
        let claims = payload(self);
        assert_eq!(
            claims["sub"], subject,
            "Expected subject '{subject}', got {}",
            claims["sub"]
        );
        self
    }

    fn assert_has_claim(&self, key: &str, expected: impl Into<Value>) -> &Self {
        let claims = payload(self);
        let expected = expected.into();
        assert_eq!(
            claims.get(key),
            Some(&expected),
            "Expected claim '{key}' = {expected}"
        );
        self
    }

    fn assert_expires_in(&self, seconds: i64) -> &Self {
        let claims = payload(self);
        let exp = claims["exp"].as_i64().expect("exp must be an integer");
        let expires_in = exp - chrono::Utc::now().timestamp();

        // Allow 5-second tolerance for slow test runs
        assert!(
            (expires_in - seconds).abs() <= 5,
            "Expected token to expire in {seconds} seconds, but expires in {expires_in} seconds"
        );
        self
    }
}
