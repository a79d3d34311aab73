//! Builder patterns for test data construction
//!
//! Produces real signed tokens, including ones a correct server must reject
//! (expired, not yet valid, signed with another secret).

use crate::crypto_fixtures::{test_authority, TEST_SECRET};
use serde_json::Value;
use std::sync::Arc;
use token_authority::{CustomClaims, ManualClock};

/// Builder for signed test tokens
///
/// # Example
/// ```rust,ignore
/// let token = TestTokenBuilder::new()
///     .for_user("amy-1")
///     .with_claim("role", "user")
///     .expires_in(30)
///     .build();
/// ```
pub struct TestTokenBuilder {
    sub: String,
    claims: CustomClaims,
    secret: String,
    iat: i64,
    ttl: i64,
    not_before_delay: Option<i64>,
}

impl TestTokenBuilder {
    /// Create a new token builder with defaults
    pub fn new() -> Self {
        Self {
            sub: "test-subject".to_string(),
            claims: CustomClaims::new(),
            secret: TEST_SECRET.to_string(),
            iat: chrono::Utc::now().timestamp(),
            ttl: 3600,
            not_before_delay: None,
        }
    }

    /// Set the subject
    pub fn for_user(mut self, subject: &str) -> Self {
        self.sub = subject.to_string();
        self
    }

    /// Add a custom claim
    pub fn with_claim(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.claims.insert(key.to_string(), value.into());
        self
    }

    /// Sign with a different secret
    pub fn signed_with(mut self, secret: &str) -> Self {
        self.secret = secret.to_string();
        self
    }

    /// Set lifetime in seconds from `iat`
    pub fn expires_in(mut self, seconds: i64) -> Self {
        self.ttl = seconds;
        self
    }

    /// Set issued-at timestamp
    pub fn issued_at(mut self, timestamp: i64) -> Self {
        self.iat = timestamp;
        self
    }

    /// Build a token that already expired `seconds_ago` seconds ago.
    pub fn expired(self, seconds_ago: i64) -> Self {
        let ttl = self.ttl;
        self.issued_at(chrono::Utc::now().timestamp() - ttl - seconds_ago)
    }

    /// Activate the token `seconds` after `iat`
    pub fn not_before(mut self, seconds: i64) -> Self {
        self.not_before_delay = Some(seconds);
        self
    }

    /// Sign and return the compact token
    pub fn build(self) -> String {
        let authority =
            test_authority(&self.secret).with_clock(Arc::new(ManualClock::new(self.iat)));

        let token = match self.not_before_delay {
            Some(delay) => authority.issue_not_before(&self.sub, self.claims, self.ttl, delay),
            None => authority.issue(&self.sub, self.claims, self.ttl),
        };
        token.expect("test token must be issuable")
    }
}

impl Default for TestTokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}
