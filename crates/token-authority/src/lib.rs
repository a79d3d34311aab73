//! Stateless bearer-token authority.
//!
//! Issues HMAC-signed JWTs that carry a principal id and custom claims,
//! verifies presented tokens (structure, signature, expiry, activation), and
//! extracts tokens from `Authorization: Bearer <token>` header values.
//!
//! Nothing here performs I/O. Validity depends only on the token string, the
//! configured secret(s) and the [`Clock`].
//!
//! ```rust
//! use token_authority::{extract_bearer, CustomClaims, SigningAlgorithm, TokenAuthority};
//!
//! let authority = TokenAuthority::from_secret(
//!     b"0123456789abcdef0123456789abcdef",
//!     SigningAlgorithm::Hs256,
//! )?;
//!
//! let mut claims = CustomClaims::new();
//! claims.insert("role".to_string(), "user".into());
//! let token = authority.issue("amy-1", claims, 30)?;
//!
//! let header = format!("Bearer {token}");
//! let presented = extract_bearer(Some(&header))?;
//! let verified = authority.verify(presented)?;
//! assert_eq!(verified.sub, "amy-1");
//! assert_eq!(verified.get_str("role"), Some("user"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(clippy::pedantic)]

pub mod authority;
pub mod bearer;
pub mod claims;
pub mod clock;
pub mod error;

/// Secret types that prevent accidental logging
pub mod secret;

pub use authority::{
    SigningAlgorithm, TokenAuthority, MAX_CLOCK_SKEW_SECONDS, MAX_JWT_SIZE_BYTES,
    MIN_SECRET_BYTES,
};
pub use bearer::{extract_bearer, BEARER_SCHEME};
pub use claims::{Claims, CustomClaims, RESERVED_CLAIMS};
pub use clock::{Clock, SystemClock};
pub use error::{AuthError, IssueError, KeyError};

#[cfg(any(test, feature = "test-utils"))]
pub use clock::ManualClock;
