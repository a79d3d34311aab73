//! # Auth Test Utilities
//!
//! Shared test utilities for the auth service.
//!
//! This crate provides:
//! - Fixed test secrets and a matching service configuration
//! - Test token builder (TestTokenBuilder)
//! - Server test harness (TestAuthServer for E2E tests)
//! - Custom assertions (TokenAssertions trait)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use auth_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> anyhow::Result<()> {
//!     let server = TestAuthServer::spawn().await?;
//!
//!     let token = TestTokenBuilder::new()
//!         .for_user("amy-1")
//!         .with_claim("role", "user")
//!         .build();
//!
//!     token.assert_valid_jwt().assert_for_subject("amy-1");
//!     Ok(())
//! }
//! ```

pub mod assertions;
pub mod crypto_fixtures;
pub mod server_harness;
pub mod token_builders;

// Re-export commonly used items
pub use assertions::*;
pub use crypto_fixtures::*;
pub use server_harness::*;
pub use token_builders::*;
