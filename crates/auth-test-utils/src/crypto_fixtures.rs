//! Fixed secrets and configuration for tests
//!
//! All fixtures are deterministic so tokens built in one test can be checked
//! against a server spawned in another.

use auth_service::config::{Config, MIN_BCRYPT_COST};
use std::collections::HashMap;
use token_authority::{SigningAlgorithm, TokenAuthority};

/// Signing secret used by test servers (32 bytes).
pub const TEST_SECRET: &str = "test-secret-0123456789abcdef0123";

/// Secret from "before" a rotation (32 bytes).
pub const TEST_PREVIOUS_SECRET: &str = "test-previous-secret-0123456789a";

/// Secret that no test server is ever configured with (32 bytes).
pub const TEST_UNRELATED_SECRET: &str = "test-unrelated-secret-0123456789";

/// Environment-style variables for a test service.
///
/// Binds to an ephemeral port and uses the cheapest accepted bcrypt cost.
pub fn test_vars() -> HashMap<String, String> {
    HashMap::from([
        ("JWT_SECRET".to_string(), TEST_SECRET.to_string()),
        ("BIND_ADDRESS".to_string(), "127.0.0.1:0".to_string()),
        ("BCRYPT_COST".to_string(), MIN_BCRYPT_COST.to_string()),
    ])
}

/// Configuration built from [`test_vars`].
pub fn test_config() -> Config {
    Config::from_vars(&test_vars()).expect("test vars must form a valid config")
}

/// Authority signing with `secret` (HS256, no clock skew).
pub fn test_authority(secret: &str) -> TokenAuthority {
    TokenAuthority::from_secret(secret.as_bytes(), SigningAlgorithm::Hs256)
        .expect("test secrets are long enough")
}
