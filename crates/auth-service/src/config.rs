use std::collections::HashMap;
use std::env;
use thiserror::Error;
use token_authority::secret::SigningSecret;
use token_authority::{SigningAlgorithm, MAX_CLOCK_SKEW_SECONDS, MIN_SECRET_BYTES};

/// Default listen address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// Default token lifetime (1 hour).
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 3600;

/// Default tolerance for `nbf`/`iat` in the future (5 minutes).
pub const DEFAULT_JWT_CLOCK_SKEW_SECONDS: i64 = 300;

/// Default bcrypt cost factor (~200ms per hash).
pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// Lowest accepted bcrypt cost.
pub const MIN_BCRYPT_COST: u32 = 10;

/// Highest accepted bcrypt cost.
pub const MAX_BCRYPT_COST: u32 = 14;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub jwt_secret: SigningSecret,
    /// Accepted for verification only, while clients still hold tokens
    /// signed before a secret rotation.
    pub jwt_previous_secret: Option<SigningSecret>,
    pub jwt_algorithm: SigningAlgorithm,
    pub token_ttl_seconds: i64,
    pub jwt_clock_skew_seconds: i64,
    pub bcrypt_cost: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}

impl ConfigError {
    fn invalid(name: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        // No fallback: a guessable default secret would let anyone mint tokens.
        let jwt_secret = vars
            .get("JWT_SECRET")
            .ok_or_else(|| ConfigError::MissingEnvVar("JWT_SECRET".to_string()))?;
        let jwt_secret = parse_secret("JWT_SECRET", jwt_secret)?;

        let jwt_previous_secret = vars
            .get("JWT_PREVIOUS_SECRET")
            .map(|value| parse_secret("JWT_PREVIOUS_SECRET", value))
            .transpose()?;

        let jwt_algorithm = match vars.get("JWT_ALGORITHM") {
            Some(value) => value
                .parse::<SigningAlgorithm>()
                .map_err(|e| ConfigError::invalid("JWT_ALGORITHM", e.to_string()))?,
            None => SigningAlgorithm::default(),
        };

        let token_ttl_seconds = match vars.get("JWT_TTL_SECONDS") {
            Some(value) => {
                let ttl: i64 = value.parse().map_err(|e| {
                    ConfigError::invalid("JWT_TTL_SECONDS", format!("{value:?} is not an integer: {e}"))
                })?;
                if ttl <= 0 {
                    return Err(ConfigError::invalid(
                        "JWT_TTL_SECONDS",
                        format!("must be positive, got {ttl}"),
                    ));
                }
                ttl
            }
            None => DEFAULT_TOKEN_TTL_SECONDS,
        };

        let jwt_clock_skew_seconds = match vars.get("JWT_CLOCK_SKEW_SECONDS") {
            Some(value) => {
                let skew: i64 = value.parse().map_err(|e| {
                    ConfigError::invalid(
                        "JWT_CLOCK_SKEW_SECONDS",
                        format!("{value:?} is not an integer: {e}"),
                    )
                })?;
                if !(0..=MAX_CLOCK_SKEW_SECONDS).contains(&skew) {
                    return Err(ConfigError::invalid(
                        "JWT_CLOCK_SKEW_SECONDS",
                        format!("must be 0-{MAX_CLOCK_SKEW_SECONDS}, got {skew}"),
                    ));
                }
                skew
            }
            None => DEFAULT_JWT_CLOCK_SKEW_SECONDS,
        };

        let bcrypt_cost = match vars.get("BCRYPT_COST") {
            Some(value) => {
                let cost: u32 = value.parse().map_err(|e| {
                    ConfigError::invalid("BCRYPT_COST", format!("{value:?} is not an integer: {e}"))
                })?;
                if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
                    return Err(ConfigError::invalid(
                        "BCRYPT_COST",
                        format!("must be {MIN_BCRYPT_COST}-{MAX_BCRYPT_COST}, got {cost}"),
                    ));
                }
                cost
            }
            None => DEFAULT_BCRYPT_COST,
        };

        Ok(Config {
            bind_address,
            jwt_secret,
            jwt_previous_secret,
            jwt_algorithm,
            token_ttl_seconds,
            jwt_clock_skew_seconds,
            bcrypt_cost,
        })
    }
}

fn parse_secret(name: &str, value: &str) -> Result<SigningSecret, ConfigError> {
    if value.len() < MIN_SECRET_BYTES {
        return Err(ConfigError::invalid(
            name,
            format!(
                "expected at least {MIN_SECRET_BYTES} bytes, got {}",
                value.len()
            ),
        ));
    }
    Ok(SigningSecret::from_str_bytes(value))
}
