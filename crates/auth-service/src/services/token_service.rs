use crate::config::Config;
use crate::errors::ApiError;
use crate::models::{TokenResponse, User};
use crate::observability::metrics::record_token_issuance;
use token_authority::secret::ExposeSecret;
use token_authority::{CustomClaims, IssueError, KeyError, TokenAuthority};

/// Build the process-wide authority from configuration.
///
/// The previous secret, if configured, is accepted for verification only.
pub fn build_authority(config: &Config) -> Result<TokenAuthority, KeyError> {
    let mut authority =
        TokenAuthority::from_secret(config.jwt_secret.expose_secret(), config.jwt_algorithm)?
            .with_clock_skew(config.jwt_clock_skew_seconds);

    if let Some(previous) = &config.jwt_previous_secret {
        authority = authority.with_previous_secret(previous.expose_secret())?;
    }

    Ok(authority)
}

/// Issue a bearer token for an authenticated user.
///
/// Claims: `sub` is the user id, plus `username`.
pub fn issue_user_token(
    authority: &TokenAuthority,
    user: &User,
    ttl_seconds: i64,
) -> Result<TokenResponse, ApiError> {
    let mut claims = CustomClaims::new();
    claims.insert("username".to_string(), user.username.clone().into());

    let token = authority
        .issue(&user.id, claims, ttl_seconds)
        .map_err(|e| {
            record_token_issuance("error");
            tracing::error!(target: "auth.login", error = %e, "Token issuance failed");
            match e {
                IssueError::Signing(msg) => ApiError::Crypto(msg),
                _ => ApiError::Internal,
            }
        })?;

    record_token_issuance("success");

    Ok(TokenResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: u64::try_from(ttl_seconds).unwrap_or_default(),
    })
}
