//! Registration and login.

use crate::crypto;
use crate::errors::ApiError;
use crate::models::{CredentialsRequest, Principal, TokenResponse};
use crate::observability::hash_for_correlation;
use crate::observability::metrics::record_login_attempt;
use crate::repositories::UserStore;
use crate::services::token_service;
use token_authority::TokenAuthority;
use tracing::instrument;

const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 72; // bcrypt ignores bytes past 72
const MAX_USERNAME_LENGTH: usize = 64;

/// Register a new user.
///
/// # Errors
///
/// - `Validation` for an empty/oversized username or a password outside 8-72 bytes
/// - `UserExists` if the username is taken
#[instrument(skip_all)]
pub async fn register_user(
    users: &dyn UserStore,
    request: &CredentialsRequest,
    bcrypt_cost: u32,
) -> Result<Principal, ApiError> {
    let username = validate_username(&request.username)?;
    validate_password(request.password())?;

    if users.find_by_login_name(username).await?.is_some() {
        return Err(ApiError::UserExists);
    }

    let password = request.password().to_string();
    let password_hash =
        run_blocking(move || crypto::hash_password(&password, bcrypt_cost)).await?;

    let user = users.create(username, &password_hash).await?;

    tracing::info!(
        target: "auth.login",
        user = %hash_for_correlation(&user.id),
        "User registered"
    );

    Ok(user.principal())
}

/// Check credentials and issue a token.
///
/// Unknown user and wrong password both yield `InvalidCredentials`, after the
/// same bcrypt work, and no token is issued. An unknown user is checked
/// against `dummy_hash`, which must be built with
/// [`crypto::dummy_password_hash`] at the configured cost.
#[instrument(skip_all)]
pub async fn login(
    users: &dyn UserStore,
    authority: &TokenAuthority,
    request: &CredentialsRequest,
    dummy_hash: &str,
    ttl_seconds: i64,
) -> Result<TokenResponse, ApiError> {
    let user = users.find_by_login_name(request.username.trim()).await?;

    let hash_to_verify = user
        .as_ref()
        .map_or(dummy_hash, |u| u.password_hash.as_str())
        .to_string();
    let password = request.password().to_string();
    let is_valid =
        run_blocking(move || crypto::verify_password(&password, &hash_to_verify)).await?;

    let user = match user {
        Some(user) if is_valid => user,
        _ => {
            record_login_attempt("error");
            tracing::debug!(
                target: "auth.login",
                username = %hash_for_correlation(&request.username),
                "Login rejected"
            );
            return Err(ApiError::InvalidCredentials);
        }
    };

    record_login_attempt("success");
    tracing::debug!(
        target: "auth.login",
        user = %hash_for_correlation(&user.id),
        "Login succeeded"
    );

    token_service::issue_user_token(authority, &user, ttl_seconds)
}

fn validate_username(username: &str) -> Result<&str, ApiError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(ApiError::Validation("Username cannot be empty".to_string()));
    }
    if username.len() > MAX_USERNAME_LENGTH {
        return Err(ApiError::Validation(format!(
            "Username must be at most {MAX_USERNAME_LENGTH} characters"
        )));
    }
    Ok(username)
}

fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ApiError::Validation(format!(
            "Password must be at most {MAX_PASSWORD_LENGTH} bytes"
        )));
    }
    Ok(())
}

/// Run a bcrypt call off the async worker threads.
async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        tracing::error!(error = %e, "Blocking task failed");
        ApiError::Internal
    })?
}
