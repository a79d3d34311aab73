use crate::errors::ApiError;
use crate::models::{CredentialsRequest, Principal, TokenResponse, WelcomeResponse};
use crate::routes::AppState;
use crate::services::user_service;
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

/// GET /api
pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the API".to_string(),
    })
}

/// Handle user registration
///
/// POST /api/register
pub async fn handle_register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<Principal>), ApiError> {
    let principal =
        user_service::register_user(state.users.as_ref(), &payload, state.config.bcrypt_cost)
            .await?;

    Ok((StatusCode::CREATED, Json(principal)))
}

/// Handle login
///
/// POST /api/login
pub async fn handle_login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = user_service::login(
        state.users.as_ref(),
        &state.authority,
        &payload,
        &state.dummy_password_hash,
        state.config.token_ttl_seconds,
    )
    .await?;

    Ok(Json(token))
}
