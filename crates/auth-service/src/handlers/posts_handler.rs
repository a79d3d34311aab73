//! Gated resources keyed on the caller's own claims.

use crate::errors::ApiError;
use crate::models::{PostCreatedResponse, Principal};
use crate::routes::AppState;
use axum::{extract::State, Extension, Json};
use std::sync::Arc;
use token_authority::Claims;

/// Echo the verified claims back to the caller.
///
/// POST /api/posts
pub async fn create_post(Extension(claims): Extension<Claims>) -> Json<PostCreatedResponse> {
    Json(PostCreatedResponse {
        message: "Post created...".to_string(),
        auth_data: claims,
    })
}

/// Resolve the caller's `sub` to a principal.
///
/// GET /api/profile, GET /session
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Principal>, ApiError> {
    let user = state
        .users
        .find_by_id(&claims.sub)
        .await?
        .ok_or_else(|| ApiError::NotFound("User".to_string()))?;

    Ok(Json(user.principal()))
}
