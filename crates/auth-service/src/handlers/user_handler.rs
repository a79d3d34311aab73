use crate::errors::ApiError;
use crate::models::Principal;
use crate::routes::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

/// GET /users
pub async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Principal>>, ApiError> {
    let users = state.users.list().await?;
    Ok(Json(users.iter().map(|u| u.principal()).collect()))
}

/// GET /users/:id
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Principal>, ApiError> {
    let user = state
        .users
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User".to_string()))?;

    Ok(Json(user.principal()))
}
