use crate::errors::ApiError;
use crate::models::{CreateMessageRequest, Message};
use crate::routes::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;
use token_authority::Claims;
use uuid::Uuid;

/// GET /messages
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Message>>, ApiError> {
    Ok(Json(state.messages.list().await?))
}

/// GET /messages/:id
pub async fn get_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    state
        .messages
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Message".to_string()))
}

/// Create a message owned by the caller.
///
/// POST /messages
pub async fn create_message(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateMessageRequest>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    if payload.text.trim().is_empty() {
        return Err(ApiError::Validation("Message text cannot be empty".to_string()));
    }

    let message = Message {
        id: Uuid::new_v4().to_string(),
        text: payload.text,
        user_id: claims.sub,
    };
    state.messages.put(message.clone()).await?;

    Ok((StatusCode::CREATED, Json(message)))
}

/// DELETE /messages/:id
pub async fn delete_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    state
        .messages
        .remove(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Message".to_string()))
}
