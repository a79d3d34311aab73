//! Bearer gate for protected routes.
//!
//! Every failure (missing header, wrong scheme, forged, expired or not yet
//! valid token) produces the same 403 response. The distinguishing
//! `AuthError` kind only reaches debug logs and the validation metric.

use crate::errors::ApiError;
use crate::observability::hash_for_correlation;
use crate::observability::metrics::record_token_validation;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderValue},
    middleware::Next,
    response::IntoResponse,
};
use std::sync::Arc;
use token_authority::{extract_bearer, AuthError, Claims, TokenAuthority};
use tracing::instrument;

/// State for the authentication middleware.
#[derive(Clone)]
pub struct AuthState {
    pub authority: Arc<TokenAuthority>,
}

/// Authentication middleware.
///
/// On success the verified [`Claims`] are stored in request extensions for
/// downstream handlers.
#[instrument(skip_all, name = "auth.middleware")]
pub async fn require_auth(
    State(state): State<Arc<AuthState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let claims = authorize(&state.authority, req.headers().get(AUTHORIZATION))?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Extract and verify the bearer credential from an `Authorization` header.
///
/// A header value that is not valid UTF-8 is `MalformedHeader`.
pub fn authorize(
    authority: &TokenAuthority,
    header: Option<&HeaderValue>,
) -> Result<Claims, AuthError> {
    let result = header
        .map(|value| value.to_str().map_err(|_| AuthError::MalformedHeader))
        .transpose()
        .and_then(extract_bearer)
        .and_then(|token| authority.verify(token));

    match &result {
        Ok(claims) => {
            record_token_validation("success", None);
            tracing::debug!(
                target: "auth.middleware",
                subject = %hash_for_correlation(&claims.sub),
                "Request authorized"
            );
        }
        Err(e) => {
            record_token_validation("error", Some(e.kind()));
            tracing::debug!(
                target: "auth.middleware",
                error_kind = e.kind(),
                "Request rejected"
            );
        }
    }

    result
}
