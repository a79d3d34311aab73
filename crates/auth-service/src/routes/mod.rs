//! HTTP routes for the auth service.
//!
//! Defines the Axum router and application state.

use crate::config::Config;
use crate::handlers::{
    self, auth_handler, message_handler, posts_handler, user_handler,
};
use crate::middleware::auth::{require_auth, AuthState};
use crate::repositories::{MessageStore, UserStore};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use token_authority::TokenAuthority;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,

    /// Issues tokens at login and backs the gate.
    pub authority: Arc<TokenAuthority>,

    pub users: Arc<dyn UserStore>,

    pub messages: Arc<dyn MessageStore>,

    /// Verified against on unknown-user logins; built at `config.bcrypt_cost`.
    pub dummy_password_hash: String,
}

/// Build the application routes.
///
/// - `/health`, `/metrics`, `GET /api`, `POST /api/register`,
///   `POST /api/login` - public
/// - `/api/posts`, `/api/profile`, `/session`, `/users`, `/messages` -
///   behind the bearer gate
/// - TraceLayer for request logging
/// - 30 second request timeout
pub fn build_routes(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let auth_state = Arc::new(AuthState {
        authority: state.authority.clone(),
    });

    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api", get(auth_handler::welcome))
        .route("/api/register", post(auth_handler::handle_register))
        .route("/api/login", post(auth_handler::handle_login))
        .with_state(state.clone());

    let metrics_routes = Router::new()
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(metrics_handle);

    let protected_routes = Router::new()
        .route("/api/posts", post(posts_handler::create_post))
        .route("/api/profile", get(posts_handler::get_profile))
        .route("/session", get(posts_handler::get_profile))
        .route("/users", get(user_handler::list_users))
        .route("/users/:id", get(user_handler::get_user))
        .route(
            "/messages",
            get(message_handler::list_messages).post(message_handler::create_message),
        )
        .route(
            "/messages/:id",
            get(message_handler::get_message).delete(message_handler::delete_message),
        )
        .route_layer(middleware::from_fn_with_state(auth_state, require_auth))
        .with_state(state);

    public_routes
        .merge(metrics_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
}
