use auth_service::config::Config;
use auth_service::crypto;
use auth_service::observability::metrics::init_metrics_recorder;
use auth_service::repositories::{InMemoryMessageStore, InMemoryUserStore};
use auth_service::routes::{self, AppState};
use auth_service::services::token_service;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting auth service");

    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!(
        algorithm = %config.jwt_algorithm,
        token_ttl_seconds = config.token_ttl_seconds,
        rotation = config.jwt_previous_secret.is_some(),
        "Configuration loaded successfully"
    );

    let metrics_handle = init_metrics_recorder().map_err(|e| {
        error!("Failed to initialize metrics: {}", e);
        e
    })?;

    let authority = token_service::build_authority(&config).map_err(|e| {
        error!("Failed to build token authority: {}", e);
        e
    })?;

    let dummy_password_hash = crypto::dummy_password_hash(config.bcrypt_cost).map_err(|e| {
        error!("Failed to prepare login hash: {}", e);
        e
    })?;

    let bind_address = config.bind_address.clone();

    let state = Arc::new(AppState {
        config,
        authority: Arc::new(authority),
        users: Arc::new(InMemoryUserStore::new()),
        messages: Arc::new(InMemoryMessageStore::new()),
        dummy_password_hash,
    });

    let app = routes::build_routes(state, metrics_handle);

    let addr: SocketAddr = bind_address.parse().map_err(|e| {
        error!("Invalid bind address: {}", e);
        e
    })?;

    info!("Auth service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
