//! Test server harness for E2E testing
//!
//! Provides TestAuthServer for spawning real auth service instances in tests.

use crate::crypto_fixtures::test_config;
use auth_service::config::Config;
use auth_service::crypto;
use auth_service::models::TokenResponse;
use auth_service::observability::metrics::init_metrics_recorder;
use auth_service::repositories::{InMemoryMessageStore, InMemoryUserStore};
use auth_service::routes::{self, AppState};
use auth_service::services::token_service;
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use token_authority::{Clock, TokenAuthority};
use tokio::task::JoinHandle;

/// Test harness for spawning the auth service in E2E tests
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_login_e2e() -> anyhow::Result<()> {
///     let server = TestAuthServer::spawn().await?;
///     let token = server.register_and_login("amy", "hunter2222").await?;
///
///     let response = server
///         .client()
///         .post(format!("{}/api/posts", server.url()))
///         .bearer_auth(&token)
///         .send()
///         .await?;
///
///     assert_eq!(response.status(), 200);
///     Ok(())
/// }
/// ```
pub struct TestAuthServer {
    addr: SocketAddr,
    config: Config,
    authority: Arc<TokenAuthority>,
    client: reqwest::Client,
    _handle: JoinHandle<()>,
}

impl TestAuthServer {
    /// Spawn a server with [`test_config`].
    pub async fn spawn() -> Result<Self, anyhow::Error> {
        Self::spawn_with_config(test_config()).await
    }

    /// Spawn a server with the given configuration.
    ///
    /// The server binds to a random available port (127.0.0.1:0) regardless of
    /// `config.bind_address`, starts with empty stores, and runs in the background.
    pub async fn spawn_with_config(config: Config) -> Result<Self, anyhow::Error> {
        let authority = token_service::build_authority(&config)
            .map_err(|e| anyhow::anyhow!("Failed to build token authority: {}", e))?;
        Self::start(config, authority).await
    }

    /// Spawn a server whose authority reads time from `clock`.
    pub async fn spawn_with_clock(
        config: Config,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, anyhow::Error> {
        let authority = token_service::build_authority(&config)
            .map_err(|e| anyhow::anyhow!("Failed to build token authority: {}", e))?
            .with_clock(clock);
        Self::start(config, authority).await
    }

    async fn start(config: Config, authority: TokenAuthority) -> Result<Self, anyhow::Error> {
        let authority = Arc::new(authority);
        let dummy_password_hash = crypto::dummy_password_hash(config.bcrypt_cost)
            .map_err(|e| anyhow::anyhow!("Failed to build dummy password hash: {}", e))?;

        let state = Arc::new(AppState {
            config: config.clone(),
            authority: authority.clone(),
            users: Arc::new(InMemoryUserStore::new()),
            messages: Arc::new(InMemoryMessageStore::new()),
            dummy_password_hash,
        });

        // The global recorder can only be installed once per test process;
        // later servers get a standalone handle.
        let metrics_handle = init_metrics_recorder()
            .unwrap_or_else(|_| PrometheusBuilder::new().build_recorder().handle());

        let app = routes::build_routes(state, metrics_handle);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            config,
            authority,
            client: reqwest::Client::new(),
            _handle: handle,
        })
    }

    /// Get the base URL of the test server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get reference to the server configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The authority the server issues and verifies with
    pub fn authority(&self) -> &TokenAuthority {
        &self.authority
    }

    /// Shared HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// POST /api/register
    pub async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> Result<reqwest::Response, anyhow::Error> {
        Ok(self
            .client
            .post(format!("{}/api/register", self.url()))
            .json(&json!({"username": username, "password": password}))
            .send()
            .await?)
    }

    /// POST /api/login
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<reqwest::Response, anyhow::Error> {
        Ok(self
            .client
            .post(format!("{}/api/login", self.url()))
            .json(&json!({"username": username, "password": password}))
            .send()
            .await?)
    }

    /// Register a user and return a bearer token for them.
    pub async fn register_and_login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<String, anyhow::Error> {
        let registered = self.register(username, password).await?;
        anyhow::ensure!(
            registered.status() == reqwest::StatusCode::CREATED,
            "registration failed with {}",
            registered.status()
        );

        let response = self.login(username, password).await?;
        anyhow::ensure!(
            response.status().is_success(),
            "login failed with {}",
            response.status()
        );
        let body: TokenResponse = response.json().await?;
        Ok(body.token)
    }
}
