//! E2E tests for operational endpoints.

use auth_test_utils::server_harness::TestAuthServer;
use reqwest::StatusCode;

#[tokio::test]
async fn test_health_returns_ok() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    let response = server
        .client()
        .get(format!("{}/health", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await?, "OK");
    Ok(())
}

#[tokio::test]
async fn test_metrics_endpoint_is_public() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    let response = server
        .client()
        .get(format!("{}/metrics", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_welcome_is_public() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    let body: serde_json::Value = server
        .client()
        .get(format!("{}/api", server.url()))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(body["message"], "Welcome to the API");
    Ok(())
}
