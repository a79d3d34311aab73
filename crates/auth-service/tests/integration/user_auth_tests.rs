//! E2E tests for registration and login.
//!
//! Tests follow the convention: `test_<feature>_<scenario>_<expected_result>`

use auth_test_utils::{TestAuthServer, TokenAssertions};
use reqwest::StatusCode;
use serde_json::Value;

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_register_happy_path_returns_principal() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    let response = server.register("amy", "hunter2222").await?;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await?;
    assert_eq!(body["username"], "amy");
    assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(body.get("password_hash").is_none());
    assert!(body.get("password").is_none());
    Ok(())
}

#[tokio::test]
async fn test_register_duplicate_username_rejected() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    server.register("amy", "hunter2222").await?;

    let response = server.register("amy", "another-password").await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await?;
    assert_eq!(body["error"]["code"], "USER_EXISTS");
    Ok(())
}

#[tokio::test]
async fn test_register_short_password_rejected() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    let response = server.register("amy", "short").await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await?;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    Ok(())
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_returns_bearer_token() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let registered: Value = server.register("amy", "hunter2222").await?.json().await?;

    let response = server.login("amy", "hunter2222").await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await?;
    assert_eq!(body["token_type"], "Bearer");
    let ttl = server.config().token_ttl_seconds;
    assert_eq!(body["expires_in"].as_i64(), Some(ttl));

    let token = body["token"].as_str().unwrap();
    token
        .assert_valid_jwt()
        .assert_for_subject(registered["id"].as_str().unwrap())
        .assert_has_claim("username", "amy")
        .assert_expires_in(ttl);
    Ok(())
}

#[tokio::test]
async fn test_login_wrong_password_returns_401_without_token() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    server.register("amy", "hunter2222").await?;

    let response = server.login("amy", "wrong-password").await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await?;
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
    assert!(body.get("token").is_none());
    Ok(())
}

#[tokio::test]
async fn test_login_unknown_user_matches_wrong_password() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    server.register("amy", "hunter2222").await?;

    let wrong_password = server.login("amy", "wrong-password").await?;
    let unknown_user = server.login("nobody", "hunter2222").await?;

    assert_eq!(wrong_password.status(), unknown_user.status());
    let a: Value = wrong_password.json().await?;
    let b: Value = unknown_user.json().await?;
    assert_eq!(a, b);
    Ok(())
}

// ============================================================================
// Login flow through the gate
// ============================================================================

#[tokio::test]
async fn test_login_flow_profile_resolves_principal() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let token = server.register_and_login("amy", "hunter2222").await?;

    for path in ["/api/profile", "/session"] {
        let response = server
            .client()
            .get(format!("{}{path}", server.url()))
            .bearer_auth(&token)
            .send()
            .await?;

        assert_eq!(response.status(), StatusCode::OK, "{path}");
        let body: Value = response.json().await?;
        assert_eq!(body["username"], "amy", "{path}");
    }
    Ok(())
}

#[tokio::test]
async fn test_profile_for_unknown_subject_returns_404() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let token = server
        .authority()
        .issue("ghost", token_authority::CustomClaims::new(), 60)?;

    let response = server
        .client()
        .get(format!("{}/api/profile", server.url()))
        .bearer_auth(&token)
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_users_listing_requires_token() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let token = server.register_and_login("amy", "hunter2222").await?;

    let url = format!("{}/users", server.url());

    let anonymous = server.client().get(&url).send().await?;
    assert_eq!(anonymous.status(), StatusCode::FORBIDDEN);

    let users: Value = server
        .client()
        .get(&url)
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(users.as_array().map(Vec::len), Some(1));
    assert_eq!(users[0]["username"], "amy");
    Ok(())
}
