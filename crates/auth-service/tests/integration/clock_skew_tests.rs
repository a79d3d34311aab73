//! E2E tests for expiry and clock skew handling with a controlled clock.

use auth_test_utils::{test_config, test_vars, TestAuthServer};
use auth_service::config::Config;
use reqwest::StatusCode;
use std::sync::Arc;
use token_authority::{CustomClaims, ManualClock};

const START: i64 = 1_700_000_000;

async fn post_status(server: &TestAuthServer, token: &str) -> Result<StatusCode, anyhow::Error> {
    Ok(server
        .client()
        .post(format!("{}/api/posts", server.url()))
        .bearer_auth(token)
        .send()
        .await?
        .status())
}

#[tokio::test]
async fn test_token_expires_after_ttl() -> Result<(), anyhow::Error> {
    let clock = ManualClock::new(START);
    let server = TestAuthServer::spawn_with_clock(test_config(), Arc::new(clock.clone())).await?;
    let token = server.authority().issue("amy-1", CustomClaims::new(), 1)?;

    assert_eq!(post_status(&server, &token).await?, StatusCode::OK);

    clock.advance(2);
    assert_eq!(post_status(&server, &token).await?, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn test_not_before_within_skew_accepted() -> Result<(), anyhow::Error> {
    let clock = ManualClock::new(START);
    let server = TestAuthServer::spawn_with_clock(test_config(), Arc::new(clock.clone())).await?;
    let skew = server.config().jwt_clock_skew_seconds;

    let token = server
        .authority()
        .issue_not_before("amy-1", CustomClaims::new(), 60, skew)?;
    assert_eq!(post_status(&server, &token).await?, StatusCode::OK);

    let token = server
        .authority()
        .issue_not_before("amy-1", CustomClaims::new(), 60, skew + 1)?;
    assert_eq!(post_status(&server, &token).await?, StatusCode::FORBIDDEN);

    clock.advance(1);
    assert_eq!(post_status(&server, &token).await?, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_zero_skew_rejects_any_future_activation() -> Result<(), anyhow::Error> {
    let mut vars = test_vars();
    vars.insert("JWT_CLOCK_SKEW_SECONDS".to_string(), "0".to_string());
    let config = Config::from_vars(&vars).unwrap();

    let clock = ManualClock::new(START);
    let server = TestAuthServer::spawn_with_clock(config, Arc::new(clock.clone())).await?;

    let token = server
        .authority()
        .issue_not_before("amy-1", CustomClaims::new(), 60, 1)?;
    assert_eq!(post_status(&server, &token).await?, StatusCode::FORBIDDEN);

    clock.advance(1);
    assert_eq!(post_status(&server, &token).await?, StatusCode::OK);
    Ok(())
}
