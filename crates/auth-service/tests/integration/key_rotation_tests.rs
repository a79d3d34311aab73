//! E2E tests for secret rotation via JWT_PREVIOUS_SECRET.

use auth_test_utils::{
    test_vars, TestAuthServer, TestTokenBuilder, TEST_PREVIOUS_SECRET, TEST_UNRELATED_SECRET,
};
use auth_service::config::Config;
use reqwest::StatusCode;

async fn post_status(server: &TestAuthServer, token: &str) -> Result<StatusCode, anyhow::Error> {
    Ok(server
        .client()
        .post(format!("{}/api/posts", server.url()))
        .bearer_auth(token)
        .send()
        .await?
        .status())
}

fn rotated_config() -> Config {
    let mut vars = test_vars();
    vars.insert(
        "JWT_PREVIOUS_SECRET".to_string(),
        TEST_PREVIOUS_SECRET.to_string(),
    );
    Config::from_vars(&vars).unwrap()
}

#[tokio::test]
async fn test_previous_secret_token_accepted_during_rotation() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn_with_config(rotated_config()).await?;
    let old_token = TestTokenBuilder::new()
        .for_user("amy-1")
        .signed_with(TEST_PREVIOUS_SECRET)
        .build();

    assert_eq!(post_status(&server, &old_token).await?, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_previous_secret_token_rejected_after_rotation() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let old_token = TestTokenBuilder::new()
        .for_user("amy-1")
        .signed_with(TEST_PREVIOUS_SECRET)
        .build();

    assert_eq!(post_status(&server, &old_token).await?, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn test_unrelated_secret_never_accepted() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn_with_config(rotated_config()).await?;
    let forged = TestTokenBuilder::new()
        .signed_with(TEST_UNRELATED_SECRET)
        .build();

    assert_eq!(post_status(&server, &forged).await?, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn test_new_tokens_signed_with_current_secret() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn_with_config(rotated_config()).await?;
    let token = server.register_and_login("amy", "hunter2222").await?;

    // Verifiable with the current secret alone.
    let current_only = auth_test_utils::test_authority(auth_test_utils::TEST_SECRET);
    assert!(current_only.verify(&token).is_ok());
    assert_eq!(post_status(&server, &token).await?, StatusCode::OK);
    Ok(())
}
