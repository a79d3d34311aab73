//! E2E tests for the message resource.

use auth_test_utils::TestAuthServer;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn test_message_create_fetch_delete() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let token = server.register_and_login("amy", "hunter2222").await?;
    let messages = format!("{}/messages", server.url());

    let response = server
        .client()
        .post(&messages)
        .bearer_auth(&token)
        .json(&json!({"text": "Hello World"}))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await?;
    let id = created["id"].as_str().unwrap().to_string();

    let me: Value = server
        .client()
        .get(format!("{}/session", server.url()))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(created["user_id"], me["id"]);

    let listed: Value = server
        .client()
        .get(&messages)
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(listed, json!([created.clone()]));

    let deleted = server
        .client()
        .delete(format!("{messages}/{id}"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(deleted.status(), StatusCode::OK);
    assert_eq!(deleted.json::<Value>().await?, created);

    let missing = server
        .client()
        .get(format!("{messages}/{id}"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_message_routes_forbidden_without_token() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let messages = format!("{}/messages", server.url());

    let create = server
        .client()
        .post(&messages)
        .json(&json!({"text": "Hello World"}))
        .send()
        .await?;
    assert_eq!(create.status(), StatusCode::FORBIDDEN);

    let delete = server
        .client()
        .delete(format!("{messages}/anything"))
        .send()
        .await?;
    assert_eq!(delete.status(), StatusCode::FORBIDDEN);
    Ok(())
}
