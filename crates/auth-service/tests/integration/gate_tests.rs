//! E2E tests for the bearer gate.
//!
//! Every rejected request must get the same 403 and the same body, whatever
//! the reason.

use auth_test_utils::{
    TestAuthServer, TestTokenBuilder, TokenAssertions, TEST_UNRELATED_SECRET,
};
use reqwest::StatusCode;
use serde_json::Value;
use token_authority::CustomClaims;

async fn post_with_header(
    server: &TestAuthServer,
    authorization: Option<&str>,
) -> Result<(StatusCode, Value), anyhow::Error> {
    let mut request = server.client().post(format!("{}/api/posts", server.url()));
    if let Some(value) = authorization {
        request = request.header("Authorization", value);
    }
    let response = request.send().await?;
    let status = response.status();
    let body = response.json().await?;
    Ok((status, body))
}

#[tokio::test]
async fn test_issued_token_reaches_gated_operation() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    let mut claims = CustomClaims::new();
    claims.insert("role".to_string(), "user".into());
    let token = server.authority().issue("amy-1", claims, 30)?;
    token.assert_valid_jwt().assert_expires_in(30);

    let (status, body) = post_with_header(&server, Some(&format!("Bearer {token}"))).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Post created...");
    assert_eq!(body["authData"]["sub"], "amy-1");
    assert_eq!(body["authData"]["role"], "user");
    Ok(())
}

#[tokio::test]
async fn test_corrupted_token_is_forbidden() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let token = server
        .authority()
        .issue("amy-1", CustomClaims::new(), 30)?;

    let (status, body) = post_with_header(&server, Some(&format!("Bearer {token}x"))).await?;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.get("authData").is_none());
    Ok(())
}

#[tokio::test]
async fn test_rejections_are_indistinguishable() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let good = TestTokenBuilder::new().for_user("amy-1").build();

    let forged = TestTokenBuilder::new()
        .for_user("amy-1")
        .signed_with(TEST_UNRELATED_SECRET)
        .build();
    let expired = TestTokenBuilder::new().expires_in(30).expired(60).build();
    let dormant = TestTokenBuilder::new().not_before(3600).build();

    let (_, reference) = post_with_header(&server, None).await?;
    assert_eq!(reference["error"]["code"], "FORBIDDEN");

    let cases = [
        ("no scheme", good.clone()),
        ("lowercase scheme", format!("bearer {good}")),
        ("basic scheme", format!("Basic {good}")),
        ("extra part", format!("Bearer {good} extra")),
        ("two segments", "Bearer abc.def".to_string()),
        ("forged", format!("Bearer {forged}")),
        ("expired", format!("Bearer {expired}")),
        ("not yet valid", format!("Bearer {dormant}")),
    ];

    for (name, header) in cases {
        let (status, body) = post_with_header(&server, Some(&header)).await?;
        assert_eq!(status, StatusCode::FORBIDDEN, "{name}");
        assert_eq!(body, reference, "{name} must not be distinguishable");
    }
    Ok(())
}

#[tokio::test]
async fn test_single_character_flips_are_forbidden() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let token = server
        .authority()
        .issue("amy-1", CustomClaims::new(), 60)?;

    // One flip per segment is enough over HTTP; the authority's unit tests
    // cover every position.
    let dots: Vec<usize> = token.match_indices('.').map(|(i, _)| i).collect();
    let positions = [1, dots[0] + 2, dots[1] + 2];

    for position in positions {
        let mut bytes = token.clone().into_bytes();
        bytes[position] = if bytes[position] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes)?;

        let (status, _) = post_with_header(&server, Some(&format!("Bearer {tampered}"))).await?;
        assert_eq!(status, StatusCode::FORBIDDEN, "flip at {position}");
    }
    Ok(())
}
