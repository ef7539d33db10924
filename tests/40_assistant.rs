mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn missing_prompt_is_a_bad_request() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/ai-assistant", server.base_url))
        .json(&json!({ "user_id": 1 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("prompt"));

    Ok(())
}

#[tokio::test]
async fn blank_prompt_is_a_bad_request() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/ai-assistant", server.base_url))
        .json(&json!({ "prompt": "   " }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn missing_service_credential_is_a_hard_500() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // Harness clears GEMINI_API_KEY, so this is the misconfiguration path,
    // checked before any context lookup
    let res = client
        .post(format!("{}/api/ai-assistant", server.base_url))
        .json(&json!({ "prompt": "status dos firewalls" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("GEMINI_API_KEY"));

    Ok(())
}

#[tokio::test]
async fn message_field_is_accepted_as_prompt_alias() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // Alias still reaches the credential check, not the input check
    let res = client
        .post(format!("{}/api/ai-assistant", server.base_url))
        .json(&json!({ "message": "status dos firewalls" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = res.json::<Value>().await?;
    assert!(body["error"].as_str().unwrap().contains("GEMINI_API_KEY"));

    Ok(())
}
