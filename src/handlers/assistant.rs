use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::ai::GeminiClient;
use crate::config::config;
use crate::error::ApiError;
use crate::services::assistant;

#[derive(Debug, Deserialize)]
pub struct AssistantRequest {
    #[serde(default)]
    pub user_id: Option<i64>,
    /// `prompt` is canonical; `message` is accepted as an alias for the
    /// plain chat surface's payload shape.
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AssistantResponse {
    pub response: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// POST /api/ai-assistant - Context-enriched generative chat
///
/// Expected Input:
/// ```json
/// { "user_id": 1, "prompt": "status dos firewalls" }
/// ```
///
/// Missing prompt is a 400 and a missing GEMINI_API_KEY is a 500, both
/// checked before any context lookup. Upstream generation failure is NOT an
/// HTTP error: the response is 200 with a canned apology and an `error`
/// field describing the failure.
pub async fn ask(Json(payload): Json<AssistantRequest>) -> Result<Json<AssistantResponse>, ApiError> {
    let prompt = payload
        .prompt
        .as_deref()
        .or(payload.message.as_deref())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::bad_request("Campo 'prompt' é obrigatório"))?;

    // Credential check short-circuits before any context building
    let generator = GeminiClient::from_config(config())
        .map_err(|e| ApiError::misconfiguration(e.to_string()))?;

    let context = assistant::build_context(payload.user_id).await;
    let full_prompt = assistant::compose_prompt(&context, prompt);
    let reply = assistant::run(&generator, &full_prompt, prompt).await;

    Ok(Json(AssistantResponse {
        response: reply.response,
        timestamp: chrono::Utc::now().to_rfc3339(),
        error: reply.error,
    }))
}
