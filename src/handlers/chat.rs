use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::chat;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    /// Accepted for wire compatibility; the responder is stateless.
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// POST /api/chat - Keyword-matched canned chat (no AI)
///
/// Expected Input:
/// ```json
/// { "message": "me ajuda com firewall", "user_id": 1 }
/// ```
///
/// Expected Output:
/// ```json
/// { "response": "Perfeito! Vou configurar o dashboard...", "timestamp": "..." }
/// ```
pub async fn message(Json(payload): Json<ChatRequest>) -> Result<Json<Value>, ApiError> {
    let message = payload
        .message
        .as_deref()
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Campo 'message' é obrigatório"))?;

    Ok(Json(json!({
        "response": chat::respond(message),
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
