use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::services::auth;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// POST /api/login - Authenticate a user scoped to a company
///
/// Expected Input:
/// ```json
/// { "username": "string", "password": "string" }
/// ```
///
/// Expected Output (Success):
/// ```json
/// {
///   "success": true,
///   "user": {
///     "id": 1,
///     "username": "magazine",
///     "email": "contato@magazinetorra.com",
///     "company": 1,
///     "company_name": "Magazine TORRA",
///     "is_first_login": true
///   }
/// }
/// ```
///
/// Failures are a uniform 400 `{"success": false, "error": "Credenciais
/// inválidas"}` - unknown username and wrong password are indistinguishable.
pub async fn login(Json(payload): Json<LoginRequest>) -> Result<Json<Value>, ApiError> {
    let username = payload
        .username
        .as_deref()
        .filter(|u| !u.trim().is_empty())
        .ok_or(ApiError::InvalidCredentials)?;
    let password = payload.password.as_deref().ok_or(ApiError::InvalidCredentials)?;

    let user = auth::login(username, password).await?;

    Ok(Json(json!({
        "success": true,
        "user": user
    })))
}
