// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 400 Bad Request - uniform message so username probing and password
    // probing are indistinguishable
    InvalidCredentials,

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error - missing external-service credential
    Misconfiguration(String),

    // 500 Internal Server Error
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::InvalidCredentials => 400,
            ApiError::NotFound(_) => 404,
            ApiError::Misconfiguration(_) => 500,
            ApiError::Internal(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::InvalidCredentials => "Credenciais inválidas",
            ApiError::NotFound(msg) => msg,
            ApiError::Misconfiguration(msg) => msg,
            ApiError::Internal(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "error": self.message()
        })
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn invalid_credentials() -> Self {
        ApiError::InvalidCredentials
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn misconfiguration(message: impl Into<String>) -> Self {
        ApiError::Misconfiguration(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

// Convert service error types to ApiError
impl From<crate::services::auth::AuthError> for ApiError {
    fn from(err: crate::services::auth::AuthError) -> Self {
        match err {
            crate::services::auth::AuthError::InvalidCredentials => ApiError::invalid_credentials(),
            crate::services::auth::AuthError::Database(e) => {
                // Log the real error but return a generic message
                tracing::error!("auth database error: {}", e);
                ApiError::internal("Erro interno no servidor")
            }
            crate::services::auth::AuthError::Pool(e) => {
                tracing::error!("auth pool error: {}", e);
                ApiError::internal("Erro interno no servidor")
            }
        }
    }
}

impl From<crate::services::preferences::PreferenceError> for ApiError {
    fn from(err: crate::services::preferences::PreferenceError) -> Self {
        match err {
            crate::services::preferences::PreferenceError::UserNotFound => {
                ApiError::not_found("Usuário não encontrado")
            }
            crate::services::preferences::PreferenceError::Database(e) => {
                tracing::error!("preference database error: {}", e);
                ApiError::internal("Erro interno no servidor")
            }
            crate::services::preferences::PreferenceError::Pool(e) => {
                tracing::error!("preference pool error: {}", e);
                ApiError::internal("Erro interno no servidor")
            }
        }
    }
}

impl From<crate::database::manager::DatabaseError> for ApiError {
    fn from(err: crate::database::manager::DatabaseError) -> Self {
        tracing::error!("database error: {}", err);
        ApiError::internal("Erro interno no servidor")
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_credentials_is_uniform() {
        let err = ApiError::invalid_credentials();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "Credenciais inválidas");
    }

    #[test]
    fn error_body_shape() {
        let body = ApiError::not_found("Usuário não encontrado").to_json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Usuário não encontrado");
    }
}
