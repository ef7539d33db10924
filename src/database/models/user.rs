use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email: String,
    pub company_id: Option<i64>,
    /// Starts true; flips to false exactly once, on the first successful
    /// preference save.
    pub is_first_login: bool,
    pub created_at: DateTime<Utc>,
}
