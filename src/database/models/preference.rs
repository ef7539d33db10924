use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// One-to-one with a user; cascade-deleted with it. Created lazily on the
/// first save, then updated in place (no versioning).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DashboardPreference {
    pub id: i64,
    pub user_id: i64,
    pub layout: Value,
    pub widgets: Value,
    /// Defined for schema completeness; no operation reads or writes it.
    pub chat_history: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
