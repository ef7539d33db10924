//! Per-user dashboard preference persistence.
//!
//! Saving upserts the row (layout and widgets only; chat_history untouched)
//! and flips the user's is_first_login flag to false, idempotently. Reading
//! never errors: any miss - unknown user, no saved row, even an unreachable
//! database - yields the empty defaults, so unauthenticated/new users get a
//! usable dashboard.

use serde::Serialize;
use serde_json::{json, Value};

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::DashboardPreference;

#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error("Usuário não encontrado")]
    UserNotFound,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Database manager error: {0}")]
    Pool(#[from] DatabaseError),
}

#[derive(Debug, Clone, Serialize)]
pub struct Preferences {
    pub layout: Value,
    pub widgets: Value,
}

impl Preferences {
    /// The "empty defaults, never an error" contract value.
    pub fn empty() -> Self {
        Self { layout: json!({}), widgets: json!([]) }
    }
}

impl From<DashboardPreference> for Preferences {
    fn from(row: DashboardPreference) -> Self {
        Self { layout: row.layout, widgets: row.widgets }
    }
}

/// Upsert the preference row for a user, then clear is_first_login.
pub async fn save(user_id: i64, layout: Value, widgets: Value) -> Result<(), PreferenceError> {
    let pool = DatabaseManager::pool().await?;

    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(&pool)
        .await?;
    if exists.is_none() {
        return Err(PreferenceError::UserNotFound);
    }

    sqlx::query(
        "INSERT INTO dashboard_preferences (user_id, layout, widgets) \
         VALUES ($1, $2, $3) \
         ON CONFLICT (user_id) DO UPDATE \
         SET layout = EXCLUDED.layout, widgets = EXCLUDED.widgets, updated_at = now()",
    )
    .bind(user_id)
    .bind(&layout)
    .bind(&widgets)
    .execute(&pool)
    .await?;

    // One-way flag; repeated saves are a no-op once it is false
    sqlx::query("UPDATE users SET is_first_login = FALSE WHERE id = $1")
        .bind(user_id)
        .execute(&pool)
        .await?;

    Ok(())
}

/// Fetch stored preferences, or the empty defaults on any miss.
pub async fn get(user_id: i64) -> Preferences {
    let pool = match DatabaseManager::pool().await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::warn!("preferences lookup skipped, database unavailable: {}", e);
            return Preferences::empty();
        }
    };

    let row = sqlx::query_as::<_, DashboardPreference>(
        "SELECT id, user_id, layout, widgets, chat_history, created_at, updated_at \
         FROM dashboard_preferences WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(&pool)
    .await;

    match row {
        Ok(Some(prefs)) => Preferences::from(prefs),
        Ok(None) => Preferences::empty(),
        Err(e) => {
            tracing::warn!("preferences lookup failed for user {}: {}", user_id, e);
            Preferences::empty()
        }
    }
}
