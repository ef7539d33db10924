use axum::extract::Query;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::services::preferences;

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub user_id: Option<i64>,
    #[serde(default)]
    pub preferences: Option<PreferencesBody>,
}

#[derive(Debug, Deserialize)]
pub struct PreferencesBody {
    #[serde(default)]
    pub layout: Option<Value>,
    #[serde(default)]
    pub widgets: Option<Value>,
}

/// POST /api/preferences/save - Upsert a user's dashboard preferences
///
/// Expected Input:
/// ```json
/// { "user_id": 1, "preferences": { "layout": {...}, "widgets": [...] } }
/// ```
///
/// Only layout and widgets are written; chat_history is untouched. As a
/// side effect the user's is_first_login flag flips to false, idempotently.
/// Unknown user_id is a 404.
pub async fn save(Json(payload): Json<SaveRequest>) -> Result<Json<Value>, ApiError> {
    let user_id =
        payload.user_id.ok_or_else(|| ApiError::bad_request("Campo 'user_id' é obrigatório"))?;

    let body = payload.preferences.unwrap_or(PreferencesBody { layout: None, widgets: None });
    let layout = body.layout.unwrap_or_else(|| json!({}));
    let widgets = body.widgets.unwrap_or_else(|| json!([]));

    preferences::save(user_id, layout, widgets).await?;

    Ok(Json(json!({ "success": true })))
}

#[derive(Debug, Deserialize)]
pub struct GetQuery {
    pub user_id: Option<i64>,
}

/// GET /api/preferences/get?user_id= - Stored preferences or empty defaults
///
/// Never errors: missing user_id, unknown user or an absent row all return
/// `{"layout": {}, "widgets": []}` so new and unauthenticated users get a
/// usable dashboard.
pub async fn get(Query(query): Query<GetQuery>) -> Json<preferences::Preferences> {
    let prefs = match query.user_id {
        Some(user_id) => preferences::get(user_id).await,
        None => preferences::Preferences::empty(),
    };
    Json(prefs)
}
