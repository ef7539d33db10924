use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// Append-only device telemetry row; never mutated or deleted here.
/// Consumed by reading the most recent N per company.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MonitoringData {
    pub id: i64,
    pub company_id: i64,
    pub device_type: String,
    pub device_name: String,
    pub status: String,
    pub metrics: Value,
    pub timestamp: DateTime<Utc>,
}
