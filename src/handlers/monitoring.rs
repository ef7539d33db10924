use axum::extract::Query;
use axum::response::Json;
use serde::Deserialize;

use crate::services::monitoring::{self, Snapshot};

#[derive(Debug, Deserialize)]
pub struct MonitoringQuery {
    /// Company slug. Accepted but ignored: every tenant currently sees the
    /// same synthetic snapshot. Documented behavior - do not scope this to
    /// per-company rows without changing the contract.
    pub company: Option<String>,
}

/// GET /api/monitoring?company=<slug> - Synthetic dashboard snapshot
///
/// Always exactly 4 devices, 2 alerts and 1 ticket; metric values are
/// randomized per call within fixed ranges.
pub async fn snapshot(Query(query): Query<MonitoringQuery>) -> Json<Snapshot> {
    if let Some(slug) = query.company.as_deref() {
        tracing::debug!("monitoring snapshot requested for company {}", slug);
    }
    Json(monitoring::snapshot())
}
