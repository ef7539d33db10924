//! Synthetic monitoring snapshot for the dashboard.
//!
//! Device identities, statuses, alerts and the ticket are fixed; only the
//! metric values vary, drawn uniformly per call from fixed ranges. The
//! company parameter on the HTTP surface is accepted and ignored - every
//! tenant sees the same snapshot. That is documented current behavior and
//! must not be silently scoped to per-company rows.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub status: String,
    /// Per-type metric fields, flattened onto the device object.
    #[serde(flatten)]
    pub metrics: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: i64,
    pub severity: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub title: String,
    pub status: String,
    pub priority: String,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub devices: Vec<Device>,
    pub alerts: Vec<Alert>,
    pub tickets: Vec<Ticket>,
}

fn metrics(entries: &[(&str, i64)]) -> Map<String, Value> {
    entries.iter().map(|(k, v)| (k.to_string(), Value::from(*v))).collect()
}

/// Build a snapshot with an injected RNG and clock, so the range property
/// is testable under a seeded generator.
pub fn snapshot_with(rng: &mut impl Rng, now: DateTime<Utc>) -> Snapshot {
    let devices = vec![
        Device {
            id: 1,
            name: "Firewall Principal".to_string(),
            device_type: "firewall".to_string(),
            status: "online".to_string(),
            metrics: metrics(&[
                ("cpu", rng.gen_range(20..=80)),
                ("memory", rng.gen_range(30..=70)),
                ("threats_blocked", rng.gen_range(100..=500)),
            ]),
        },
        Device {
            id: 2,
            name: "Switch Core".to_string(),
            device_type: "switch".to_string(),
            status: "online".to_string(),
            metrics: metrics(&[
                ("ports_active", rng.gen_range(20..=48)),
                ("traffic_mbps", rng.gen_range(100..=900)),
            ]),
        },
        Device {
            id: 3,
            name: "Database Server".to_string(),
            device_type: "database".to_string(),
            status: "warning".to_string(),
            metrics: metrics(&[
                ("connections", rng.gen_range(50..=200)),
                ("queries_per_sec", rng.gen_range(100..=1000)),
            ]),
        },
        Device {
            id: 4,
            name: "Link Internet Principal".to_string(),
            device_type: "internet".to_string(),
            status: "online".to_string(),
            metrics: metrics(&[
                ("latency_ms", rng.gen_range(10..=50)),
                ("bandwidth_usage", rng.gen_range(40..=95)),
            ]),
        },
    ];

    // Alert text is static, not derived from the devices above
    let alerts = vec![
        Alert {
            id: 1,
            severity: "warning".to_string(),
            message: "Uso de CPU elevado no Database Server".to_string(),
            timestamp: now - Duration::minutes(15),
        },
        Alert {
            id: 2,
            severity: "info".to_string(),
            message: "Backup automático concluído com sucesso".to_string(),
            timestamp: now - Duration::hours(2),
        },
    ];

    let tickets = vec![Ticket {
        id: "GLI-001".to_string(),
        title: "Lentidão no acesso ao sistema".to_string(),
        status: "Em andamento".to_string(),
        priority: "Alta".to_string(),
        created: now - Duration::days(1),
    }];

    Snapshot { devices, alerts, tickets }
}

/// Snapshot with ambient randomness and clock.
pub fn snapshot() -> Snapshot {
    snapshot_with(&mut rand::thread_rng(), Utc::now())
}
