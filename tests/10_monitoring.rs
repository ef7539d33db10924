mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

fn metric(device: &Value, key: &str) -> i64 {
    device[key].as_i64().unwrap_or_else(|| panic!("missing metric {key} in {device}"))
}

#[tokio::test]
async fn snapshot_has_four_devices_two_alerts_one_ticket() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res =
        client.get(format!("{}/api/monitoring?company=magazine-torra", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["devices"].as_array().unwrap().len(), 4);
    assert_eq!(body["alerts"].as_array().unwrap().len(), 2);
    assert_eq!(body["tickets"].as_array().unwrap().len(), 1);

    let devices = body["devices"].as_array().unwrap();
    assert_eq!(devices[0]["type"], "firewall");
    assert_eq!(devices[0]["status"], "online");
    assert_eq!(devices[2]["type"], "database");
    assert_eq!(devices[2]["status"], "warning");
    assert_eq!(body["tickets"][0]["id"], "GLI-001");

    Ok(())
}

#[tokio::test]
async fn snapshot_metrics_stay_in_documented_ranges() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    for _ in 0..50 {
        let res = client.get(format!("{}/api/monitoring", server.base_url)).send().await?;
        let body = res.json::<Value>().await?;
        let devices = body["devices"].as_array().unwrap();

        assert!((20..=80).contains(&metric(&devices[0], "cpu")));
        assert!((30..=70).contains(&metric(&devices[0], "memory")));
        assert!((100..=500).contains(&metric(&devices[0], "threats_blocked")));
        assert!((20..=48).contains(&metric(&devices[1], "ports_active")));
        assert!((100..=900).contains(&metric(&devices[1], "traffic_mbps")));
        assert!((50..=200).contains(&metric(&devices[2], "connections")));
        assert!((100..=1000).contains(&metric(&devices[2], "queries_per_sec")));
        assert!((10..=50).contains(&metric(&devices[3], "latency_ms")));
        assert!((40..=95).contains(&metric(&devices[3], "bandwidth_usage")));
    }

    Ok(())
}

#[tokio::test]
async fn company_parameter_is_ignored() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // Identical shape and fixed fields for any tenant, and for none at all
    for query in ["?company=magazine-torra", "?company=nipo", ""] {
        let res =
            client.get(format!("{}/api/monitoring{}", server.base_url, query)).send().await?;
        assert_eq!(res.status(), StatusCode::OK);
        let body = res.json::<Value>().await?;
        let names: Vec<&str> = body["devices"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            ["Firewall Principal", "Switch Core", "Database Server", "Link Internet Principal"]
        );
    }

    Ok(())
}
