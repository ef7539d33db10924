use axum::{routing::get, routing::post, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use painel_api::{config, database, handlers};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, GEMINI_API_KEY, etc.
    let _ = dotenvy::dotenv();

    let config = config::config();
    tracing_subscriber::fmt::init();
    tracing::info!("Starting Painel API in {:?} mode", config.environment);

    let app = app();

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Painel API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Dashboard API
        .merge(api_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router {
    Router::new()
        .route("/api/login", post(handlers::login::login))
        .route("/api/chat", post(handlers::chat::message))
        .route("/api/monitoring", get(handlers::monitoring::snapshot))
        .route("/api/preferences/save", post(handlers::preferences::save))
        .route("/api/preferences/get", get(handlers::preferences::get))
        .route("/api/ai-assistant", post(handlers::assistant::ask))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Painel API",
            "version": version,
            "description": "Multi-tenant monitoring dashboard backend with an AI assistant",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "login": "POST /api/login",
                "chat": "POST /api/chat",
                "monitoring": "GET /api/monitoring?company=<slug>",
                "preferences": "POST /api/preferences/save, GET /api/preferences/get?user_id=",
                "ai_assistant": "POST /api/ai-assistant",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match database::manager::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
