//! Schema creation and demo seed data. Idempotent: re-running changes
//! nothing.

use anyhow::{Context, Result};

use crate::database::manager::DatabaseManager;
use crate::services::auth;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS companies (\
        id BIGSERIAL PRIMARY KEY,\
        name TEXT NOT NULL,\
        slug TEXT NOT NULL UNIQUE,\
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()\
    )",
    "CREATE TABLE IF NOT EXISTS users (\
        id BIGSERIAL PRIMARY KEY,\
        username TEXT NOT NULL UNIQUE,\
        password_hash TEXT NOT NULL,\
        email TEXT NOT NULL DEFAULT '',\
        company_id BIGINT REFERENCES companies(id) ON DELETE CASCADE,\
        is_first_login BOOLEAN NOT NULL DEFAULT TRUE,\
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()\
    )",
    "CREATE TABLE IF NOT EXISTS dashboard_preferences (\
        id BIGSERIAL PRIMARY KEY,\
        user_id BIGINT NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,\
        layout JSONB NOT NULL DEFAULT '{}'::jsonb,\
        widgets JSONB NOT NULL DEFAULT '[]'::jsonb,\
        chat_history JSONB NOT NULL DEFAULT '[]'::jsonb,\
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),\
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()\
    )",
    "CREATE TABLE IF NOT EXISTS monitoring_data (\
        id BIGSERIAL PRIMARY KEY,\
        company_id BIGINT NOT NULL REFERENCES companies(id) ON DELETE CASCADE,\
        device_type TEXT NOT NULL,\
        device_name TEXT NOT NULL,\
        status TEXT NOT NULL,\
        metrics JSONB NOT NULL DEFAULT '{}'::jsonb,\
        timestamp TIMESTAMPTZ NOT NULL DEFAULT now()\
    )",
    "CREATE INDEX IF NOT EXISTS idx_monitoring_company_time \
     ON monitoring_data (company_id, timestamp DESC)",
];

/// Demo tenants and their users.
const COMPANIES: &[(&str, &str)] = &[("Magazine TORRA", "magazine-torra"), ("NIPO", "nipo")];

const USERS: &[(&str, &str, &str)] = &[
    ("magazine", "contato@magazinetorra.com", "magazine-torra"),
    ("nipo", "contato@nipo.com", "nipo"),
];

const DEMO_PASSWORD: &str = "demo123";

pub async fn setup_data() -> Result<()> {
    let pool = DatabaseManager::pool().await.context("database connection failed")?;

    for statement in SCHEMA {
        sqlx::query(statement).execute(&pool).await.context("schema creation failed")?;
    }

    for (name, slug) in COMPANIES {
        sqlx::query("INSERT INTO companies (name, slug) VALUES ($1, $2) ON CONFLICT (slug) DO NOTHING")
            .bind(name)
            .bind(slug)
            .execute(&pool)
            .await?;
    }

    for (username, email, company_slug) in USERS {
        sqlx::query(
            "INSERT INTO users (username, password_hash, email, company_id) \
             SELECT $1, $2, $3, c.id FROM companies c WHERE c.slug = $4 \
             ON CONFLICT (username) DO NOTHING",
        )
        .bind(username)
        .bind(auth::hash_password(DEMO_PASSWORD))
        .bind(email)
        .bind(company_slug)
        .execute(&pool)
        .await?;
    }

    println!("Dados criados com sucesso!");
    Ok(())
}
