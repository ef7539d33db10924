//! Authentication gate: username/password verification against the users
//! table. Unknown username and wrong password collapse into one
//! `InvalidCredentials` value so responses never reveal which field was
//! wrong.

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Company, User};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Credenciais inválidas")]
    InvalidCredentials,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Database manager error: {0}")]
    Pool(#[from] DatabaseError),
}

/// Login response payload; mirrors what the dashboard frontend consumes.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub company: Option<i64>,
    pub company_name: Option<String>,
    pub is_first_login: bool,
}

impl UserSummary {
    fn from_user(user: User, company: Option<Company>) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            company: user.company_id,
            company_name: company.map(|c| c.name),
            is_first_login: user.is_first_login,
        }
    }
}

/// Verify credentials and return the user summary.
pub async fn login(username: &str, password: &str) -> Result<UserSummary, AuthError> {
    let pool = DatabaseManager::pool().await?;

    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash, email, company_id, is_first_login, created_at \
         FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(&pool)
    .await?
    .ok_or(AuthError::InvalidCredentials)?;

    if !verify_password(password, &user.password_hash) {
        return Err(AuthError::InvalidCredentials);
    }

    let company = match user.company_id {
        Some(company_id) => {
            sqlx::query_as::<_, Company>(
                "SELECT id, name, slug, created_at FROM companies WHERE id = $1",
            )
            .bind(company_id)
            .fetch_optional(&pool)
            .await?
        }
        None => None,
    };

    Ok(UserSummary::from_user(user, company))
}

/// Hash a password into the stored `salt$hex` form.
pub fn hash_password(password: &str) -> String {
    let salt: String =
        rand::thread_rng().sample_iter(&Alphanumeric).take(16).map(char::from).collect();
    format!("{}${}", salt, digest(&salt, password))
}

/// Compare a candidate password against a stored `salt$hex` digest.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt, expected)) = stored.split_once('$') else {
        return false;
    };
    let actual = digest(salt, password);
    if actual.len() != expected.len() {
        return false;
    }
    actual.bytes().zip(expected.bytes()).fold(0u8, |acc, (a, b)| acc | (a ^ b)) == 0
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let stored = hash_password("demo123");
        assert!(verify_password("demo123", &stored));
        assert!(!verify_password("demo124", &stored));
    }

    #[test]
    fn distinct_salts_give_distinct_digests() {
        assert_ne!(hash_password("demo123"), hash_password("demo123"));
    }

    #[test]
    fn malformed_stored_hash_never_verifies() {
        assert!(!verify_password("demo123", "not-a-digest"));
        assert!(!verify_password("demo123", ""));
    }

    #[test]
    fn summary_carries_user_and_company_fields() {
        let created = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let user = User {
            id: 3,
            username: "maria".to_string(),
            password_hash: hash_password("demo123"),
            email: "maria@torra.com.br".to_string(),
            company_id: Some(1),
            is_first_login: true,
            created_at: created,
        };
        let company = Company {
            id: 1,
            name: "Magazine TORRA".to_string(),
            slug: "magazine-torra".to_string(),
            created_at: created,
        };

        let summary = UserSummary::from_user(user.clone(), Some(company));
        assert_eq!(summary.id, 3);
        assert_eq!(summary.company, Some(1));
        assert_eq!(summary.company_name.as_deref(), Some("Magazine TORRA"));
        assert!(summary.is_first_login);

        let detached = UserSummary::from_user(User { company_id: None, ..user }, None);
        assert_eq!(detached.company, None);
        assert_eq!(detached.company_name, None);
    }
}
