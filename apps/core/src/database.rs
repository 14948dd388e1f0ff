use crate::error::AppError;
use crate::fs_manager::DataDirManager;
use crate::models::{Session, SessionSummary};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tracing::{info, warn};
use uuid::Uuid;

/// Opens the session store and applies the schema.
///
/// `None` opens a private in-memory database (single connection, used by tests).
pub async fn init_db(db_path: Option<&Path>) -> Result<SqlitePool, AppError> {
    let pool = match db_path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                DataDirManager::new(parent).init()?;
            }
            let db_url = format!("sqlite://{}", path.to_string_lossy());
            info!("Initializing database at: {}", db_url);
            let options = SqliteConnectOptions::from_str(&db_url)?.create_if_missing(true);
            SqlitePoolOptions::new()
                .max_connections(5)
                .connect_with(options)
                .await?
        }
        None => {
            info!("Initializing in-memory database");
            let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
            // every connection would get its own empty database
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        }
    };

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL,
            document TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_sessions_updated_at ON sessions(updated_at);
        "#,
    )
    .execute(&pool)
    .await?;

    info!("Database initialized and migrations applied.");

    Ok(pool)
}

/// `session_<YYYY-MM-DD>_<8 hex>`
pub fn new_session_id(date: NaiveDate) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("session_{}_{}", date.format("%Y-%m-%d"), &suffix[..8])
}

fn session_prefix(date: NaiveDate) -> String {
    format!("session_{}_", date.format("%Y-%m-%d"))
}

// --- Sessions ---

/// The stored document, if any.
pub async fn find_session(pool: &SqlitePool, id: &str) -> Result<Option<Session>, AppError> {
    let row: Option<(String,)> = sqlx::query_as("SELECT document FROM sessions WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    match row {
        Some((document,)) => serde_json::from_str(&document)
            .map(Some)
            .map_err(|e| AppError::Database(sqlx::Error::Decode(Box::new(e)))),
        None => Ok(None),
    }
}

/// The stored document, or a fresh empty session when none exists yet.
pub async fn load_session(pool: &SqlitePool, id: &str) -> Result<Session, AppError> {
    Ok(find_session(pool, id)
        .await?
        .unwrap_or_else(|| Session::new(id)))
}

/// Stamps `updated_at` and upserts the whole document.
pub async fn save_session(pool: &SqlitePool, session: &mut Session) -> Result<(), AppError> {
    let now = Utc::now();
    session.updated_at = Some(now);
    let document = serde_json::to_string(session)
        .map_err(|e| AppError::Database(sqlx::Error::Encode(Box::new(e))))?;

    sqlx::query(
        r#"
        INSERT INTO sessions (id, user_id, created_at, updated_at, document)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            user_id = excluded.user_id,
            updated_at = excluded.updated_at,
            document = excluded.document
        "#,
    )
    .bind(&session.session_id)
    .bind(&session.user_id)
    .bind(session.created_at.timestamp_micros())
    .bind(now.timestamp_micros())
    .bind(document)
    .execute(pool)
    .await?;

    Ok(())
}

/// Summaries of every stored session, most recently updated first.
///
/// Documents that no longer deserialize are skipped.
pub async fn list_sessions(pool: &SqlitePool) -> Result<Vec<SessionSummary>, AppError> {
    let rows: Vec<(String, i64, String)> =
        sqlx::query_as("SELECT id, updated_at, document FROM sessions ORDER BY updated_at DESC")
            .fetch_all(pool)
            .await?;

    let summaries = rows
        .into_iter()
        .filter_map(|(id, updated_at, document)| {
            match serde_json::from_str::<Session>(&document) {
                Ok(session) => Some(SessionSummary {
                    session_id: session.session_id.clone(),
                    created_at: session.created_at,
                    updated_at: session.updated_at.unwrap_or_else(|| {
                        DateTime::from_timestamp_micros(updated_at).unwrap_or(session.created_at)
                    }),
                    total_entries: session.total_entries(),
                    user_id: session.user_id,
                }),
                Err(e) => {
                    warn!("Skipping unreadable session {}: {}", id, e);
                    None
                }
            }
        })
        .collect();

    Ok(summaries)
}

/// Reuses the most recently updated session of `today`, or mints a new id.
pub async fn current_session_id(pool: &SqlitePool, today: NaiveDate) -> Result<String, AppError> {
    let prefix = session_prefix(today);
    let row: Option<(String,)> = sqlx::query_as(
        "SELECT id FROM sessions WHERE substr(id, 1, ?) = ? ORDER BY updated_at DESC LIMIT 1",
    )
    .bind(prefix.len() as i64)
    .bind(&prefix)
    .fetch_optional(pool)
    .await?;

    Ok(match row {
        Some((id,)) => id,
        None => new_session_id(today),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_format() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let id = new_session_id(date);
        assert!(id.starts_with("session_2024-03-09_"));
        let suffix = id.trim_start_matches("session_2024-03-09_");
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, new_session_id(date));
    }

    #[tokio::test]
    async fn test_in_memory_pool_keeps_schema() {
        let pool = init_db(None).await.unwrap();
        let mut session = Session::new("session_2024-03-09_abcdef01");
        save_session(&pool, &mut session).await.unwrap();
        let loaded = find_session(&pool, "session_2024-03-09_abcdef01")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded, session);
    }
}
