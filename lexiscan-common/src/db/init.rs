//! Database initialization
//!
//! Creates the database file and schema on first run. The pool returned
//! here is the single long-lived storage connection for the process;
//! callers treat a failure as fatal at startup.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await?;

    // WAL mode allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    // Idempotent - safe to call on every startup
    create_users_table(&pool).await?;
    create_assessments_table(&pool).await?;

    Ok(pool)
}

/// Create the users table
///
/// Email uniqueness is enforced here so a duplicate signup fails at write
/// time without mutating state, even under concurrent requests.
async fn create_users_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            guid TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            age INTEGER NOT NULL,
            gender TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the assessments table
///
/// Append-only: rows are inserted once and never updated or deleted. The
/// CHECK constraint enforces that exactly one owner field is populated.
async fn create_assessments_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS assessments (
            guid TEXT PRIMARY KEY,
            user_id TEXT REFERENCES users(guid),
            guest_id TEXT,
            is_guest INTEGER NOT NULL DEFAULT 0,
            test_type TEXT,
            eye_tracking TEXT,
            speech_analysis TEXT,
            handwriting TEXT,
            quiz TEXT,
            overall_risk TEXT NOT NULL DEFAULT 'Pending',
            created_at TIMESTAMP NOT NULL,
            CHECK ((is_guest = 0 AND user_id IS NOT NULL AND guest_id IS NULL)
                OR (is_guest = 1 AND guest_id IS NOT NULL AND user_id IS NULL))
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Indexes supporting retrieval by either identity space
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_assessments_user ON assessments(user_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_assessments_guest ON assessments(guest_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_assessments_created ON assessments(created_at)")
        .execute(pool)
        .await?;

    Ok(())
}
