//! Assessment record persistence
//!
//! Append-only: every submission inserts one row, keyed to exactly one
//! owner identity. Modality payloads are stored as JSON text columns.

use chrono::SecondsFormat;
use lexiscan_common::db::models::{AssessmentRecord, Owner};
use lexiscan_common::{Error, Result};
use serde::de::DeserializeOwned;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

const SELECT_COLUMNS: &str = "guid, user_id, guest_id, is_guest, test_type, \
     eye_tracking, speech_analysis, handwriting, quiz, overall_risk, created_at";

/// Insert one assessment record.
pub async fn insert_record(pool: &SqlitePool, record: &AssessmentRecord) -> Result<()> {
    let eye_tracking = to_json_column(&record.eye_tracking)?;
    let speech_analysis = to_json_column(&record.speech_analysis)?;
    let handwriting = to_json_column(&record.handwriting)?;
    let quiz = to_json_column(&record.quiz)?;

    sqlx::query(
        r#"
        INSERT INTO assessments (
            guid, user_id, guest_id, is_guest, test_type,
            eye_tracking, speech_analysis, handwriting, quiz,
            overall_risk, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(record.id.to_string())
    .bind(record.user.map(|u| u.to_string()))
    .bind(&record.guest_id)
    .bind(record.is_guest)
    .bind(&record.test_type)
    .bind(eye_tracking)
    .bind(speech_analysis)
    .bind(handwriting)
    .bind(quiz)
    .bind(&record.overall_risk)
    // Fixed-precision timestamps keep lexicographic and chronological
    // order identical in the TEXT column
    .bind(record.created_at.to_rfc3339_opts(SecondsFormat::Micros, true))
    .execute(pool)
    .await?;

    Ok(())
}

/// List all records for one owner, most recent first.
pub async fn list_by_owner(pool: &SqlitePool, owner: &Owner) -> Result<Vec<AssessmentRecord>> {
    let rows = match owner {
        Owner::Account(account_id) => {
            let sql = format!(
                "SELECT {} FROM assessments WHERE user_id = ? AND is_guest = 0 \
                 ORDER BY created_at DESC",
                SELECT_COLUMNS
            );
            sqlx::query(&sql)
                .bind(account_id.to_string())
                .fetch_all(pool)
                .await?
        }
        Owner::Guest(guest_id) => {
            let sql = format!(
                "SELECT {} FROM assessments WHERE guest_id = ? AND is_guest = 1 \
                 ORDER BY created_at DESC",
                SELECT_COLUMNS
            );
            sqlx::query(&sql).bind(guest_id).fetch_all(pool).await?
        }
    };

    rows.iter().map(row_to_record).collect()
}

fn row_to_record(row: &SqliteRow) -> Result<AssessmentRecord> {
    let guid: String = row.get("guid");
    let id = Uuid::parse_str(&guid)
        .map_err(|e| Error::Internal(format!("Failed to parse record guid: {}", e)))?;

    let user: Option<String> = row.get("user_id");
    let user = user
        .map(|u| Uuid::parse_str(&u))
        .transpose()
        .map_err(|e| Error::Internal(format!("Failed to parse owner guid: {}", e)))?;

    let created_at: String = row.get("created_at");
    let created_at = chrono::DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| Error::Internal(format!("Failed to parse created_at: {}", e)))?
        .with_timezone(&chrono::Utc);

    Ok(AssessmentRecord {
        id,
        user,
        guest_id: row.get("guest_id"),
        is_guest: row.get::<i64, _>("is_guest") != 0,
        test_type: row.get("test_type"),
        eye_tracking: from_json_column(row.get("eye_tracking"))?,
        speech_analysis: from_json_column(row.get("speech_analysis"))?,
        handwriting: from_json_column(row.get("handwriting"))?,
        quiz: from_json_column(row.get("quiz"))?,
        overall_risk: row.get("overall_risk"),
        created_at,
    })
}

fn to_json_column<T: serde::Serialize>(value: &Option<T>) -> Result<Option<String>> {
    value
        .as_ref()
        .map(|v| {
            serde_json::to_string(v)
                .map_err(|e| Error::Internal(format!("Failed to serialize payload: {}", e)))
        })
        .transpose()
}

fn from_json_column<T: DeserializeOwned>(value: Option<String>) -> Result<Option<T>> {
    value
        .map(|s| {
            serde_json::from_str(&s)
                .map_err(|e| Error::Internal(format!("Failed to deserialize payload: {}", e)))
        })
        .transpose()
}
