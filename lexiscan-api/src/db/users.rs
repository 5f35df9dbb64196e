//! Account persistence

use lexiscan_common::db::models::{Account, StoredAccount};
use lexiscan_common::{Error, Result};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Insert a new account, failing with a Conflict when the email is taken.
pub async fn insert_user(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    age: i64,
    gender: &str,
    password_hash: &str,
) -> Result<Account> {
    let account = Account {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: email.to_string(),
        age,
        gender: gender.to_string(),
    };

    let result = sqlx::query(
        r#"
        INSERT INTO users (guid, name, email, age, gender, password_hash)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(account.id.to_string())
    .bind(&account.name)
    .bind(&account.email)
    .bind(account.age)
    .bind(&account.gender)
    .bind(password_hash)
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(account),
        // The unique index backstops the pre-insert email check under
        // concurrent signups for the same address
        Err(e) if is_unique_violation(&e) => {
            Err(Error::Conflict("User already exists".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

/// Look up an account by email, including its credential hash.
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<StoredAccount>> {
    let row = sqlx::query(
        "SELECT guid, name, email, age, gender, password_hash FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            let guid: String = row.get("guid");
            let id = Uuid::parse_str(&guid)
                .map_err(|e| Error::Internal(format!("Failed to parse account guid: {}", e)))?;

            Ok(Some(StoredAccount {
                account: Account {
                    id,
                    name: row.get("name"),
                    email: row.get("email"),
                    age: row.get("age"),
                    gender: row.get("gender"),
                },
                password_hash: row.get("password_hash"),
            }))
        }
        None => Ok(None),
    }
}
