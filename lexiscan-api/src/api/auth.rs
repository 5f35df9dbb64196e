//! Account signup and login
//!
//! Both operations issue a fresh short-lived bearer token bound to one
//! account id. Login never reveals whether the email or the password was
//! wrong.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use lexiscan_common::{password, token, Error};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use super::ApiError;
use crate::{db, AppState};

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub age: i64,
    pub gender: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /auth/signup
///
/// Creates an account and returns `{token, user}`. A duplicate email
/// fails without mutating state.
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(Error::Validation("email and password are required".to_string()).into());
    }

    if db::users::find_by_email(&state.db, &req.email).await?.is_some() {
        return Err(Error::Conflict("User already exists".to_string()).into());
    }

    let password_hash = password::hash_password(&req.password)?;
    let account = db::users::insert_user(
        &state.db,
        &req.name,
        &req.email,
        req.age,
        &req.gender,
        &password_hash,
    )
    .await?;

    let token = token::issue_token(
        &state.config.token_secret,
        account.id,
        state.config.token_ttl_secs,
    )?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "token": token, "user": account })),
    ))
}

/// POST /auth/login
///
/// Verifies credentials and issues a fresh token; previously issued
/// tokens stay valid until they expire.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let stored = db::users::find_by_email(&state.db, &req.email)
        .await?
        .ok_or(Error::InvalidCredentials)?;

    if !password::verify_password(&req.password, &stored.password_hash)? {
        return Err(Error::InvalidCredentials.into());
    }

    let token = token::issue_token(
        &state.config.token_secret,
        stored.account.id,
        state.config.token_ttl_secs,
    )?;

    Ok(Json(json!({ "token": token, "user": stored.account })))
}

/// Require a bearer token whose verified subject equals `account_id`.
///
/// Applied whenever a test route references an account identity; guest
/// requests carry no token and never reach this check.
pub fn authorize_account(
    state: &AppState,
    headers: &HeaderMap,
    account_id: Uuid,
) -> Result<(), ApiError> {
    let header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| Error::Unauthorized("Missing bearer token".to_string()))?;

    let bearer = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| Error::Unauthorized("Malformed Authorization header".to_string()))?;

    let subject = token::token_subject(&state.config.token_secret, bearer)?;

    if subject != account_id {
        return Err(
            Error::Forbidden("Token subject does not match requested account".to_string()).into(),
        );
    }

    Ok(())
}
