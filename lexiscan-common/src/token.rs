//! Bearer token issuance and verification
//!
//! Tokens are stateless HS256 JWTs binding to exactly one account id.
//! There is no server-side session table and no revocation list; expiry
//! is the only invalidation mechanism.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Claims carried by a session token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Account guid the token is bound to
    pub sub: String,
    /// Issued-at (Unix seconds)
    pub iat: i64,
    /// Expiry (Unix seconds)
    pub exp: i64,
}

/// Sign a new token for the given account, valid for `ttl_secs` from now.
pub fn issue_token(secret: &str, account_id: Uuid, ttl_secs: i64) -> Result<String> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: account_id.to_string(),
        iat: now,
        exp: now + ttl_secs,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(format!("Failed to sign token: {}", e)))
}

/// Verify signature and expiry, returning the claims on success.
pub fn verify_token(secret: &str, token: &str) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| Error::Unauthorized(format!("Invalid token: {}", e)))
}

/// Verify a token and parse its subject as an account id.
pub fn token_subject(secret: &str, token: &str) -> Result<Uuid> {
    let claims = verify_token(secret, token)?;
    Uuid::parse_str(&claims.sub)
        .map_err(|_| Error::Unauthorized("Malformed token subject".to_string()))
}
