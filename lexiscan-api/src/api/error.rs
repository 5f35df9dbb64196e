//! HTTP error mapping
//!
//! Every handler error is caught here and turned into a JSON body with an
//! HTTP status; no error crashes the process on a per-request basis.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lexiscan_common::Error;
use serde_json::json;
use tracing::error;

/// Wrapper mapping the common error taxonomy onto HTTP responses
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::Validation(_) | Error::Conflict(_) | Error::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::Database(_) | Error::Io(_) | Error::Config(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {}", self.0);
        }

        let body = Json(json!({
            "error": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}
