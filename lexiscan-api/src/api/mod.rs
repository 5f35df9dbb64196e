//! HTTP API handlers for lexiscan-api

pub mod auth;
pub mod error;
pub mod health;
pub mod results;

pub use auth::{login, signup};
pub use error::ApiError;
pub use health::health_routes;
pub use results::{get_tests, submit_test};
