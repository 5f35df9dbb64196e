//! # Lexiscan Common Library
//!
//! Shared code for the lexiscan screening backend:
//! - Error taxonomy and Result alias
//! - Configuration loading
//! - Database initialization and models
//! - Password hashing and bearer token handling

pub mod config;
pub mod db;
pub mod error;
pub mod password;
pub mod token;

pub use config::Config;
pub use error::{Error, Result};
