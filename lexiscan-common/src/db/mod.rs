//! Database initialization and shared models

pub mod init;
pub mod models;

pub use init::init_database;
