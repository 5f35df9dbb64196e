//! Database operations for lexiscan-api

pub mod assessments;
pub mod users;
