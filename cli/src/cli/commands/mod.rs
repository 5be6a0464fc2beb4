//! Command implementations.

pub mod auth;
pub mod courses;

pub use auth::{handle_logout, handle_status};
pub use courses::{handle_courses, ListOutcome};
