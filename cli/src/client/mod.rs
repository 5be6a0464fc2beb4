//! Classroom API client.

pub mod api;
pub mod middleware;
pub mod models;

pub use api::{ClassroomApi, ClassroomClient};
