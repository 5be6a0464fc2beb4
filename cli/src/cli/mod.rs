//! CLI module for classroom-quickstart.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands};
