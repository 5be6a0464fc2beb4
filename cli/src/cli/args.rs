//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// List your Google Classroom courses, coursework and materials.
///
/// On first run you are asked to authorize the app in a browser and paste
/// back the code. The resulting token is cached for later runs.
#[derive(Parser, Debug)]
#[command(name = "classroom-quickstart")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute (defaults to `courses`).
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to the OAuth client secret file.
    #[arg(long, global = true, value_name = "PATH")]
    pub client_secret: Option<PathBuf>,

    /// Configuration file to use instead of the default one.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Also open the authorization URL in the default browser.
    #[arg(long, global = true)]
    pub open_browser: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// List courses with their coursework and materials.
    Courses,

    /// Remove the cached authorization token.
    Logout,

    /// Show whether a token is cached.
    Status,
}
