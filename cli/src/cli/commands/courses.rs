//! Course report for the `classroom-quickstart courses` command.
//!
//! Courses are visited strictly one after another in the order the API
//! returns them. A failed coursework request does not stop the report; the
//! first failure is reported once every course has been visited.

use std::io::{self, Write};

use crate::auth::{load_client_credentials, Authorizer, FileTokenStore, TerminalPrompt};
use crate::client::{ClassroomApi, ClassroomClient};
use crate::config::QuickstartConfig;
use crate::error::Result;
use crate::format::{format_work, indent, INDENT};

/// How a course report ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOutcome {
    /// Every course was listed.
    Done,
    /// The account has no courses.
    NoCourses,
    /// The course list or at least one coursework request failed.
    Failed {
        /// Number of failed requests.
        failures: usize,
    },
}

impl ListOutcome {
    /// Process exit code for this outcome.
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Done | Self::NoCourses => 0,
            Self::Failed { .. } => 1,
        }
    }
}

/// Handles the `classroom-quickstart courses` command.
///
/// Loads the client secret, authorizes (prompting for a code when no token is
/// cached) and prints the course report to stdout.
///
/// # Errors
///
/// Returns an error if:
/// - The client secret file is missing or malformed
/// - The cached token is corrupted
/// - The authorization code exchange fails
pub async fn handle_courses(config: &QuickstartConfig, open_browser: bool) -> Result<ListOutcome> {
    let credentials = load_client_credentials(
        &config.auth.client_secret_path,
        config.auth.redirect_url.as_deref(),
    )?;

    let store = FileTokenStore::new(config.auth.token_path()?);
    let authorizer = Authorizer::new(&credentials, &config.auth, store)?;
    let authorized = authorizer
        .authorize(&mut TerminalPrompt::new(open_browser))
        .await?;
    tracing::debug!(source = ?authorized.source, "Authorized");

    let api = ClassroomClient::new(&config.api, &authorized)?;
    let outcome = list_courses(
        &api,
        config.api.course_page_size,
        &mut io::stdout(),
        &mut io::stderr(),
    )
    .await?;

    if let ListOutcome::Failed { failures } = outcome {
        tracing::debug!("{failures} Classroom request(s) failed");
    }
    Ok(outcome)
}

/// Print up to `page_size` courses with their coursework.
///
/// Report lines go to `out`; the closing error banner goes to `err`.
///
/// # Errors
///
/// Returns an error only if writing the report fails.
pub async fn list_courses<A, W, E>(
    api: &A,
    page_size: u32,
    out: &mut W,
    err: &mut E,
) -> Result<ListOutcome>
where
    A: ClassroomApi + ?Sized,
    W: Write,
    E: Write,
{
    writeln!(out, "Courses:")?;

    let courses = match api.list_courses(page_size).await {
        Ok(courses) => courses,
        Err(e) => {
            write_error_banner(err, &e.to_string())?;
            return Ok(ListOutcome::Failed { failures: 1 });
        }
    };

    if courses.is_empty() {
        writeln!(out, "No courses found.")?;
        return Ok(ListOutcome::NoCourses);
    }

    let work_indent = INDENT.repeat(2);
    let mut errors = Vec::new();

    for course in &courses {
        writeln!(out, "{INDENT}{} ({}):", course.name, course.id)?;

        match api.list_course_work(&course.id).await {
            Ok(items) if items.is_empty() => {
                writeln!(out, "{work_indent}No coursework found.")?;
            }
            Ok(items) => {
                for item in &items {
                    writeln!(out, "{}", indent(&format_work(item), &work_indent))?;
                }
            }
            Err(e) => {
                tracing::warn!(course_id = %course.id, "Failed to list coursework: {e}");
                errors.push(e);
            }
        }
    }

    if let Some(first) = errors.first() {
        write_error_banner(err, &first.to_string())?;
        return Ok(ListOutcome::Failed {
            failures: errors.len(),
        });
    }

    writeln!(out, "Done!")?;
    Ok(ListOutcome::Done)
}

fn write_error_banner<E: Write>(err: &mut E, message: &str) -> Result<()> {
    writeln!(err, "Error:")?;
    writeln!(err, "{INDENT}{message}")?;
    Ok(())
}
