//! Text rendering for coursework and materials.
//!
//! Formatters return multi-line strings whose continuation lines are indented
//! relative to the first line. Callers add the outer indentation with
//! [`indent`].

use crate::client::models::{CourseWork, Date, Material};

/// Indentation added per nesting level.
pub const INDENT: &str = "    ";

/// Descriptions longer than this many characters are truncated.
const DESCRIPTION_PREVIEW_CHARS: usize = 20;

/// Prefix every line of `text` with `prefix`.
#[must_use]
pub fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a coursework item: heading, type, optional due date, materials.
#[must_use]
pub fn format_work(work: &CourseWork) -> String {
    let mut output = format!("{} ({})", work.title, work.id);
    if let Some(description) = work.description.as_deref().filter(|d| !d.is_empty()) {
        output.push_str(": ");
        output.push_str(&preview(description));
    }
    output.push(':');

    let mut details = vec![format!("Type: {}", format_enum(work.work_type.as_str()))];
    if let Some(date) = &work.due_date {
        details.push(format!("Due Date: {}", format_date(date)));
    }
    details.extend(work.materials.iter().map(format_material));

    for detail in details {
        output.push('\n');
        output.push_str(&indent(&detail, INDENT));
    }
    output
}

/// Render a material by kind. Unknown kinds render as their tag.
#[must_use]
pub fn format_material(material: &Material) -> String {
    match material {
        Material::DriveFile(file) => format!(
            "Drive File: {} ({}):\n{INDENT}Shared Via: {}\n{INDENT}URL: {}",
            file.drive_file.title,
            file.drive_file.id,
            format_enum(file.share_mode.as_str()),
            file.drive_file.alternate_link,
        ),
        Material::YoutubeVideo(video) => format!(
            "YouTube Video: {} ({}):\n{INDENT}URL: {}",
            video.title, video.id, video.alternate_link,
        ),
        Material::Link(link) => format!("Link: {}:\n{INDENT}URL: {}", link.title, link.url),
        Material::Form(form) => format!("Form: {}:\n{INDENT}URL: {}", form.title, form.form_url),
        Material::Unknown(_) => material.tag().to_string(),
    }
}

/// Render an upper-snake-case API token as words: `DUE_SOON` -> `Due soon`.
#[must_use]
pub fn format_enum(value: &str) -> String {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    first
        .to_uppercase()
        .chain(chars.as_str().to_lowercase().replace('_', " ").chars())
        .collect()
}

/// Render a date as `YYYY-M-D`, or `M-D` when the year is unknown.
#[must_use]
pub fn format_date(date: &Date) -> String {
    match date.year.filter(|year| *year != 0) {
        Some(year) => format!("{year}-{}-{}", date.month, date.day),
        None => format!("{}-{}", date.month, date.day),
    }
}

fn preview(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_PREVIEW_CHARS {
        let head: String = description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        format!("{description}.")
    }
}
