//! Classroom API response types.
//!
//! Only the fields the course report renders are modelled. Missing optional
//! fields fall back to defaults so partial responses still deserialize.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::{Map, Value};

/// A course the user can see.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Course {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// One page of `courses.list`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCoursesResponse {
    #[serde(default)]
    pub courses: Vec<Course>,
    pub next_page_token: Option<String>,
}

/// One page of `courses.courseWork.list`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCourseWorkResponse {
    #[serde(default)]
    pub course_work: Vec<CourseWork>,
    pub next_page_token: Option<String>,
}

/// A coursework item posted to a course.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseWork {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub work_type: WorkType,
    pub due_date: Option<Date>,
    #[serde(default)]
    pub materials: Vec<Material>,
}

/// Kind of coursework. Tokens this client doesn't know are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum WorkType {
    Assignment,
    ShortAnswerQuestion,
    MultipleChoiceQuestion,
    #[default]
    CourseWorkTypeUnspecified,
    Other(String),
}

impl WorkType {
    /// The API token for this work type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Assignment => "ASSIGNMENT",
            Self::ShortAnswerQuestion => "SHORT_ANSWER_QUESTION",
            Self::MultipleChoiceQuestion => "MULTIPLE_CHOICE_QUESTION",
            Self::CourseWorkTypeUnspecified => "COURSE_WORK_TYPE_UNSPECIFIED",
            Self::Other(token) => token,
        }
    }
}

impl From<String> for WorkType {
    fn from(token: String) -> Self {
        match token.as_str() {
            "ASSIGNMENT" => Self::Assignment,
            "SHORT_ANSWER_QUESTION" => Self::ShortAnswerQuestion,
            "MULTIPLE_CHOICE_QUESTION" => Self::MultipleChoiceQuestion,
            "COURSE_WORK_TYPE_UNSPECIFIED" => Self::CourseWorkTypeUnspecified,
            _ => Self::Other(token),
        }
    }
}

/// How a drive file is shared with students. Unknown tokens are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ShareMode {
    View,
    Edit,
    StudentCopy,
    #[default]
    UnknownShareMode,
    Other(String),
}

impl ShareMode {
    /// The API token for this share mode.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::View => "VIEW",
            Self::Edit => "EDIT",
            Self::StudentCopy => "STUDENT_COPY",
            Self::UnknownShareMode => "UNKNOWN_SHARE_MODE",
            Self::Other(token) => token,
        }
    }
}

impl From<String> for ShareMode {
    fn from(token: String) -> Self {
        match token.as_str() {
            "VIEW" => Self::View,
            "EDIT" => Self::Edit,
            "STUDENT_COPY" => Self::StudentCopy,
            "UNKNOWN_SHARE_MODE" => Self::UnknownShareMode,
            _ => Self::Other(token),
        }
    }
}

/// Calendar date without time zone. The year may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Date {
    pub year: Option<i32>,
    pub month: u32,
    pub day: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub alternate_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedDriveFile {
    pub drive_file: DriveFile,
    #[serde(default)]
    pub share_mode: ShareMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YouTubeVideo {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub alternate_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Link {
    pub url: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub form_url: String,
    #[serde(default)]
    pub title: String,
}

/// Attachment on a coursework item.
///
/// The API sends an object with exactly one key naming the kind. Kinds this
/// client doesn't know are kept as [`Material::Unknown`] with the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Material {
    DriveFile(SharedDriveFile),
    YoutubeVideo(YouTubeVideo),
    Link(Link),
    Form(Form),
    Unknown(String),
}

impl Material {
    /// The API key this material was sent under.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::DriveFile(_) => "driveFile",
            Self::YoutubeVideo(_) => "youtubeVideo",
            Self::Link(_) => "link",
            Self::Form(_) => "form",
            Self::Unknown(tag) => tag,
        }
    }
}

impl<'de> Deserialize<'de> for Material {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        let Some((tag, value)) = map.into_iter().next() else {
            return Err(de::Error::custom("material has no kind"));
        };

        let material = match tag.as_str() {
            "driveFile" => serde_json::from_value(value).map(Self::DriveFile),
            "youtubeVideo" => serde_json::from_value(value).map(Self::YoutubeVideo),
            "link" => serde_json::from_value(value).map(Self::Link),
            "form" => serde_json::from_value(value).map(Self::Form),
            _ => return Ok(Self::Unknown(tag)),
        };

        material.map_err(de::Error::custom)
    }
}
