//! Wire model for one Google Keep export file.
//!
//! # Responsibility
//! - Mirror the JSON shape Keep writes, one note per file.
//! - Keep presence information for fields whose absence is an integrity
//!   failure rather than a parse failure.
//!
//! # Invariants
//! - Parsing never defaults `isTrashed`/`isArchived`; they stay `None` when
//!   absent so the filter stage can reject the record by title.
//! - Unknown keys are ignored so newer exports still load.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Annotation `source` value Keep uses for web link previews.
pub const WEBLINK_SOURCE: &str = "WEBLINK";

/// One exported note as found on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    #[serde(default)]
    pub title: String,
    /// Plain text body. Ignored when `list_content` is present.
    #[serde(default)]
    pub text_content: Option<String>,
    /// Checklist body.
    #[serde(default)]
    pub list_content: Option<Vec<ChecklistItem>>,
    /// Last user edit in epoch microseconds.
    pub user_edited_timestamp_usec: i64,
    #[serde(default)]
    pub created_timestamp_usec: Option<i64>,
    #[serde(default)]
    pub is_trashed: Option<bool>,
    #[serde(default)]
    pub is_archived: Option<bool>,
    /// Accepted, unused.
    #[serde(default)]
    pub is_pinned: Option<bool>,
    /// Accepted, unused.
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub labels: Option<Vec<LabelRef>>,
    #[serde(default)]
    pub annotations: Option<Vec<Annotation>>,
}

/// Label reference attached to a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRef {
    pub name: String,
}

/// Checklist line.
///
/// `checked` is `None` when the export carries no boolean state (missing,
/// `null`, or any non-boolean value). Rendering reports such items, naming
/// the note, instead of guessing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    #[serde(default)]
    pub text: String,
    #[serde(rename = "isChecked", default, deserialize_with = "boolean_or_none")]
    pub checked: Option<bool>,
}

fn boolean_or_none<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(checked) => Some(checked),
        _ => None,
    })
}

impl ChecklistItem {
    pub fn new(text: impl Into<String>, checked: bool) -> Self {
        Self {
            text: text.into(),
            checked: Some(checked),
        }
    }
}

/// Auxiliary reference attached to a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Raw annotation type, e.g. `WEBLINK`.
    pub source: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Closed view of `Annotation::source`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    WebLink,
    Other,
}

impl Annotation {
    /// Builds a web link annotation pointing at `url`.
    pub fn web_link(url: impl Into<String>) -> Self {
        Self {
            source: WEBLINK_SOURCE.to_string(),
            url: Some(url.into()),
            title: None,
            description: None,
        }
    }

    pub fn kind(&self) -> AnnotationKind {
        if self.source == WEBLINK_SOURCE {
            AnnotationKind::WebLink
        } else {
            AnnotationKind::Other
        }
    }
}
