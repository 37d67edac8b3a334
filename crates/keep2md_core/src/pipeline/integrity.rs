//! Integrity failures raised by the filter, grouper and renderer stages.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for stages that validate note data.
pub type IntegrityResult<T> = Result<T, IntegrityError>;

/// Exported data that violates the expected Keep export contract.
///
/// Every variant is fatal. Each one names the offending note title(s) so the
/// export can be fixed at the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    /// A required boolean flag (`isTrashed`/`isArchived`) is absent.
    MissingFlag { title: String, flag: &'static str },
    /// Neither `textContent` nor `listContent` is present.
    MissingContent { title: String },
    /// One or more notes declare more than one label.
    MultipleLabels { titles: Vec<String> },
    /// A checklist item has no boolean checked state.
    UndefinedChecklistState { title: String, item: String },
    /// A web link annotation carries no URL.
    MissingWebLinkUrl { title: String },
    /// `userEditedTimestampUsec` cannot be mapped to a calendar date.
    InvalidTimestamp { title: String, usec: i64 },
    /// Two or more labels map to the same output file name.
    LabelFileCollision { file: String, labels: Vec<String> },
    /// A label cannot be used as a file name inside the output directory.
    UnsafeLabel { label: String },
}

impl Display for IntegrityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFlag { title, flag } => {
                write!(f, "note `{title}` is missing required flag `{flag}`")
            }
            Self::MissingContent { title } => {
                write!(f, "note `{title}` has neither textContent nor listContent")
            }
            Self::MultipleLabels { titles } => write!(
                f,
                "notes with more than one label found: {}",
                quoted_list(titles)
            ),
            Self::UndefinedChecklistState { title, item } => write!(
                f,
                "cannot infer checked state of item `{item}` in note `{title}`"
            ),
            Self::MissingWebLinkUrl { title } => {
                write!(f, "web link annotation without url in note `{title}`")
            }
            Self::InvalidTimestamp { title, usec } => {
                write!(f, "note `{title}` has out-of-range edit timestamp {usec}")
            }
            Self::LabelFileCollision { file, labels } => write!(
                f,
                "labels {} would all be written to `{file}`",
                quoted_list(labels)
            ),
            Self::UnsafeLabel { label } => {
                write!(f, "label `{label}` cannot be used as an output file name")
            }
        }
    }
}

impl Error for IntegrityError {}

fn quoted_list(values: &[String]) -> String {
    values
        .iter()
        .map(|value| format!("`{value}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::IntegrityError;

    #[test]
    fn multiple_labels_message_lists_every_title() {
        let err = IntegrityError::MultipleLabels {
            titles: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "notes with more than one label found: `a`, `b`"
        );
    }

    #[test]
    fn label_collision_message_names_file_and_labels() {
        let err = IntegrityError::LabelFileCollision {
            file: "general.md".to_string(),
            labels: vec!["General".to_string(), "general".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "labels `General`, `general` would all be written to `general.md`"
        );
    }
}
