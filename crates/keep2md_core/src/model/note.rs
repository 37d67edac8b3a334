//! Validated note domain model.
//!
//! # Responsibility
//! - Represent an active (not trashed, not archived) note after validation.
//! - Make text vs. checklist content an explicit sum type.
//!
//! # Invariants
//! - A `Note` is only built from a record whose trash/archive flags were
//!   present and both `false`.
//! - `labels` keeps declared order; grouping enforces the at-most-one rule.

use super::record::{Annotation, ChecklistItem};

/// Bucket name for notes without a declared label.
pub const GENERAL_LABEL: &str = "general";

/// Note body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteContent {
    /// Raw text, rendered verbatim.
    Text(String),
    /// Checklist items in stored order.
    Checklist(Vec<ChecklistItem>),
}

/// Active note ready for grouping and rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub title: String,
    /// Last user edit in epoch microseconds.
    pub edited_at_usec: i64,
    /// Declared label names.
    pub labels: Vec<String>,
    pub content: NoteContent,
    pub annotations: Vec<Annotation>,
}

impl Note {
    /// Creates a note with no labels and no annotations.
    pub fn new(title: impl Into<String>, edited_at_usec: i64, content: NoteContent) -> Self {
        Self {
            title: title.into(),
            edited_at_usec,
            labels: Vec::new(),
            content,
            annotations: Vec::new(),
        }
    }

    /// Adds one declared label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Adds one annotation.
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Returns the bucket this note belongs to.
    ///
    /// Callers must have rejected multi-label notes first; only the first
    /// label is consulted here.
    pub fn label(&self) -> &str {
        self.labels
            .first()
            .map(String::as_str)
            .unwrap_or(GENERAL_LABEL)
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteContent, GENERAL_LABEL};

    #[test]
    fn unlabeled_note_falls_back_to_general() {
        let note = Note::new("t", 0, NoteContent::Text(String::new()));
        assert_eq!(note.label(), GENERAL_LABEL);
    }

    #[test]
    fn labeled_note_uses_declared_name() {
        let note = Note::new("t", 0, NoteContent::Text(String::new())).with_label("Home");
        assert_eq!(note.label(), "Home");
    }
}
