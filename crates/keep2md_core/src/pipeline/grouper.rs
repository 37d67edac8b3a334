//! Grouper stage: assigns each note to exactly one label bucket.
//!
//! # Invariants
//! - A note with more than one label fails the whole run; no label is picked
//!   on its behalf.
//! - The `general` bucket always exists, even when empty.
//! - Notes keep input order within their bucket.

use super::integrity::{IntegrityError, IntegrityResult};
use crate::model::note::{Note, GENERAL_LABEL};
use std::collections::BTreeMap;

/// Label name to notes, ordered by label name.
pub type LabelBuckets = BTreeMap<String, Vec<Note>>;

/// Groups notes by their single declared label.
///
/// # Errors
/// - `IntegrityError::MultipleLabels` listing every offending title.
pub fn group_by_label(notes: Vec<Note>) -> IntegrityResult<LabelBuckets> {
    ensure_single_label(&notes)?;

    let mut buckets = LabelBuckets::new();
    buckets.insert(GENERAL_LABEL.to_string(), Vec::new());
    for note in notes {
        buckets
            .entry(note.label().to_string())
            .or_default()
            .push(note);
    }
    Ok(buckets)
}

/// Checks the at-most-one-label contract across all notes.
pub fn ensure_single_label(notes: &[Note]) -> IntegrityResult<()> {
    let titles: Vec<String> = notes
        .iter()
        .filter(|note| note.labels.len() > 1)
        .map(|note| note.title.clone())
        .collect();

    if titles.is_empty() {
        Ok(())
    } else {
        Err(IntegrityError::MultipleLabels { titles })
    }
}

#[cfg(test)]
mod tests {
    use super::group_by_label;
    use crate::model::note::{Note, NoteContent, GENERAL_LABEL};
    use crate::pipeline::integrity::IntegrityError;

    fn note(title: &str) -> Note {
        Note::new(title, 0, NoteContent::Text(String::new()))
    }

    #[test]
    fn general_bucket_exists_without_general_notes() {
        let buckets = group_by_label(vec![note("a").with_label("Work")]).expect("valid");
        assert_eq!(buckets.len(), 2);
        assert!(buckets[GENERAL_LABEL].is_empty());
        assert_eq!(buckets["Work"].len(), 1);
    }

    #[test]
    fn every_note_lands_in_exactly_one_bucket_in_input_order() {
        let notes = vec![
            note("1").with_label("Work"),
            note("2"),
            note("3").with_label("Work"),
            note("4").with_label("Home"),
        ];
        let buckets = group_by_label(notes).expect("valid");

        let total: usize = buckets.values().map(Vec::len).sum();
        assert_eq!(total, 4);
        let work: Vec<_> = buckets["Work"].iter().map(|n| n.title.as_str()).collect();
        assert_eq!(work, vec!["1", "3"]);
        assert_eq!(buckets[GENERAL_LABEL][0].title, "2");
    }

    #[test]
    fn multi_label_notes_fail_with_all_titles() {
        let notes = vec![
            note("ok").with_label("Work"),
            note("double").with_label("Work").with_label("Home"),
            note("triple").with_label("a").with_label("b").with_label("c"),
        ];
        let err = group_by_label(notes).expect_err("multi-label must fail");
        assert_eq!(
            err,
            IntegrityError::MultipleLabels {
                titles: vec!["double".to_string(), "triple".to_string()],
            }
        );
    }
}
