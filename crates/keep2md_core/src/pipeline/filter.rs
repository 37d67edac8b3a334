//! Validator/filter stage: keeps active notes only.
//!
//! # Responsibility
//! - Reject records whose trash/archive flags are absent.
//! - Drop trashed or archived notes.
//! - Convert surviving records into domain `Note`s.
//!
//! # Invariants
//! - Input records are never modified.
//! - Output order equals input order.

use super::integrity::{IntegrityError, IntegrityResult};
use crate::model::note::{Note, NoteContent};
use crate::model::record::NoteRecord;
use log::debug;

/// Active notes plus counters for what was dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveNotes {
    pub notes: Vec<Note>,
    pub skipped_trashed: usize,
    /// Archived but not trashed.
    pub skipped_archived: usize,
}

/// Selects notes that are neither trashed nor archived.
///
/// # Errors
/// - `IntegrityError::MissingFlag` when a record lacks `isTrashed` or
///   `isArchived`.
/// - `IntegrityError::MissingContent` when an active record has no body.
pub fn select_active(records: &[NoteRecord]) -> IntegrityResult<ActiveNotes> {
    let mut active = ActiveNotes::default();

    for record in records {
        let trashed = required_flag(record, record.is_trashed, "isTrashed")?;
        let archived = required_flag(record, record.is_archived, "isArchived")?;

        if trashed {
            debug!("event=select_active module=filter status=skip reason=trashed");
            active.skipped_trashed += 1;
            continue;
        }
        if archived {
            debug!("event=select_active module=filter status=skip reason=archived");
            active.skipped_archived += 1;
            continue;
        }

        active.notes.push(to_note(record)?);
    }

    Ok(active)
}

fn required_flag(
    record: &NoteRecord,
    value: Option<bool>,
    flag: &'static str,
) -> IntegrityResult<bool> {
    value.ok_or_else(|| IntegrityError::MissingFlag {
        title: record.title.clone(),
        flag,
    })
}

fn to_note(record: &NoteRecord) -> IntegrityResult<Note> {
    let content = match (&record.list_content, &record.text_content) {
        (Some(items), _) => NoteContent::Checklist(items.clone()),
        (None, Some(text)) => NoteContent::Text(text.clone()),
        (None, None) => {
            return Err(IntegrityError::MissingContent {
                title: record.title.clone(),
            })
        }
    };

    Ok(Note {
        title: record.title.clone(),
        edited_at_usec: record.user_edited_timestamp_usec,
        labels: record
            .labels
            .iter()
            .flatten()
            .map(|label| label.name.clone())
            .collect(),
        content,
        annotations: record.annotations.clone().unwrap_or_default(),
    })
}
