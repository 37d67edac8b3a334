//! Markdown renderer for label documents.
//!
//! # Responsibility
//! - Order a label's notes by recency.
//! - Render header, per-note metadata, body and web links as markdown.
//!
//! # Invariants
//! - Notes are sorted by `edited_at_usec` descending; ties keep input order.
//! - Checklist items with undefined checked state abort rendering.
//! - Non-web-link annotations emit nothing, not even a blank line.
//!
//! # See also
//! - `pipeline::exporter` for where documents end up.

use super::exporter::check_file_names;
use super::grouper::LabelBuckets;
use super::integrity::{IntegrityError, IntegrityResult};
use crate::model::note::{Note, NoteContent};
use crate::model::record::{AnnotationKind, ChecklistItem};
use chrono::{DateTime, Utc};

/// Fixed line under every document heading.
pub const PROVENANCE_LINE: &str = "Extracted from Google Keep!";

const USEC_PER_SEC: i64 = 1_000_000;

/// One markdown document for one label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub label: String,
    pub markdown: String,
    /// Number of notes rendered into `markdown`.
    pub note_count: usize,
}

/// Renders every bucket. Nothing is returned unless all buckets render and
/// every label maps to its own output file.
pub fn render_all(buckets: &LabelBuckets) -> IntegrityResult<Vec<RenderedDocument>> {
    check_file_names(buckets.keys().map(String::as_str))?;
    buckets
        .iter()
        .map(|(label, notes)| {
            Ok(RenderedDocument {
                label: label.clone(),
                markdown: render_document(label, notes)?,
                note_count: notes.len(),
            })
        })
        .collect()
}

/// Renders one label document, most recently edited note first.
pub fn render_document(label: &str, notes: &[Note]) -> IntegrityResult<String> {
    let mut ordered: Vec<&Note> = notes.iter().collect();
    // `sort_by` is stable, so equal timestamps keep input order.
    ordered.sort_by(|a, b| b.edited_at_usec.cmp(&a.edited_at_usec));

    let mut out = render_header(label);
    for note in ordered {
        out.push_str(&render_note(note)?);
    }
    Ok(out)
}

/// Document heading plus provenance line.
pub fn render_header(label: &str) -> String {
    format!("# {label}\n\n{PROVENANCE_LINE}\n\n")
}

/// Renders one note section.
pub fn render_note(note: &Note) -> IntegrityResult<String> {
    let mut out = format!(
        "## {}\n\nUpdated at: {}\n\n",
        note.title,
        format_edit_date(&note.title, note.edited_at_usec)?
    );

    match &note.content {
        NoteContent::Checklist(items) => out.push_str(&render_checklist(&note.title, items)?),
        NoteContent::Text(text) => {
            out.push_str(text);
            // Text is verbatim; only a missing final newline is added so the
            // blank line below is a real blank line.
            if !text.ends_with('\n') {
                out.push('\n');
            }
        }
    }
    out.push('\n');

    for annotation in &note.annotations {
        if annotation.kind() != AnnotationKind::WebLink {
            continue;
        }
        let url = annotation
            .url
            .as_deref()
            .ok_or_else(|| IntegrityError::MissingWebLinkUrl {
                title: note.title.clone(),
            })?;
        out.push_str(&format!("- {url}\n"));
    }
    out.push('\n');

    Ok(out)
}

/// Renders checklist lines, one per item, in stored order.
pub fn render_checklist(title: &str, items: &[ChecklistItem]) -> IntegrityResult<String> {
    let mut out = String::new();
    for item in items {
        let mark = match item.checked {
            Some(true) => 'x',
            Some(false) => ' ',
            None => {
                return Err(IntegrityError::UndefinedChecklistState {
                    title: title.to_string(),
                    item: item.text.clone(),
                })
            }
        };
        out.push_str(&format!("- [{mark}] {}\n", item.text));
    }
    Ok(out)
}

/// Formats an epoch-microsecond timestamp as a UTC `YYYY-MM-DD` date.
pub fn format_edit_date(title: &str, usec: i64) -> IntegrityResult<String> {
    DateTime::<Utc>::from_timestamp(usec.div_euclid(USEC_PER_SEC), 0)
        .map(|at| at.format("%Y-%m-%d").to_string())
        .ok_or_else(|| IntegrityError::InvalidTimestamp {
            title: title.to_string(),
            usec,
        })
}

#[cfg(test)]
mod tests {
    use super::{format_edit_date, render_all, render_checklist, render_document, render_note};
    use crate::pipeline::grouper::LabelBuckets;
    use crate::model::note::{Note, NoteContent};
    use crate::model::record::{Annotation, ChecklistItem};
    use crate::pipeline::integrity::IntegrityError;

    #[test]
    fn checklist_renders_checked_and_unchecked_items() {
        let items = vec![ChecklistItem::new("a", true), ChecklistItem::new("b", false)];
        assert_eq!(
            render_checklist("t", &items).expect("valid items"),
            "- [x] a\n- [ ] b\n"
        );

        let note = Note::new("t", 0, NoteContent::Checklist(items));
        let rendered = render_note(&note).expect("valid note");
        assert!(rendered.contains("- [x] a\n- [ ] b\n\n"));
    }

    #[test]
    fn undefined_checked_state_is_an_error() {
        let items = vec![ChecklistItem {
            text: "maybe".to_string(),
            checked: None,
        }];
        let err = render_checklist("list", &items).expect_err("must fail");
        assert_eq!(
            err,
            IntegrityError::UndefinedChecklistState {
                title: "list".to_string(),
                item: "maybe".to_string(),
            }
        );
    }

    #[test]
    fn dates_are_utc_calendar_days() {
        assert_eq!(
            format_edit_date("t", 1_700_000_000_000_000).expect("in range"),
            "2023-11-14"
        );
        assert_eq!(
            format_edit_date("t", 1_690_000_000_000_000).expect("in range"),
            "2023-07-22"
        );
        assert_eq!(format_edit_date("t", -1).expect("in range"), "1969-12-31");
        assert!(format_edit_date("t", i64::MAX).is_err());
    }

    // Layout: heading, date, text plus its terminating newline, blank line
    // after content, trailing blank line.
    #[test]
    fn text_note_layout_without_annotations() {
        let note = Note::new(
            "Thought",
            1_690_000_000_000_000,
            NoteContent::Text("Just a thought".into()),
        );
        assert_eq!(
            render_note(&note).expect("valid note"),
            "## Thought\n\nUpdated at: 2023-07-22\n\nJust a thought\n\n\n"
        );
    }

    #[test]
    fn only_web_links_are_listed() {
        let note = Note::new("Links", 0, NoteContent::Text("body\n".into()))
            .with_annotation(Annotation::web_link("https://a.example"))
            .with_annotation(Annotation {
                source: "SHEETS".to_string(),
                url: Some("https://sheet.example".to_string()),
                title: None,
                description: None,
            })
            .with_annotation(Annotation::web_link("https://b.example"));

        let rendered = render_note(&note).expect("valid note");
        assert!(rendered.ends_with("body\n\n- https://a.example\n- https://b.example\n\n"));
        assert!(!rendered.contains("sheet.example"));
    }

    #[test]
    fn web_link_without_url_is_an_error() {
        let mut link = Annotation::web_link("x");
        link.url = None;
        let note = Note::new("Links", 0, NoteContent::Text(String::new())).with_annotation(link);
        assert!(matches!(
            render_note(&note),
            Err(IntegrityError::MissingWebLinkUrl { .. })
        ));
    }

    #[test]
    fn notes_sorted_newest_first_with_stable_ties() {
        let notes = vec![
            Note::new("old", 1_000_000, NoteContent::Text("o".into())),
            Note::new("tie-first", 5_000_000, NoteContent::Text("a".into())),
            Note::new("new", 9_000_000, NoteContent::Text("n".into())),
            Note::new("tie-second", 5_000_000, NoteContent::Text("b".into())),
        ];
        let doc = render_document("Work", &notes).expect("valid notes");

        let positions: Vec<usize> = ["## new", "## tie-first", "## tie-second", "## old"]
            .iter()
            .map(|heading| doc.find(heading).expect("heading present"))
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(doc.starts_with("# Work\n\nExtracted from Google Keep!\n\n## new"));
    }

    #[test]
    fn text_already_ending_in_newline_is_not_doubled() {
        let note = Note::new("t", 0, NoteContent::Text("line one\nline two\n".into()));
        assert!(render_note(&note)
            .expect("valid note")
            .ends_with("line one\nline two\n\n\n"));
    }

    #[test]
    fn render_all_rejects_labels_sharing_a_file_name() {
        let mut buckets = LabelBuckets::new();
        buckets.insert("General".to_string(), Vec::new());
        buckets.insert("general".to_string(), Vec::new());

        let err = render_all(&buckets).expect_err("collision must fail");
        assert!(matches!(err, IntegrityError::LabelFileCollision { .. }));
    }
}
