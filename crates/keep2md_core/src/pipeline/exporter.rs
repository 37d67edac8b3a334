//! Exporter stage: writes one markdown file per label.
//!
//! # Invariants
//! - File name is the label lowercased with spaces replaced by `_`, plus `.md`.
//! - Existing files are overwritten.
//! - The first failed write aborts; files already written stay in place.
//! - `check_file_names` rejects unusable or clashing labels before any write.

use super::integrity::{IntegrityError, IntegrityResult};
use super::render::RenderedDocument;
use log::{error, info};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Failure to write exported documents.
#[derive(Debug)]
pub enum WriteError {
    CreateDir { path: PathBuf, source: io::Error },
    WriteFile { path: PathBuf, source: io::Error },
}

impl Display for WriteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateDir { path, source } => write!(
                f,
                "failed to create output directory `{}`: {source}",
                path.display()
            ),
            Self::WriteFile { path, source } => {
                write!(f, "failed to write `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for WriteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
            Self::WriteFile { source, .. } => Some(source),
        }
    }
}

/// Maps a label to its markdown file name.
pub fn label_file_name(label: &str) -> String {
    format!("{}.md", label.to_lowercase().replace(' ', "_"))
}

/// Checks that every label maps to its own plain file name.
///
/// # Errors
/// - `IntegrityError::UnsafeLabel` for empty labels, `.`/`..`, or labels
///   containing path separators or NUL.
/// - `IntegrityError::LabelFileCollision` when two labels share a file name,
///   e.g. `General` and `general`.
pub fn check_file_names<'a>(labels: impl IntoIterator<Item = &'a str>) -> IntegrityResult<()> {
    let mut by_file: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for label in labels {
        ensure_safe_label(label)?;
        by_file
            .entry(label_file_name(label))
            .or_default()
            .push(label.to_string());
    }

    match by_file.into_iter().find(|(_, labels)| labels.len() > 1) {
        Some((file, labels)) => Err(IntegrityError::LabelFileCollision { file, labels }),
        None => Ok(()),
    }
}

fn ensure_safe_label(label: &str) -> IntegrityResult<()> {
    let unsafe_name = label.trim().is_empty()
        || label == "."
        || label == ".."
        || label.contains(['/', '\\', '\0']);
    if unsafe_name {
        Err(IntegrityError::UnsafeLabel {
            label: label.to_string(),
        })
    } else {
        Ok(())
    }
}

/// Writes every document under `output_dir` and returns the written paths in
/// document order.
pub fn export_documents(
    documents: &[RenderedDocument],
    output_dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, WriteError> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir).map_err(|source| WriteError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(documents.len());
    for document in documents {
        let path = output_dir.join(label_file_name(&document.label));
        if let Err(source) = fs::write(&path, &document.markdown) {
            let err = WriteError::WriteFile { path, source };
            error!("event=export_document module=exporter status=error error={err}");
            return Err(err);
        }
        info!(
            "event=export_document module=exporter status=ok label={} notes={} path={}",
            document.label,
            document.note_count,
            path.display()
        );
        written.push(path);
    }
    Ok(written)
}
