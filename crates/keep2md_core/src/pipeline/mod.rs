//! Export pipeline: load, filter, group, render, write.
//!
//! # Responsibility
//! - Chain the stages in order for one run.
//! - Surface one top-level error type to callers.
//!
//! # Invariants
//! - Data only flows forward between stages.
//! - Every document is rendered before the first file is written, so
//!   integrity failures never leave partial output behind.

use crate::config::ExportConfig;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Instant;

pub mod exporter;
pub mod filter;
pub mod grouper;
pub mod integrity;
pub mod loader;
pub mod render;

pub use exporter::{check_file_names, export_documents, label_file_name, WriteError};
pub use filter::{select_active, ActiveNotes};
pub use grouper::{group_by_label, LabelBuckets};
pub use integrity::{IntegrityError, IntegrityResult};
pub use loader::{load_records, LoadError};
pub use render::{render_all, render_document, RenderedDocument, PROVENANCE_LINE};

/// Fatal failure of one export run.
#[derive(Debug)]
pub enum ExportError {
    Load(LoadError),
    Integrity(IntegrityError),
    Write(WriteError),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load(err) => write!(f, "load failed: {err}"),
            Self::Integrity(err) => write!(f, "integrity check failed: {err}"),
            Self::Write(err) => write!(f, "export failed: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Load(err) => Some(err),
            Self::Integrity(err) => Some(err),
            Self::Write(err) => Some(err),
        }
    }
}

impl From<LoadError> for ExportError {
    fn from(value: LoadError) -> Self {
        Self::Load(value)
    }
}

impl From<IntegrityError> for ExportError {
    fn from(value: IntegrityError) -> Self {
        Self::Integrity(value)
    }
}

impl From<WriteError> for ExportError {
    fn from(value: WriteError) -> Self {
        Self::Write(value)
    }
}

/// Counters and outputs of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub loaded: usize,
    pub skipped_trashed: usize,
    pub skipped_archived: usize,
    pub exported_notes: usize,
    /// Written files in label order.
    pub files: Vec<PathBuf>,
}

/// Runs the full export described by `config`.
///
/// # Side effects
/// - Reads `config.input_dir`, writes into `config.output_dir`.
/// - Emits `export_run` logging events with duration and status.
pub fn run_export(config: &ExportConfig) -> Result<ExportSummary, ExportError> {
    let started_at = Instant::now();
    info!(
        "event=export_run module=pipeline status=start input={} output={}",
        config.input_dir.display(),
        config.output_dir.display()
    );

    match run_stages(config) {
        Ok(summary) => {
            info!(
                "event=export_run module=pipeline status=ok duration_ms={} loaded={} exported={} files={}",
                started_at.elapsed().as_millis(),
                summary.loaded,
                summary.exported_notes,
                summary.files.len()
            );
            Ok(summary)
        }
        Err(err) => {
            error!(
                "event=export_run module=pipeline status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn run_stages(config: &ExportConfig) -> Result<ExportSummary, ExportError> {
    let records = load_records(&config.input_dir)?;
    let active = select_active(&records)?;
    info!(
        "event=select_active module=pipeline status=ok active={} trashed={} archived={}",
        active.notes.len(),
        active.skipped_trashed,
        active.skipped_archived
    );

    let exported_notes = active.notes.len();
    let buckets = group_by_label(active.notes)?;
    let documents = render_all(&buckets)?;
    let files = export_documents(&documents, &config.output_dir)?;

    Ok(ExportSummary {
        loaded: records.len(),
        skipped_trashed: active.skipped_trashed,
        skipped_archived: active.skipped_archived,
        exported_notes,
        files,
    })
}
