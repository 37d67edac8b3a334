//! Core export logic for keep2md.
//! Turns a Google Keep export into one markdown document per label; this
//! crate owns every data invariant, the CLI only wires configuration.

pub mod config;
pub mod logging;
pub mod model;
pub mod pipeline;

pub use config::{ConfigError, ExportConfig, CONFIG_FILE_NAME};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteContent, GENERAL_LABEL};
pub use model::record::{Annotation, AnnotationKind, ChecklistItem, LabelRef, NoteRecord};
pub use pipeline::{
    export_documents, group_by_label, label_file_name, load_records, render_all,
    render_document, run_export, select_active, ExportError, ExportSummary, IntegrityError,
    LoadError, RenderedDocument, WriteError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
