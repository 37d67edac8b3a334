//! Note data model: on-disk records and validated notes.
//!
//! # Responsibility
//! - Define the Keep export wire shape (`record`).
//! - Define the validated domain note consumed by the pipeline (`note`).
//!
//! # Invariants
//! - Records are parsed as-is; validation happens in the pipeline, not here.

pub mod note;
pub mod record;
