//! Loads Keep note records from an export directory.
//!
//! # Responsibility
//! - Discover `*.json` files directly inside the input directory.
//! - Parse each file into a `NoteRecord`.
//!
//! # Invariants
//! - Discovery is non-recursive.
//! - Files are parsed in path order, so repeated runs see the same sequence.
//! - Any unreadable or malformed file aborts the load; nothing is skipped
//!   silently.

use crate::model::record::NoteRecord;
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const RECORD_EXTENSION: &str = "json";

/// Failure to read or parse the export directory.
#[derive(Debug)]
pub enum LoadError {
    ReadDir { path: PathBuf, source: io::Error },
    ReadFile { path: PathBuf, source: io::Error },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadDir { path, source } => {
                write!(f, "failed to read input directory `{}`: {source}", path.display())
            }
            Self::ReadFile { path, source } => {
                write!(f, "failed to read note file `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "malformed note file `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ReadDir { source, .. } => Some(source),
            Self::ReadFile { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Loads every note record found directly under `dir`.
///
/// # Errors
/// - `LoadError::ReadDir` when the directory cannot be listed.
/// - `LoadError::ReadFile` / `LoadError::Parse` naming the first bad file.
pub fn load_records(dir: impl AsRef<Path>) -> Result<Vec<NoteRecord>, LoadError> {
    let dir = dir.as_ref();
    let paths = record_paths(dir)?;
    info!(
        "event=load_records module=loader status=start dir={} files={}",
        dir.display(),
        paths.len()
    );

    let mut records = Vec::with_capacity(paths.len());
    for path in paths {
        let record = match load_record(&path) {
            Ok(record) => record,
            Err(err) => {
                error!("event=load_record module=loader status=error error={err}");
                return Err(err);
            }
        };
        records.push(record);
    }

    info!(
        "event=load_records module=loader status=ok records={}",
        records.len()
    );
    Ok(records)
}

/// Parses one note record file.
pub fn load_record(path: &Path) -> Result<NoteRecord, LoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LoadError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn record_paths(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let read_dir_error = |source| LoadError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_error)? {
        let path = entry.map_err(read_dir_error)?.path();
        if path.is_file() && is_record_file(&path) {
            paths.push(path);
        } else {
            debug!(
                "event=load_records module=loader status=skip path={}",
                path.display()
            );
        }
    }
    paths.sort();
    Ok(paths)
}

fn is_record_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(RECORD_EXTENSION))
}
