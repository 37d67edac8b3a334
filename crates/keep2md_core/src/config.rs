//! Export run configuration.
//!
//! # Responsibility
//! - Hold input/output locations and logging settings for one run.
//! - Load optional overrides from a JSON file.
//!
//! # Invariants
//! - Configuration is passed explicitly into `run_export`; there is no
//!   process-wide mutable state.
//! - A missing config file means defaults; a malformed one is an error.

use crate::logging::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default Keep export directory, relative to the working directory.
pub const DEFAULT_INPUT_DIR: &str = "data/Keep";
/// Default markdown output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "data/output";
/// Config file name looked up by the CLI in the working directory.
pub const CONFIG_FILE_NAME: &str = "keep2md.json";

/// Configuration load failure.
#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: io::Error },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Settings for one export run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Directory holding Keep `*.json` note files.
    pub input_dir: PathBuf,
    /// Directory receiving one markdown file per label.
    pub output_dir: PathBuf,
    /// `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rotating log files; stderr only when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl ExportConfig {
    /// Creates a config with explicit directories and default logging.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Parses a JSON config; omitted keys keep their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Loads `path` when it exists, otherwise returns defaults.
    ///
    /// # Errors
    /// - `ConfigError::Read` when the file exists but cannot be read.
    /// - `ConfigError::Parse` for malformed JSON or unknown keys.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::from_json_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ExportConfig, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR};
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn defaults_point_at_repository_relative_data_dirs() {
        let config = ExportConfig::default();
        assert_eq!(config.input_dir, PathBuf::from(DEFAULT_INPUT_DIR));
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn partial_json_overlays_defaults() {
        let config =
            ExportConfig::from_json_str(r#"{"output_dir": "out/md"}"#).expect("valid config");
        assert_eq!(config.input_dir, PathBuf::from(DEFAULT_INPUT_DIR));
        assert_eq!(config.output_dir, PathBuf::from("out/md"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(ExportConfig::from_json_str(r#"{"inputDir": "x"}"#).is_err());
    }

    #[test]
    fn missing_file_yields_defaults_and_bad_file_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("keep2md.json");
        assert_eq!(
            ExportConfig::load_or_default(&path).expect("absent file is fine"),
            ExportConfig::default()
        );

        fs::write(&path, "{broken").expect("write");
        let err = ExportConfig::load_or_default(&path).expect_err("malformed must fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
