//! `keep2md` entry point.
//!
//! # Responsibility
//! - Load `keep2md.json` from the working directory (defaults when absent).
//! - Initialize logging and run one export.
//! - Map failures to a readable message and non-zero exit status.

use keep2md_core::{init_logging, run_export, ExportConfig, CONFIG_FILE_NAME};
use log::info;
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match ExportConfig::load_or_default(CONFIG_FILE_NAME) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    if let Err(err) = init_logging(&config.log_level, config.log_dir.as_deref()) {
        eprintln!("error: {err}");
        return ExitCode::from(2);
    }
    info!(
        "event=cli_start module=cli status=ok version={}",
        keep2md_core::core_version()
    );

    match run_export(&config) {
        Ok(summary) => {
            for path in &summary.files {
                println!("Successfully exported notes to: {}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}", error_chain(&err));
            ExitCode::FAILURE
        }
    }
}

fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        // Wrapped errors already embed their source text.
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}
