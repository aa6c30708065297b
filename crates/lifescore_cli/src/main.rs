//! CLI entry point.
//!
//! # Responsibility
//! - Without arguments, print a deterministic `lifescore_core` linkage check.
//! - With a snapshot path, print the progress report as pretty JSON.
//!
//! # Configuration
//! - `LIFESCORE_LOG_DIR`: absolute directory for rolling logs; unset disables logging.
//! - `LIFESCORE_LOG_LEVEL`: log level, defaults to the build-mode level.

use chrono::Utc;
use lifescore_core::{default_log_level, init_logging, ProgressService, Snapshot};
use std::process::ExitCode;

const LOG_DIR_ENV: &str = "LIFESCORE_LOG_DIR";
const LOG_LEVEL_ENV: &str = "LIFESCORE_LOG_LEVEL";

fn main() -> ExitCode {
    if let Err(message) = setup_logging() {
        eprintln!("lifescore: {message}");
        return ExitCode::FAILURE;
    }

    let Some(path) = std::env::args().nth(1) else {
        println!("lifescore_core ping={}", lifescore_core::ping());
        println!("lifescore_core version={}", lifescore_core::core_version());
        return ExitCode::SUCCESS;
    };

    match run_report(&path) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            log::error!("event=cli_report module=cli status=error");
            eprintln!("lifescore: {message}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging() -> Result<(), String> {
    let Ok(log_dir) = std::env::var(LOG_DIR_ENV) else {
        return Ok(());
    };
    let level =
        std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| default_log_level().to_string());
    init_logging(&level, &log_dir).map_err(|err| err.to_string())
}

fn run_report(path: &str) -> Result<String, String> {
    let snapshot = Snapshot::load_from_path(path).map_err(|err| err.to_string())?;
    let report = ProgressService::new(&snapshot).report(Utc::now());
    serde_json::to_string_pretty(&report).map_err(|err| err.to_string())
}
