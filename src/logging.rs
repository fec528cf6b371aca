use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Stable tags prefixed to user-facing failures so log greps survive
/// message rewording.
#[derive(Debug, Clone, Copy)]
pub enum ErrorCode {
    ScanFailed = 101,
    HardwareReportFailed = 102,
    SelectionFailed = 103,
    ConnectFailed = 104,
    DisconnectFailed = 105,
    PowerFailed = 106,
    ToolMissing = 107,
    MappingFailed = 108,
}

pub fn error_code(code: ErrorCode) -> String {
    format!("[E{}]", code as u32)
}

/// Set up the tracing subscriber. Logs go to stderr; when a log directory
/// is given, a daily-rotated file there takes them instead.
pub fn setup_logging(log_dir: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).context("Failed to create log directory")?;
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("airman")
                .filename_suffix("log")
                .max_log_files(7)
                .build(dir)
                .context("Failed to create file appender")?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(appender)
                .with_target(false)
                .with_ansi(false)
                .compact()
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact()
                .init();
        }
    }

    Ok(())
}
