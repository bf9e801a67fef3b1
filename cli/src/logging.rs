//! Subscriber setup: stderr always, plus a daily rolling file in the data
//! directory when `log_to_file` is set.

use std::sync::OnceLock;

use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{log_dir, LogLevel};

const MAX_LOG_FILES: usize = 7;

static INIT: OnceLock<()> = OnceLock::new();

/// Keeps the file writer flushing until dropped at the end of `main`.
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

pub fn init(level: LogLevel, to_file: bool, cli_override: Option<LogLevel>) -> LogGuard {
    let mut file_guard = None;

    INIT.get_or_init(|| {
        let Some(level) = cli_override.unwrap_or(level).as_tracing_level() else {
            return;
        };

        let file_layer = if to_file { file_writer() } else { None }.map(|(writer, guard)| {
            file_guard = Some(guard);
            fmt::layer()
                .with_writer(writer)
                .with_timer(UtcTime::rfc_3339())
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
        });

        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_timer(UtcTime::rfc_3339())
            .with_target(true);

        tracing_subscriber::registry()
            .with(env_filter(level))
            .with(stderr_layer)
            .with(file_layer)
            .init();
    });

    LogGuard { _file: file_guard }
}

/// `RUST_LOG` directives win over the configured level.
fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}

fn file_writer() -> Option<(NonBlocking, WorkerGuard)> {
    let dir = log_dir();
    let appender = std::fs::create_dir_all(&dir)
        .map_err(|e| e.to_string())
        .and_then(|()| {
            RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("palettehub")
                .filename_suffix("log")
                .max_log_files(MAX_LOG_FILES)
                .build(&dir)
                .map_err(|e| e.to_string())
        });

    match appender {
        Ok(appender) => Some(tracing_appender::non_blocking(appender)),
        Err(e) => {
            eprintln!("Warning: file logging disabled, {}: {}", dir.display(), e);
            None
        }
    }
}
