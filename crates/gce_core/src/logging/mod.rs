//! Logging infrastructure.
//!
//! This module provides:
//! - Per-job loggers with file + UI callback dual output
//! - Compact mode with progress filtering
//! - Tail buffer of tool output for error diagnosis
//! - Integration with the `tracing` ecosystem, optionally with a
//!   daily-rolling log file
//!
//! # Usage
//!
//! ```no_run
//! use gce_core::logging::{JobLogger, LogConfig};
//!
//! let logger = JobLogger::new(
//!     "game_vs_rivals",
//!     "/footage/.logs",
//!     LogConfig::default(),
//!     None,
//! ).unwrap();
//!
//! logger.phase("Extract");
//! logger.command("ffmpeg -ss 2.000 -i p1.mov ...");
//! logger.progress(50);
//! logger.success("12 clips extracted");
//! ```

mod job_logger;
mod types;

pub use job_logger::{JobLogger, JobLoggerBuilder};
pub use types::{LogConfig, LogLevel, MessagePrefix, UiLogCallback};

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the global tracing subscriber for stderr output.
///
/// Respects the `RUST_LOG` environment variable, falling back to the
/// provided default level. Call once at application startup (this and
/// [`init_file_tracing`] are alternatives, not layers).
pub fn init_tracing(default_level: LogLevel) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(env_filter(default_level))
        .init();
}

/// Initialize tracing with stderr output plus a daily-rolling log file
/// under `log_dir`.
///
/// The returned guard flushes the file writer; keep it alive for the
/// lifetime of the application.
pub fn init_file_tracing(log_dir: &Path, default_level: LogLevel) -> WorkerGuard {
    let appender = tracing_appender::rolling::daily(log_dir, "gce.log");
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .with(env_filter(default_level))
        .init();

    guard
}

fn env_filter(default_level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_str(default_level)))
}

/// Convert a [`LogLevel`] to an `EnvFilter` directive string.
fn level_to_filter_str(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_to_filter_works() {
        assert_eq!(level_to_filter_str(LogLevel::Debug), "debug");
        assert_eq!(level_to_filter_str(LogLevel::Info), "info");
        assert_eq!(level_to_filter_str(LogLevel::Error), "error");
    }
}
