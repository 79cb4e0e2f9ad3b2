use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Directory and file prefix of the optional log file.
const LOG_DIR: &str = "logs";
const LOG_FILE_PREFIX: &str = "jobprobe.log";

/// Fallback when `--logging-level` is not a valid filter directive.
const FALLBACK_LEVEL: &str = "warn";

/// Installs the global subscriber for request and token logs.
///
/// Diagnostics are written to stderr: stdout carries the menu, the job tables
/// and the raw response panel, and a `warn` default keeps them uncluttered.
/// With `with_file`, the same events also go to `logs/jobprobe.log.<date>`
/// without ANSI colors.
pub fn init_logging(log_level: &str, with_file: bool) {
    tracing_subscriber::registry()
        .with(level_filter(log_level))
        .with(fmt::layer().with_line_number(true).with_writer(std::io::stderr))
        .with(with_file.then(|| {
            fmt::layer()
                .with_line_number(true)
                .with_ansi(false)
                .with_writer(RollingFileAppender::new(
                    Rotation::DAILY,
                    LOG_DIR,
                    LOG_FILE_PREFIX,
                ))
        }))
        .init();
}

fn level_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_new(log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level '{}', defaulting to '{}'",
            log_level, FALLBACK_LEVEL
        );
        EnvFilter::new(FALLBACK_LEVEL)
    })
}
