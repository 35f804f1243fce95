//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Initialize the logger, optionally teeing to a daily rolling file
///
/// `RUST_LOG` wins over `log_level` when set. The returned guard must be
/// kept alive for buffered file output to be flushed.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir
        && (dir.exists() || std::fs::create_dir_all(dir).is_ok())
    {
        let file_appender = tracing_appender::rolling::daily(dir, "label-server");
        let (writer, guard) = tracing_appender::non_blocking(file_appender);
        let _ = builder
            .with_ansi(false)
            .with_writer(std::io::stdout.and(writer))
            .try_init();
        return Some(guard);
    }

    let _ = builder.try_init();
    None
}
