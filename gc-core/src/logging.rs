//! Structured logging setup using the `tracing` ecosystem.
//!
//! Provides file rotation, configurable log levels, and both
//! human-readable and JSON output formats.

use std::path::Path;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tracing_appender::rolling;

use crate::error::GcResult;

/// Initialize the global tracing subscriber with the given settings.
///
/// Sets up a compact console layer and a daily-rotated file layer under
/// `log_dir`. `level` accepts any `EnvFilter` directive, e.g. `"info"` or
/// `"gc_api=debug,tower_http=info"`; an unparsable directive falls back to
/// `info`, and `RUST_LOG` overrides it when set. With `json_output` the file layer writes one JSON object per line.
pub fn init_logging(level: &str, log_dir: &Path, json_output: bool) -> GcResult<LogGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = rolling::daily(log_dir, "gosucatcher.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = build_filter(level);

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    if json_output {
        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .init();
    } else {
        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .init();
    }

    tracing::info!(level, dir = %log_dir.display(), json_output, "logging initialized");

    Ok(LogGuard { _guard: guard })
}

/// `RUST_LOG` wins over the configured level when it is set and parses.
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Guard that keeps the non-blocking log writer alive.
/// Drop this to flush and close the log file.
pub struct LogGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Initialize a minimal console-only logger for tests and short CLI commands.
pub fn init_console_logging(level: &str) {
    let env_filter = build_filter(level);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .compact(),
        )
        .try_init();
}
