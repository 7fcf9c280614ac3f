//! Logging configuration with file-based output and size-based rotation.
//!
//! Writes logs to `~/.config/brewlog/brewlog.log` (or platform equivalent)
//! with 10 MB size-based rotation. Set `DEBUG_LOGGING=1` to enable debug
//! output for brewlog crates and mirror it to stderr.

use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEBUG_DIRECTIVE: &str = "info,brewlog_cli=debug,brewlog_core=debug,brewlog_snapshot=debug";
const MAX_LOG_BYTES: u64 = 10 * 1024 * 1024;

fn filter_directive(debug_logging: bool) -> &'static str {
    if debug_logging { DEBUG_DIRECTIVE } else { "info" }
}

/// Initialize file logging, plus stderr when `DEBUG_LOGGING` is set.
///
/// Returns a `WorkerGuard` that must be held for the program lifetime so
/// buffered lines are flushed on exit. Stderr stays quiet by default so log
/// lines don't interleave with the REPL prompt.
///
/// If the log directory or file can't be created, falls back to
/// stderr-only logging and returns `None`.
pub fn init() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let log_dir = match dirs::config_dir() {
        Some(config) => config.join("brewlog"),
        None => {
            init_stderr_only(debug_logging);
            return None;
        }
    };

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        // subscriber not initialized yet
        eprintln!(
            "Failed to create log directory {:?}: {}, using stderr only",
            log_dir, e
        );
        init_stderr_only(debug_logging);
        return None;
    }

    // Keep brewlog.log and brewlog.log.1
    let log_path = log_dir.join("brewlog.log");
    let file_appender = match BasicRollingFileAppender::new(
        &log_path,
        RollingConditionBasic::new().max_size(MAX_LOG_BYTES),
        1,
    ) {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!("Failed to create log file at {:?}: {}", log_path, e);
            init_stderr_only(debug_logging);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    let stderr_layer = debug_logging.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_span_events(FmtSpan::NONE)
            .with_filter(EnvFilter::new(DEBUG_DIRECTIVE))
    });

    tracing_subscriber::registry()
        .with(file_layer.with_filter(EnvFilter::new(filter_directive(debug_logging))))
        .with(stderr_layer)
        .init();

    tracing::info!(
        log_file = ?log_path,
        debug_logging,
        "brewlog logging initialized"
    );

    Some(guard)
}

fn init_stderr_only(debug_logging: bool) {
    let directive = if debug_logging { DEBUG_DIRECTIVE } else { "warn" };
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(EnvFilter::new(directive))
        .init();
}
