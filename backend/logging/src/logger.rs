//! Structured logger setup.
//!
//! Console output always; NDJSON file output with daily rotation when a log
//! directory is configured. Level comes from `RUST_LOG` when set, otherwise
//! from the configured default.

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global logger. With `log_dir` set, a daily-rolling
/// `slotline.log.YYYY-MM-DD` JSON file is written alongside the console
/// output; without it, console only (the usual mode for tests and `status`).
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logger<P: AsRef<Path>>(log_dir: Option<P>, level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_ansi(true);

    let file_layer = log_dir.map(|dir| {
        let appender = RollingFileAppender::new(Rotation::DAILY, dir, "slotline.log");
        fmt::layer().json().with_writer(appender).with_ansi(false)
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();
}
