//! Tracing initialization and subscriber setup.
//!
//! Installs a global `tracing` subscriber that writes formatted events to a
//! rotating log file.

use super::file_writer::RotatingFileWriter;
use crate::Config;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file name used when `trace_file` is not configured.
const DEFAULT_LOG_FILE: &str = "hooklab.log";

/// Initializes the global tracing subscriber from configuration.
///
/// Does nothing unless `trace_level` is set. `RUST_LOG`, when present, takes
/// precedence over the configured level. Returns the path of the log file when
/// a subscriber was installed by this call; `None` if tracing is disabled, the
/// log directory cannot be created, or another subscriber is already active.
pub fn init_tracing(config: &Config) -> Option<PathBuf> {
    let level = config.trace_level.as_deref()?;

    let log_file = config
        .trace_file
        .clone()
        .unwrap_or_else(|| crate::infrastructure::get_data_dir().join(DEFAULT_LOG_FILE));

    if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        if std::fs::create_dir_all(parent).is_err() {
            // Silently fail if we can't create the directory
            return None;
        }
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(RotatingFileWriter::new(log_file.clone()));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(path = ?log_file, level = %level, "tracing initialized");
        Some(log_file)
    } else {
        None
    }
}
