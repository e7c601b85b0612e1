//! File logging for the client.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Environment variable controlling the log filter, e.g.
/// `STOCKPILE_LOG=stockpile_app=debug`.
pub const LOG_ENV: &str = "STOCKPILE_LOG";

/// Set up tracing with a daily-rolling log file under `log_dir`,
/// defaulting to `<data-local-dir>/stockpile/logs/` when unset.
///
/// Nothing is written to stdout; the interactive shell owns that.
pub fn init(log_dir: Option<PathBuf>) -> Result<()> {
    let log_dir = log_dir.unwrap_or_else(default_log_directory);
    std::fs::create_dir_all(&log_dir)?;

    let appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "stockpile.log");

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("stockpile=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true)
                .with_timer(fmt::time::ChronoLocal::rfc_3339()),
        )
        .init();

    tracing::info!(dir = %log_dir.display(), "logging to file");

    Ok(())
}

fn default_log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stockpile")
        .join("logs")
}
