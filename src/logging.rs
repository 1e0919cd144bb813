use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_PREFIX: &str = "pdf-unlock";

/// Installs the global subscriber.
///
/// Diagnostics go to stderr, filtered by `RUST_LOG` (default `warn`) so they
/// stay out of the colored report on stdout. With `log_dir`, an `info` level
/// file layer with daily rotation is added; the returned guard must be held
/// until the run ends or buffered lines are lost.
pub fn setup_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_filter);

    let Some(log_dir) = log_dir else {
        tracing_subscriber::registry()
            .with(console_layer)
            .try_init()
            .context("Failed to install tracing subscriber")?;
        return Ok(None);
    };

    if !log_dir.exists() {
        fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }

    let (non_blocking, guard) = tracing_appender::non_blocking(rolling::daily(log_dir, LOG_PREFIX));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(dir = %log_dir.display(), "file logging enabled");
    Ok(Some(guard))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_the_log_directory() {
        let temp = TempDir::new().unwrap();
        let log_dir = temp.path().join("logs");

        // A second global subscriber in the same test binary fails to
        // install, but the directory is created before that point.
        let _guard = setup_logging(Some(log_dir.as_path()));
        assert!(log_dir.is_dir());
    }
}
