//! File logging.
//!
//! The terminal belongs to the screensaver, so diagnostics go to daily
//! rolling files under `$TERMGHOST_HOME/logs`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
pub use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "TERMGHOST_LOG";

const DEFAULT_FILTER: &str = "termghost=info,termghost_core=info,termghost_tui=info";

/// Installs the global subscriber writing to `dir/termghost.log.<date>`.
///
/// Keep the returned guard alive for the life of the process; dropping it
/// flushes and stops the writer thread.
pub fn init_file_logging(dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(dir, "termghost.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(non_blocking)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {e}"))?;

    Ok(guard)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
