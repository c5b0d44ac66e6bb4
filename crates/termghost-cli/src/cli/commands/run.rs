//! Default command: the full-screen screensaver.

use anyhow::{Context, Result};
use termghost_core::config::{Settings, paths};
use termghost_tui::SessionOptions;

pub fn run(settings: Settings, options: &SessionOptions) -> Result<()> {
    tracing::info!(
        theme = %settings.theme,
        minutes = settings.timer_minutes,
        persist = options.persist,
        "starting screensaver"
    );
    termghost_tui::run_screensaver(settings, options, paths::config_path())
        .context("screensaver failed")
}
