//! Full-screen screensaver front end.

pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod theme;
pub mod update;

use std::io::{IsTerminal, stdout};
use std::path::PathBuf;

use anyhow::Result;
pub use runtime::TuiRuntime;
pub use state::SessionOptions;
use termghost_core::config::Settings;

use crate::state::AppState;

/// Runs the screensaver until the user quits.
///
/// Must be called inside a tokio runtime; settings saves go to
/// `config_path` on its blocking pool.
pub fn run_screensaver(
    settings: Settings,
    options: &SessionOptions,
    config_path: PathBuf,
) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "The screensaver requires a terminal.\n\
             Use `termghost print` for headless output."
        );
    }

    let state = AppState::new(settings, options);
    let mut runtime = TuiRuntime::new(state, config_path)?;
    runtime.run()
}
