//! Commands returned by the reducer for the runtime to execute.
//!
//! The reducer only mutates state; anything touching the terminal or the
//! filesystem is expressed here and carried out by the runtime.

use termghost_core::config::Settings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,
    /// Write the settings to the config file.
    PersistSettings { settings: Settings },
}
