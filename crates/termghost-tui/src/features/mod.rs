//! Feature slices for the TUI.

pub mod controls;
pub mod log_pane;
pub mod widgets;
