//! Modal overlays.
//!
//! An overlay takes over keyboard input while open. Its key handler reports
//! an [`OverlayUpdate`]; the reducer closes the overlay or reacts to changes.

pub mod settings_panel;

use ratatui::layout::Rect;
pub use settings_panel::{Row, SettingsPanelState};

#[derive(Debug, Clone)]
pub enum Overlay {
    Settings(SettingsPanelState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayTransition {
    Stay,
    Close,
    /// Stay open; the settings were modified.
    Changed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
}

impl OverlayUpdate {
    pub fn stay() -> Self {
        Self {
            transition: OverlayTransition::Stay,
        }
    }

    pub fn close() -> Self {
        Self {
            transition: OverlayTransition::Close,
        }
    }

    pub fn changed() -> Self {
        Self {
            transition: OverlayTransition::Changed,
        }
    }
}

/// A `width` x `height` rect centered in `area`, shrunk to fit.
pub fn centered_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
