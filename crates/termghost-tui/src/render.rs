//! View: draws the whole screen from state. No mutation happens here.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::widgets::Block;

use crate::features::controls::render_controls;
use crate::features::log_pane::render_log_pane;
use crate::features::widgets::render_sidebar;
use crate::overlays::Overlay;
use crate::state::AppState;

/// Width of the widget sidebar in columns.
pub const SIDEBAR_WIDTH: u16 = 32;

pub fn render(app: &AppState, frame: &mut Frame) {
    let tui = &app.tui;
    let theme = tui.theme();
    let area = frame.area();

    frame.render_widget(Block::default().style(theme.base()), area);

    let [top, main] = Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(area);
    render_controls(frame, top, tui, theme);

    if tui.settings.widgets.any_visible() {
        let [log, sidebar] =
            Layout::horizontal([Constraint::Min(20), Constraint::Length(SIDEBAR_WIDTH)])
                .areas(main);
        render_log_pane(frame, log, tui, theme);
        render_sidebar(frame, sidebar, tui, theme);
    } else {
        render_log_pane(frame, main, tui, theme);
    }

    if let Some(Overlay::Settings(panel)) = &app.overlay {
        panel.render(frame, area, &tui.settings, theme);
    }
}
