//! Control bar: key bindings and the top bar.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::state::TuiState;
use crate::theme::Theme;

pub const APP_TITLE: &str = "Terminal Ghost";

/// What a key press on the main screen asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    ToggleRunning,
    Reset,
    ClearLog,
    OpenSettings,
    NextTheme,
    Quit,
}

pub fn action_for(key: KeyEvent) -> Option<ControlAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(ControlAction::Quit);
    }
    match key.code {
        KeyCode::Char(' ') => Some(ControlAction::ToggleRunning),
        KeyCode::Char('r') => Some(ControlAction::Reset),
        KeyCode::Char('c') => Some(ControlAction::ClearLog),
        KeyCode::Char('s') => Some(ControlAction::OpenSettings),
        KeyCode::Char('t') => Some(ControlAction::NextTheme),
        KeyCode::Char('q') | KeyCode::Esc => Some(ControlAction::Quit),
        _ => None,
    }
}

const HINTS: [(&str, &str); 6] = [
    ("space", "start/stop"),
    ("r", "reset"),
    ("c", "clear"),
    ("s", "settings"),
    ("t", "theme"),
    ("q", "quit"),
];

pub fn render_controls(frame: &mut Frame, area: Rect, tui: &TuiState, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme.border_style())
        .style(theme.panel());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [left, center, right] = Layout::horizontal([
        Constraint::Length(20),
        Constraint::Min(30),
        Constraint::Length(hints_width()),
    ])
    .areas(inner);

    let title = Line::from(vec![
        Span::styled(" ⌘ ", Style::default().fg(theme.accent)),
        Span::styled(
            APP_TITLE,
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), left);

    let running = tui.is_running();
    let (icon, label, color) = if running {
        ("⏹", "Stop", theme.error)
    } else {
        ("▶", "Start", theme.success)
    };
    let status = Line::from(vec![
        Span::styled(
            format!("[{icon} {label}]"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            tui.countdown.display(),
            Style::default()
                .fg(if running { theme.accent } else { theme.text_dim })
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("[↻ Reset]", theme.dim()),
        Span::raw("   "),
        Span::styled(
            "●",
            Style::default().fg(if running { theme.success } else { theme.text_dim }),
        ),
        Span::styled(if running { " Running" } else { " Idle" }, theme.dim()),
    ])
    .centered();
    frame.render_widget(Paragraph::new(status), center);

    let mut hints = Vec::with_capacity(HINTS.len() * 2);
    for (key, action) in HINTS {
        hints.push(Span::styled(key, Style::default().fg(theme.accent)));
        hints.push(Span::styled(format!(" {action}  "), theme.dim()));
    }
    frame.render_widget(Paragraph::new(Line::from(hints).right_aligned()), right);
}

fn hints_width() -> u16 {
    let width: usize = HINTS.iter().map(|(k, a)| k.len() + a.len() + 3).sum();
    u16::try_from(width).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(
            action_for(key(KeyCode::Char(' '))),
            Some(ControlAction::ToggleRunning)
        );
        assert_eq!(action_for(key(KeyCode::Char('r'))), Some(ControlAction::Reset));
        assert_eq!(action_for(key(KeyCode::Char('c'))), Some(ControlAction::ClearLog));
        assert_eq!(
            action_for(key(KeyCode::Char('s'))),
            Some(ControlAction::OpenSettings)
        );
        assert_eq!(action_for(key(KeyCode::Char('t'))), Some(ControlAction::NextTheme));
        assert_eq!(action_for(key(KeyCode::Esc)), Some(ControlAction::Quit));
        assert_eq!(action_for(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_ctrl_c_quits_instead_of_clearing() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action_for(ctrl_c), Some(ControlAction::Quit));

        let ctrl_r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert_eq!(action_for(ctrl_r), None);
    }
}
