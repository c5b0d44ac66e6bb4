//! Settings panel overlay.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, List, ListItem, ListState};
use termghost_core::config::{Settings, Widget};
use termghost_core::scenarios::LogType;

use super::{OverlayUpdate, centered_area};
use crate::theme::{self, Theme};

/// One adjustable row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Theme,
    TimerMinutes,
    ScrollSpeed,
    PrintSpeed,
    TextSize,
    LogType(LogType),
    Widget(Widget),
}

impl Row {
    pub fn all() -> Vec<Row> {
        let mut rows = vec![
            Row::Theme,
            Row::TimerMinutes,
            Row::ScrollSpeed,
            Row::PrintSpeed,
            Row::TextSize,
        ];
        rows.extend(LogType::ALL.into_iter().map(Row::LogType));
        rows.extend(Widget::ALL.into_iter().map(Row::Widget));
        rows
    }

    fn label(self) -> &'static str {
        match self {
            Row::Theme => "Theme",
            Row::TimerMinutes => "Timer",
            Row::ScrollSpeed => "Scroll speed",
            Row::PrintSpeed => "Print speed",
            Row::TextSize => "Text size",
            Row::LogType(kind) => kind.label(),
            Row::Widget(widget) => widget.label(),
        }
    }

    fn value(self, settings: &Settings) -> String {
        let check = |on: bool| if on { "[x]" } else { "[ ]" }.to_string();
        match self {
            Row::Theme => theme::by_id(&settings.theme).name.to_string(),
            Row::TimerMinutes => format!("{} min", settings.timer_minutes),
            Row::ScrollSpeed => format!("{}/10", settings.scroll_speed),
            Row::PrintSpeed => format!("{}%", settings.print_speed),
            Row::TextSize => format!("{}px", settings.text_size),
            Row::LogType(kind) => check(settings.is_log_type_enabled(kind)),
            Row::Widget(widget) => check(settings.widgets.is_visible(widget)),
        }
    }

    /// Moves the value one step. Toggles flip regardless of direction.
    fn adjust(self, settings: &mut Settings, forward: bool) {
        match self {
            Row::Theme => {
                settings.theme = if forward {
                    theme::next_id(&settings.theme)
                } else {
                    theme::prev_id(&settings.theme)
                }
                .to_string();
            }
            Row::TimerMinutes => {
                let minutes = if forward {
                    settings.timer_minutes.saturating_add(1)
                } else {
                    settings.timer_minutes.saturating_sub(1)
                };
                settings.set_timer_minutes(minutes);
            }
            Row::ScrollSpeed => {
                let speed = if forward {
                    settings.scroll_speed.saturating_add(1)
                } else {
                    settings.scroll_speed.saturating_sub(1)
                };
                settings.set_scroll_speed(speed);
            }
            Row::PrintSpeed => {
                let speed = if forward {
                    settings.print_speed.saturating_add(10)
                } else {
                    settings.print_speed.saturating_sub(10)
                };
                settings.set_print_speed(speed);
            }
            Row::TextSize => {
                let size = if forward {
                    settings.text_size.saturating_add(1)
                } else {
                    settings.text_size.saturating_sub(1)
                };
                settings.set_text_size(size);
            }
            Row::LogType(kind) => settings.toggle_log_type(kind),
            Row::Widget(widget) => settings.widgets.toggle(widget),
        }
    }

    fn section(self) -> Option<&'static str> {
        match self {
            Row::Theme => Some("Appearance"),
            Row::TimerMinutes => Some("Session"),
            Row::LogType(LogType::Npm) => Some("Log types"),
            Row::Widget(Widget::ProgressRing) => Some("Widgets"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SettingsPanelState {
    rows: Vec<Row>,
    pub selected: usize,
}

impl Default for SettingsPanelState {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsPanelState {
    pub fn new() -> Self {
        Self {
            rows: Row::all(),
            selected: 0,
        }
    }

    pub fn selected_row(&self) -> Row {
        self.rows[self.selected.min(self.rows.len() - 1)]
    }

    pub fn handle_key(&mut self, settings: &mut Settings, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Esc | KeyCode::Char('s' | 'q') => OverlayUpdate::close(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                OverlayUpdate::stay()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.rows.len() {
                    self.selected += 1;
                }
                OverlayUpdate::stay()
            }
            KeyCode::Left | KeyCode::Char('h') => self.change(settings, false),
            KeyCode::Right | KeyCode::Char('l') => self.change(settings, true),
            KeyCode::Char(' ') | KeyCode::Enter => match self.selected_row() {
                row @ (Row::Theme | Row::LogType(_) | Row::Widget(_)) => {
                    row.adjust(settings, true);
                    OverlayUpdate::changed()
                }
                _ => OverlayUpdate::stay(),
            },
            _ => OverlayUpdate::stay(),
        }
    }

    fn change(&self, settings: &mut Settings, forward: bool) -> OverlayUpdate {
        let before = settings.clone();
        self.selected_row().adjust(settings, forward);
        if *settings == before {
            OverlayUpdate::stay()
        } else {
            OverlayUpdate::changed()
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, settings: &Settings, theme: &Theme) {
        let height = u16::try_from(self.rows.len() + 4 + 2).unwrap_or(u16::MAX);
        let popup = centered_area(area, 46, height);
        frame.render_widget(Clear, popup);

        let block = Block::bordered()
            .border_style(Style::default().fg(theme.accent))
            .style(theme.panel())
            .title(Span::styled(
                " Settings ",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ))
            .title_bottom(
                Line::from(Span::styled(
                    " ↑↓ select  ←→ adjust  space toggle  esc close ",
                    theme.dim(),
                ))
                .centered(),
            );
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let value_width = usize::from(inner.width).saturating_sub(2 + 20);
        let mut items = Vec::with_capacity(self.rows.len() + 4);
        let mut selected_item = 0;
        for (idx, row) in self.rows.iter().enumerate() {
            if let Some(section) = row.section() {
                items.push(ListItem::new(Line::from(Span::styled(
                    section,
                    Style::default()
                        .fg(theme.accent_secondary)
                        .add_modifier(Modifier::BOLD),
                ))));
            }
            if idx == self.selected {
                selected_item = items.len();
            }
            items.push(ListItem::new(Line::from(vec![
                Span::styled(format!("{:<20}", row.label()), Style::default().fg(theme.text)),
                Span::styled(
                    format!("{:>value_width$}", row.value(settings)),
                    Style::default().fg(theme.info),
                ),
            ])));
        }

        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .bg(theme.accent)
                    .fg(theme.background)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        let mut state = ListState::default();
        state.select(Some(selected_item));
        frame.render_stateful_widget(list, inner, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::overlays::OverlayTransition;

    fn press(panel: &mut SettingsPanelState, settings: &mut Settings, code: KeyCode) -> OverlayUpdate {
        panel.handle_key(settings, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn select(panel: &mut SettingsPanelState, row: Row) {
        panel.selected = Row::all().iter().position(|r| *r == row).unwrap();
    }

    #[test]
    fn test_lists_every_setting() {
        let rows = Row::all();
        assert_eq!(rows.len(), 5 + LogType::ALL.len() + Widget::ALL.len());
        assert_eq!(rows[0], Row::Theme);
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let mut panel = SettingsPanelState::new();
        let mut settings = Settings::default();

        press(&mut panel, &mut settings, KeyCode::Up);
        assert_eq!(panel.selected, 0);
        for _ in 0..50 {
            press(&mut panel, &mut settings, KeyCode::Down);
        }
        assert_eq!(panel.selected_row(), Row::Widget(Widget::Stats));
    }

    #[test]
    fn test_adjust_clamps_and_reports_changes() {
        let mut panel = SettingsPanelState::new();
        let mut settings = Settings::default();
        select(&mut panel, Row::ScrollSpeed);

        let update = press(&mut panel, &mut settings, KeyCode::Right);
        assert_eq!(update.transition, OverlayTransition::Changed);
        assert_eq!(settings.scroll_speed, 6);

        settings.set_scroll_speed(10);
        let update = press(&mut panel, &mut settings, KeyCode::Right);
        assert_eq!(update.transition, OverlayTransition::Stay);
        assert_eq!(settings.scroll_speed, 10);

        select(&mut panel, Row::PrintSpeed);
        press(&mut panel, &mut settings, KeyCode::Left);
        assert_eq!(settings.print_speed, 90);
    }

    #[test]
    fn test_toggles_flip_on_space() {
        let mut panel = SettingsPanelState::new();
        let mut settings = Settings::default();

        select(&mut panel, Row::LogType(LogType::Docker));
        let update = press(&mut panel, &mut settings, KeyCode::Char(' '));
        assert_eq!(update.transition, OverlayTransition::Changed);
        assert!(!settings.is_log_type_enabled(LogType::Docker));

        select(&mut panel, Row::Widget(Widget::CpuGraph));
        press(&mut panel, &mut settings, KeyCode::Enter);
        assert!(!settings.widgets.cpu_graph);

        select(&mut panel, Row::TimerMinutes);
        let update = press(&mut panel, &mut settings, KeyCode::Enter);
        assert_eq!(update.transition, OverlayTransition::Stay);
    }

    #[test]
    fn test_theme_cycles_both_ways() {
        let mut panel = SettingsPanelState::new();
        let mut settings = Settings::default();

        press(&mut panel, &mut settings, KeyCode::Right);
        assert_eq!(settings.theme, "cyberpunk");
        press(&mut panel, &mut settings, KeyCode::Left);
        press(&mut panel, &mut settings, KeyCode::Left);
        assert_eq!(settings.theme, "forest");
    }

    #[test]
    fn test_escape_closes() {
        let mut panel = SettingsPanelState::new();
        let mut settings = Settings::default();
        let update = press(&mut panel, &mut settings, KeyCode::Esc);
        assert_eq!(update.transition, OverlayTransition::Close);
    }
}
