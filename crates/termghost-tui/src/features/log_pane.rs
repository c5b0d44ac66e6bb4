//! The simulated terminal window.

use std::borrow::Cow;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use termghost_core::engine::LogRecord;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::state::TuiState;
use crate::theme::Theme;

/// Width of a progress bar in cells.
pub const PROGRESS_CELLS: usize = 20;

/// Ticks per cursor blink phase.
const BLINK_TICKS: u64 = 30;

pub fn title(width: u16, height: u16) -> String {
    format!(" terminal — zsh — {width}×{height} ")
}

/// Filled and empty parts of a progress bar for `percent`.
pub fn progress_bar(percent: u8) -> (String, String) {
    let filled = (usize::from(percent.min(100)) * PROGRESS_CELLS + 50) / 100;
    (
        "█".repeat(filled),
        "░".repeat(PROGRESS_CELLS - filled),
    )
}

/// Clips `text` to `max` columns, ending in an ellipsis when cut.
pub fn fit(text: &str, max: usize) -> Cow<'_, str> {
    if text.width() <= max {
        return Cow::Borrowed(text);
    }
    if max == 0 {
        return Cow::Borrowed("");
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    Cow::Owned(out)
}

/// One record as `[timestamp] prefix content`, or with a bar for progress lines.
pub fn record_line(record: &LogRecord, theme: &Theme, max_width: usize) -> Line<'static> {
    let mut spans = Vec::new();
    let mut used = 0;

    if let Some(ts) = &record.timestamp {
        let text = format!("[{ts}] ");
        used += text.width();
        spans.push(Span::styled(text, theme.dim()));
    }
    if let Some(prefix) = &record.prefix {
        let text = format!("{prefix} ");
        used += text.width();
        spans.push(Span::styled(
            text,
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ));
    }
    if record.is_progress {
        let value = record.progress.unwrap_or(0);
        let (filled, empty) = progress_bar(value);
        spans.push(Span::styled(filled, Style::default().fg(theme.accent)));
        spans.push(Span::styled(empty, Style::default().fg(theme.glow)));
        let pct = format!(" {value:>3}% ");
        used += PROGRESS_CELLS + pct.width();
        spans.push(Span::styled(pct, Style::default().fg(theme.text)));
    }

    let content = fit(&record.content, max_width.saturating_sub(used)).into_owned();
    spans.push(Span::styled(
        content,
        theme.line_style(record.category, record.glow),
    ));
    Line::from(spans)
}

/// Index of the first record shown when `rows` rows are available.
pub fn first_visible(len: usize, rows: usize) -> usize {
    len.saturating_sub(rows)
}

pub fn render_log_pane(frame: &mut Frame, area: Rect, tui: &TuiState, theme: &Theme) {
    let (width, height) = tui.viewport;
    let block = Block::bordered()
        .border_style(theme.border_style())
        .style(theme.base())
        .title(Span::styled(title(width, height), theme.dim()))
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let buffer = tui.playback.buffer();
    if buffer.is_empty() && !tui.is_running() {
        let hint = Paragraph::new(Line::from(Span::styled(
            "press space to start",
            theme.dim(),
        )))
        .alignment(Alignment::Center);
        let row = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1);
        frame.render_widget(hint, row.intersection(inner));
        return;
    }

    let typing = tui.playback.is_typing();
    let rows = usize::from(inner.height).saturating_sub(usize::from(typing));
    let max_width = usize::from(inner.width);
    let skip = first_visible(buffer.len(), rows);

    let mut lines: Vec<Line> = buffer
        .iter()
        .skip(skip)
        .map(|record| record_line(record, theme, max_width))
        .collect();
    if typing {
        let cursor = if (tui.frame / BLINK_TICKS).is_multiple_of(2) {
            "█"
        } else {
            " "
        };
        lines.push(Line::from(Span::styled(
            cursor,
            Style::default().fg(theme.accent),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use termghost_core::engine::{Category, LineId};

    use super::*;
    use crate::theme;

    fn record(content: &str) -> LogRecord {
        LogRecord {
            id: LineId(1),
            timestamp: Some("09:30:00".to_string()),
            prefix: Some(">".to_string()),
            content: content.to_string(),
            category: Category::Accent,
            is_progress: false,
            progress: None,
            glow: false,
        }
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_plain_record_layout() {
        let line = record_line(&record("$ npm install"), theme::by_id("matrix"), 80);
        assert_eq!(text(&line), "[09:30:00] > $ npm install");
    }

    #[test]
    fn test_progress_record_layout() {
        let mut rec = record("Downloading torch");
        rec.timestamp = None;
        rec.prefix = None;
        rec.is_progress = true;
        rec.progress = Some(50);

        let line = record_line(&rec, theme::by_id("matrix"), 80);
        let rendered = text(&line);
        assert!(rendered.starts_with(&"█".repeat(10)));
        assert!(rendered.contains(&"░".repeat(10)));
        assert!(rendered.ends_with("  50% Downloading torch"));
    }

    #[test]
    fn test_progress_bar_bounds() {
        assert_eq!(progress_bar(0).0.chars().count(), 0);
        assert_eq!(progress_bar(100).0.chars().count(), PROGRESS_CELLS);
        assert_eq!(progress_bar(250).1.chars().count(), 0);
        assert_eq!(progress_bar(3).0.chars().count(), 1);
    }

    #[test]
    fn test_fit_clips_with_ellipsis() {
        assert_eq!(fit("hello", 10), "hello");
        assert_eq!(fit("hello world", 8), "hello w…");
        assert_eq!(fit("hello", 0), "");
    }

    #[test]
    fn test_long_content_is_clipped_to_width() {
        let line = record_line(&record(&"x".repeat(200)), theme::by_id("matrix"), 40);
        assert_eq!(line.width(), 40);
    }

    #[test]
    fn test_view_follows_newest_line() {
        assert_eq!(first_visible(5, 10), 0);
        assert_eq!(first_visible(500, 20), 480);
    }

    #[test]
    fn test_title() {
        assert_eq!(title(80, 24), " terminal — zsh — 80×24 ");
    }
}
