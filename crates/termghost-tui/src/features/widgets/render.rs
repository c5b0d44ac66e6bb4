//! Sidebar rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Gauge, Paragraph, Sparkline};
use termghost_core::config::Widget;

use super::state::{TOTAL_MEMORY_GB, format_elapsed, format_speed};
use crate::state::TuiState;
use crate::theme::Theme;

const TIMER_HEIGHT: u16 = 4;

fn widget_height(widget: Widget) -> u16 {
    match widget {
        Widget::ProgressRing | Widget::MemoryBar => 3,
        Widget::CpuGraph => 7,
        Widget::NetworkActivity | Widget::Clock | Widget::Stats => 4,
    }
}

/// Renders the timer followed by every visible widget, top to bottom.
pub fn render_sidebar(frame: &mut Frame, area: Rect, tui: &TuiState, theme: &Theme) {
    let visible: Vec<Widget> = Widget::ALL
        .into_iter()
        .filter(|w| tui.settings.widgets.is_visible(*w))
        .collect();

    let mut constraints = vec![Constraint::Length(TIMER_HEIGHT)];
    constraints.extend(visible.iter().map(|w| Constraint::Length(widget_height(*w))));
    constraints.push(Constraint::Min(0));
    let areas = Layout::vertical(constraints).split(area);

    render_timer(frame, areas[0], tui, theme);
    for (widget, area) in visible.iter().zip(areas.iter().skip(1)) {
        match widget {
            Widget::ProgressRing => render_progress_ring(frame, *area, tui, theme),
            Widget::CpuGraph => render_cpu_graph(frame, *area, tui, theme),
            Widget::MemoryBar => render_memory_bar(frame, *area, tui, theme),
            Widget::NetworkActivity => render_network(frame, *area, tui, theme),
            Widget::Clock => render_clock(frame, *area, theme),
            Widget::Stats => render_stats(frame, *area, tui, theme),
        }
    }
}

fn widget_block<'a>(title: &'a str, value: Option<String>, theme: &Theme) -> Block<'a> {
    let mut block = Block::bordered()
        .border_style(theme.border_style())
        .style(theme.panel())
        .title(Span::styled(format!(" {title} "), theme.dim()));
    if let Some(value) = value {
        block = block.title_top(
            Line::from(Span::styled(
                format!(" {value} "),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        );
    }
    block
}

fn render_timer(frame: &mut Frame, area: Rect, tui: &TuiState, theme: &Theme) {
    let status = if tui.is_running() { "Running" } else { "Paused" };
    let block = widget_block("Time Remaining", Some(status.to_string()), theme);
    let lines = vec![
        Line::from(Span::styled(
            tui.countdown.display(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ))
        .centered(),
        Line::from(Span::styled("MM:SS", theme.dim())).centered(),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_clock(frame: &mut Frame, area: Rect, theme: &Theme) {
    let now = chrono::Local::now();
    let lines = vec![
        Line::from(Span::styled(
            now.format("%H:%M:%S").to_string(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ))
        .centered(),
        Line::from(Span::styled(
            now.format("%a, %b %-d %Y").to_string(),
            theme.dim(),
        ))
        .centered(),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(widget_block("Clock", None, theme)),
        area,
    );
}

fn gauge<'a>(block: Block<'a>, ratio: f64, label: String, theme: &Theme) -> Gauge<'a> {
    Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(theme.accent).bg(theme.glow))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(Span::styled(
            label,
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ))
        .use_unicode(true)
}

fn render_progress_ring(frame: &mut Frame, area: Rect, tui: &TuiState, theme: &Theme) {
    let progress = tui.widgets.ring.progress();
    let block = widget_block("Installation", Some(format!("{progress:.0}%")), theme);
    frame.render_widget(
        gauge(block, progress / 100.0, format!("{progress:.0}%"), theme),
        area,
    );
}

fn render_cpu_graph(frame: &mut Frame, area: Rect, tui: &TuiState, theme: &Theme) {
    let cpu = &tui.widgets.cpu;
    let block = widget_block("CPU Usage", Some(format!("{:.0}%", cpu.current())), theme);
    let data: Vec<u64> = cpu.samples().map(|v| v.round() as u64).collect();
    let sparkline = Sparkline::default()
        .block(block)
        .data(data)
        .max(100)
        .style(Style::default().fg(theme.accent));
    frame.render_widget(sparkline, area);
}

fn render_memory_bar(frame: &mut Frame, area: Rect, tui: &TuiState, theme: &Theme) {
    let memory = &tui.widgets.memory;
    let label = format!("{:.1} / {TOTAL_MEMORY_GB:.0} GB", memory.used_gb());
    let block = widget_block("Memory", None, theme);
    frame.render_widget(gauge(block, memory.usage() / 100.0, label, theme), area);
}

fn render_network(frame: &mut Frame, area: Rect, tui: &TuiState, theme: &Theme) {
    let network = &tui.widgets.network;
    let row = |arrow: &'static str, speed: f64, label: &'static str| {
        Line::from(vec![
            Span::styled(format!(" {arrow} "), Style::default().fg(theme.info)),
            Span::styled(
                format!("{:<12}", format_speed(speed)),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled(label, theme.dim()),
        ])
    };
    let lines = vec![
        row("↓", network.download(), "Download"),
        row("↑", network.upload(), "Upload"),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(widget_block("Network", None, theme)),
        area,
    );
}

fn render_stats(frame: &mut Frame, area: Rect, tui: &TuiState, theme: &Theme) {
    let stats = &tui.widgets.stats;
    let value = |v: String| {
        Span::styled(
            format!("{v:<7}"),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )
    };
    let label = |l: &'static str| Span::styled(format!("{l:<9}"), theme.dim());
    let lines = vec![
        Line::from(vec![
            label(" Lines"),
            value(tui.playback.buffer().len().to_string()),
            label("Packages"),
            value(stats.packages().to_string()),
        ]),
        Line::from(vec![
            label(" Errors"),
            value(stats.errors().to_string()),
            label("Elapsed"),
            value(format_elapsed(tui.countdown.elapsed_secs())),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(widget_block("Statistics", None, theme)),
        area,
    );
}
