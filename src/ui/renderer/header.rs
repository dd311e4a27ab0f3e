//! Header bar: logo, status indicator, alert counter, uptime, chaos button.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::chaos::StatusIndicator;
use crate::ui::state::AppState;

pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(24), // Logo
            Constraint::Min(30),    // Status
            Constraint::Length(38), // Uptime + chaos button
        ])
        .split(area);

    // Logo
    let pulse = if state.tick_count % 2 == 0 {
        "●"
    } else {
        "○"
    };
    let logo = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(pulse, Style::default().fg(t.danger)),
        Span::raw(" "),
        Span::styled(t!("app.name").to_string(), t.header_style()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_style()),
    );
    frame.render_widget(logo, chunks[0]);

    // Status indicator + alert counter
    let dot_color = match state.chaos.indicator {
        StatusIndicator::Operational => t.success,
        StatusIndicator::Degraded => t.danger,
    };
    let mut spans = vec![
        Span::raw(" "),
        Span::styled("● ", Style::default().fg(dot_color)),
        Span::styled(
            state.chaos.status_label,
            Style::default().fg(dot_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  │  ", Style::default().fg(t.text_muted)),
    ];
    let alerts = state.alert_count();
    let alert_style = if alerts > 0 {
        Style::default()
            .fg(t.bg_dark)
            .bg(t.danger)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(t.text_dim)
    };
    spans.push(Span::styled(
        t!("header.alerts", count = alerts).to_string(),
        alert_style,
    ));

    let status = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_style()),
    );
    frame.render_widget(status, chunks[1]);

    // Uptime + chaos button
    let chaos_button = if state.chaos.is_active() {
        Span::styled(
            t!("header.chaos_on").to_string(),
            Style::default()
                .fg(t.bg_dark)
                .bg(t.chaos)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            t!("header.chaos_off").to_string(),
            Style::default().fg(t.chaos),
        )
    };
    let right = Paragraph::new(Line::from(vec![
        Span::styled(
            t!("header.uptime", uptime = state.uptime.as_str()).to_string(),
            Style::default().fg(t.text_dim),
        ),
        Span::raw(" "),
        chaos_button,
        Span::raw(" "),
    ]))
    .alignment(Alignment::Right)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_style()),
    );
    frame.render_widget(right, chunks[2]);
}
