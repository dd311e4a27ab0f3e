//! Status bar at the bottom of the screen.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::constants::STATUS_MESSAGE_TIMEOUT_SECS;
use crate::ui::state::AppState;

pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;

    // Helper to create a keybind badge
    let badge = |key: &str, color: ratatui::style::Color| -> Span {
        Span::styled(
            format!(" {} ", key),
            Style::default()
                .fg(t.bg_dark)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        )
    };
    let dim =
        |text: &str| -> Span { Span::styled(text.to_string(), Style::default().fg(t.text_dim)) };

    let mut spans = vec![
        Span::raw(" "),
        badge("q", t.accent),
        dim(&t!("status.quit").to_string()),
        badge(":", t.prompt),
        dim(&t!("status.command").to_string()),
        badge("c", t.chaos),
        dim(&t!("status.chaos").to_string()),
        badge("f", t.accent),
        dim(&t!("status.filter", filter = state.incident_filter.label()).to_string()),
        badge("↑↓", t.accent),
        dim(&t!("status.select").to_string()),
        badge("Enter", t.accent),
        dim(&t!("status.detail").to_string()),
        badge("m", t.accent),
        dim(&t!("status.terminal").to_string()),
        badge("T", t.accent),
        dim(&format!(" Theme: {} ", t.name)),
        badge("L", t.accent),
        dim(&format!(" Lang: {} ", state.current_lang.to_uppercase())),
        badge("?", t.accent),
        dim(&t!("status.help").to_string()),
    ];

    if state.banner.is_some() {
        spans.push(badge("d", t.danger));
        spans.push(dim(&t!("status.dismiss_banner").to_string()));
    }
    if !state.toasts.is_empty() {
        spans.push(badge("x", t.warning));
        spans.push(dim(&t!("status.dismiss_toast").to_string()));
    }

    // Auto-expiring status message
    if let Some((msg, when)) = &state.status_message {
        if when.elapsed().as_secs() < STATUS_MESSAGE_TIMEOUT_SECS {
            spans.push(Span::styled(
                format!("  {} ", msg),
                Style::default().fg(t.warning).add_modifier(Modifier::BOLD),
            ));
        }
    }

    let status = Paragraph::new(Line::from(spans));
    frame.render_widget(status, area);
}
