//! Incident column: filter bar and the card list.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::incidents::{card_skill_tags, card_summary, format_date, IncidentFilter};
use crate::models::Incident;
use crate::ui::state::AppState;
use crate::ui::theme::Theme;

use super::helpers::{panel, render_scrollbar, truncate_str};

/// Lines per card.
const CARD_HEIGHT: usize = 6;

pub fn render_incidents(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let incidents = state.filtered_incidents();

    let block = panel(
        t!(
            "panel.incidents",
            shown = incidents.len(),
            total = state.feed.incidents.len()
        )
        .to_string(),
        !state.show_command_palette && !state.show_incident_detail,
        t,
    );
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 3 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    render_filter_bar(frame, chunks[0], state);

    if incidents.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            format!("  {}", t!("incidents.empty")),
            Style::default().fg(t.text_muted),
        )));
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let list_area = chunks[1];
    let width = list_area.width.saturating_sub(3) as usize;
    let visible_cards = (list_area.height as usize / CARD_HEIGHT).max(1);
    let selected = state.selected_incident.min(incidents.len() - 1);
    let first = (selected + 1).saturating_sub(visible_cards);

    let mut lines: Vec<Line> = Vec::new();
    for (i, incident) in incidents.iter().enumerate().skip(first).take(visible_cards) {
        lines.extend(card_lines(incident, i == selected, width, t));
    }
    frame.render_widget(Paragraph::new(lines), list_area);

    render_scrollbar(
        frame,
        list_area,
        incidents.len() * CARD_HEIGHT,
        selected * CARD_HEIGHT,
    );
}

fn render_filter_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let mut spans = vec![Span::raw(" ")];
    for filter in IncidentFilter::all() {
        let style = if *filter == state.incident_filter {
            t.filter_active_style()
        } else {
            t.filter_inactive_style()
        };
        spans.push(Span::styled(format!(" {} ", filter.label()), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn card_lines<'a>(incident: &Incident, selected: bool, width: usize, t: &Theme) -> Vec<Line<'a>> {
    let marker = if selected { "▶ " } else { "  " };
    let base = if selected {
        t.selected_style()
    } else {
        t.text_style()
    };
    let status_color = if incident.status.is_resolved() {
        t.success
    } else {
        t.warning
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(marker, Style::default().fg(t.accent)),
            Span::styled(
                format!(" {} ", incident.severity),
                t.severity_badge_style(incident.severity),
            ),
            Span::styled(
                format!(" {} {}", incident.status.icon(), incident.status),
                Style::default().fg(status_color),
            ),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                truncate_str(&incident.title, width),
                base.add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                t!(
                    "card.meta",
                    date = format_date(&incident.date),
                    duration = incident.duration_minutes,
                    mttr = incident.mttr_minutes()
                )
                .to_string(),
                t.dim_style(),
            ),
        ]),
    ];

    // Summary: at most two wrapped lines.
    let summary = card_summary(incident);
    let wrapped = textwrap::wrap(&summary, width.max(10));
    for (i, part) in wrapped.iter().take(2).enumerate() {
        let text = if i == 1 && wrapped.len() > 2 {
            truncate_str(&format!("{}...", part), width)
        } else {
            part.to_string()
        };
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(text, Style::default().fg(t.text_primary)),
        ]));
    }
    for _ in wrapped.len().min(2)..2 {
        lines.push(Line::raw(""));
    }

    let mut tags = vec![Span::raw("  ")];
    for tag in card_skill_tags(&incident.skills_used) {
        tags.push(Span::styled(
            format!("[{}] ", tag),
            Style::default().fg(t.accent_secondary),
        ));
    }
    lines.push(Line::from(tags));
    lines
}
