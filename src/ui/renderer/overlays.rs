//! Popup overlays: incident detail, help, command palette, toasts, and the
//! active-incident banner strip.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::commands::Command;
use crate::constants::*;
use crate::incidents::{format_date, paragraphs, thousands};
use crate::models::Incident;
use crate::ui::state::AppState;
use crate::ui::theme::Theme;

use super::helpers::{centered_rect, detail_line, render_scrollbar, section_title, truncate_str};

// ── Banner ──────────────────────────────────────────────────────────

pub fn render_banner(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let Some(banner) = &state.banner else {
        return;
    };
    let strong = Style::default()
        .fg(ratatui::style::Color::White)
        .bg(t.danger)
        .add_modifier(Modifier::BOLD);
    let line = Line::from(vec![
        Span::styled(" 🚨 ", strong),
        Span::styled(format!("{} ", banner.severity), strong),
        Span::styled(
            format!("· {} ", banner.title),
            Style::default().fg(ratatui::style::Color::White).bg(t.danger),
        ),
        Span::styled(
            t!("banner.dismiss").to_string(),
            Style::default().fg(t.text_primary).bg(t.bg_panel),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(t.danger)),
        area,
    );
}

// ── Toasts ──────────────────────────────────────────────────────────

/// Stacked in the top-right corner, oldest on top.
pub fn render_toasts(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let width = TOAST_WIDTH.min(area.width);
    let height = 4;
    let x = area.x + area.width.saturating_sub(width + 1);
    let mut y = area.y + 3;

    for toast in state.toasts.iter() {
        if y + height > area.y + area.height {
            break;
        }
        let rect = Rect::new(x, y, width, height);
        let color = t.toast_color(toast.template.kind);
        frame.render_widget(Clear, rect);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(t.bg_panel));
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let body_width = inner.width as usize;
        let lines = vec![
            Line::from(Span::styled(
                truncate_str(
                    &format!("{} {}", toast.template.icon, toast.template.title),
                    body_width,
                ),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                truncate_str(toast.template.body, body_width),
                Style::default().fg(t.text_dim),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
        y += height;
    }
}

// ── Command palette ─────────────────────────────────────────────────

pub fn render_command_palette(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    // Render at the bottom of the screen, like a vim command line
    let commands = Command::all();
    let width = area.width.min(72);
    let height = (commands.len() as u16 + 4).min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + area.height.saturating_sub(height + 1);
    let popup_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(Span::styled(
            t!("palette.title").to_string(),
            t.header_style(),
        ))
        .borders(Borders::ALL)
        .border_style(t.border_highlight_style());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let (before, after) = state.command_input.split_at(state.command_cursor_pos);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                ":",
                Style::default().fg(t.prompt).add_modifier(Modifier::BOLD),
            ),
            Span::styled(before.to_string(), Style::default().fg(t.text_primary)),
            Span::styled("█", Style::default().fg(t.prompt)),
            Span::styled(after.to_string(), Style::default().fg(t.text_primary)),
        ]),
        Line::raw(""),
    ];

    let typed = state.command_input.trim().to_lowercase();
    for cmd in commands {
        let matching = !typed.is_empty() && cmd.name().starts_with(&typed);
        let name_style = if matching {
            Style::default().fg(t.prompt).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(t.accent)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<11}", cmd.name()), name_style),
            Span::styled(cmd.suggestion(), Style::default().fg(t.text_dim)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

// ── Incident detail ─────────────────────────────────────────────────

pub fn render_incident_detail(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let Some(incident) = state.selected_incident() else {
        return;
    };

    let popup_area = detail_popup_area(area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", t!("modal.title_hint")),
            t.header_style(),
        ))
        .borders(Borders::ALL)
        .border_style(t.border_highlight_style());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let lines = incident_detail_lines(incident, detail_text_width(inner), t);

    // Still clamped here: a resize can shrink the maximum.
    let visible_height = inner.height as usize;
    let total_lines = lines.len();
    let scroll = state
        .detail_scroll
        .min(total_lines.saturating_sub(visible_height));

    let visible_lines: Vec<Line> = lines
        .into_iter()
        .skip(scroll)
        .take(visible_height)
        .collect();

    frame.render_widget(Paragraph::new(visible_lines), inner);

    render_scrollbar(frame, inner, total_lines, scroll);
}

fn detail_popup_area(area: Rect) -> Rect {
    let popup_width = MODAL_WIDTH.min(area.width.saturating_sub(4));
    let popup_height = MODAL_HEIGHT.min(area.height.saturating_sub(2));
    centered_rect(popup_width, popup_height, area)
}

fn detail_text_width(inner: Rect) -> usize {
    inner.width.saturating_sub(4) as usize
}

/// Largest useful scroll offset of the detail modal drawn inside `area`.
pub fn detail_max_scroll(incident: &Incident, area: Rect, t: &Theme) -> usize {
    let inner = Block::default()
        .borders(Borders::ALL)
        .inner(detail_popup_area(area));
    incident_detail_lines(incident, detail_text_width(inner), t)
        .len()
        .saturating_sub(inner.height as usize)
}

/// Every line of the detail view, before scrolling.
fn incident_detail_lines<'a>(incident: &Incident, width: usize, t: &Theme) -> Vec<Line<'a>> {
    let width = width.max(20);
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::raw(" "),
        Span::styled(
            format!(" {} ", incident.severity),
            t.severity_badge_style(incident.severity),
        ),
        Span::raw(" "),
        Span::styled(incident.title.clone(), t.title_style()),
    ]));
    lines.push(detail_line(
        &format!("{:<10}", t!("modal.date")),
        &format_date(&incident.date),
        t,
    ));
    lines.push(detail_line(
        &format!("{:<10}", t!("modal.duration")),
        &format!("{} min", incident.duration_minutes),
        t,
    ));
    lines.push(detail_line(
        &format!("{:<10}", t!("modal.status")),
        &format!("{} {}", incident.status.icon(), incident.status),
        t,
    ));
    lines.push(Line::raw(""));

    if !incident.timeline.is_empty() {
        lines.push(section_title(&t!("modal.timeline"), t));
        for ev in &incident.timeline {
            let head = format!("  {:<8} ", ev.time);
            let pad = " ".repeat(head.chars().count());
            for (i, part) in textwrap::wrap(&ev.event, width.saturating_sub(head.len()))
                .into_iter()
                .enumerate()
            {
                let prefix = if i == 0 { head.clone() } else { pad.clone() };
                lines.push(Line::from(vec![
                    Span::styled(prefix, Style::default().fg(t.accent_secondary)),
                    Span::styled(part.to_string(), Style::default().fg(t.text_primary)),
                ]));
            }
        }
        lines.push(Line::raw(""));
    }

    for (title, text) in [
        (t!("modal.what_happened"), &incident.what_happened),
        (t!("modal.root_cause"), &incident.root_cause),
        (t!("modal.resolution"), &incident.resolution),
        (t!("modal.prevention"), &incident.prevention),
    ] {
        lines.push(section_title(&title, t));
        push_wrapped(&mut lines, text, width, t);
        lines.push(Line::raw(""));
    }

    if !incident.artifacts.is_empty() {
        lines.push(section_title(&t!("modal.artifacts"), t));
        for artifact in &incident.artifacts {
            lines.push(Line::from(Span::styled(
                format!("  {}", artifact.description),
                Style::default().fg(t.text_dim).add_modifier(Modifier::ITALIC),
            )));
            for code in artifact.content.lines() {
                lines.push(Line::from(Span::styled(
                    format!("    {}", truncate_str(code, width.saturating_sub(2))),
                    Style::default().fg(t.prompt),
                )));
            }
        }
        lines.push(Line::raw(""));
    }

    if let Some(ba) = &incident.before_after {
        lines.push(section_title(&t!("modal.before_after"), t));
        lines.push(Line::from(Span::styled(
            format!("  {}", t!("modal.before")),
            Style::default().fg(t.danger).add_modifier(Modifier::BOLD),
        )));
        for item in &ba.before {
            lines.push(Line::from(Span::styled(
                format!("    ✗ {}", item),
                Style::default().fg(t.text_primary),
            )));
        }
        lines.push(Line::from(Span::styled(
            format!("  {}", t!("modal.after")),
            Style::default().fg(t.success).add_modifier(Modifier::BOLD),
        )));
        for item in &ba.after {
            lines.push(Line::from(Span::styled(
                format!("    ✓ {}", item),
                Style::default().fg(t.text_primary),
            )));
        }
        lines.push(Line::raw(""));
    }

    lines.push(section_title(&t!("modal.skills_used"), t));
    let skills = if incident.skills_used.is_empty() {
        "-".to_string()
    } else {
        incident.skills_used.join(", ")
    };
    push_wrapped(&mut lines, &skills, width, t);
    lines.push(Line::raw(""));

    lines.push(section_title(&t!("modal.metrics"), t));
    lines.push(detail_line(
        &format!("{:<16}", t!("modal.mttr")),
        &format!("{} min", incident.mttr_minutes()),
        t,
    ));
    if let Some(users) = incident.users_affected {
        lines.push(detail_line(
            &format!("{:<16}", t!("modal.users_affected")),
            &thousands(users),
            t,
        ));
    }
    if let Some(revenue) = incident.revenue_impact_usd {
        lines.push(detail_line(
            &format!("{:<16}", t!("modal.revenue_impact")),
            &format!("${}", thousands(revenue)),
            t,
        ));
    }
    let (sla_text, sla_color) = if incident.sla_breached() {
        (t!("modal.yes").to_string(), t.danger)
    } else {
        (t!("modal.no").to_string(), t.success)
    };
    lines.push(Line::from(vec![
        Span::styled(
            format!("  {:<16}", t!("modal.sla_breach")),
            Style::default().fg(t.text_dim),
        ),
        Span::styled(sla_text, Style::default().fg(sla_color)),
    ]));

    lines
}

/// Newline-separated paragraphs, each wrapped to `width`.
fn push_wrapped(lines: &mut Vec<Line<'_>>, text: &str, width: usize, t: &Theme) {
    for para in paragraphs(text) {
        if para.trim().is_empty() {
            lines.push(Line::raw(""));
            continue;
        }
        for part in textwrap::wrap(para, width) {
            lines.push(Line::from(Span::styled(
                format!("  {}", part),
                Style::default().fg(t.text_primary),
            )));
        }
    }
}

// ── Help ────────────────────────────────────────────────────────────

pub fn render_help_overlay(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let popup_area = centered_rect(HELP_POPUP_WIDTH, HELP_POPUP_HEIGHT, area);

    frame.render_widget(Clear, popup_area);

    let help_entry = |key: &str, desc: String, color: ratatui::style::Color| -> Line {
        Line::from(vec![
            Span::styled(
                format!("  {:<14}", key),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(desc, Style::default().fg(t.text_primary)),
        ])
    };

    let help_text = vec![
        Line::from(Span::styled(
            format!("  {}", t!("help.title")),
            t.header_style(),
        )),
        Line::raw(""),
        help_entry(":", t!("help.palette").to_string(), t.prompt),
        help_entry("c", t!("help.chaos").to_string(), t.chaos),
        help_entry("f", t!("help.filter").to_string(), t.accent),
        help_entry("Up/Down / j k", t!("help.select").to_string(), t.accent),
        help_entry("Enter", t!("help.detail").to_string(), t.accent),
        help_entry("PgUp / PgDn", t!("help.page").to_string(), t.accent),
        help_entry("Esc", t!("help.close").to_string(), t.accent),
        help_entry("m", t!("help.terminal").to_string(), t.accent),
        help_entry("d", t!("help.banner").to_string(), t.danger),
        help_entry("x", t!("help.toast").to_string(), t.warning),
        help_entry("T", t!("help.theme").to_string(), t.accent),
        help_entry("L", t!("help.lang").to_string(), t.accent),
        help_entry("?", t!("help.help").to_string(), t.accent),
        help_entry("q / Ctrl+C", t!("help.quit").to_string(), t.accent),
        Line::raw(""),
        Line::from(Span::styled(
            format!("  {}", t!("help.commands")),
            Style::default()
                .fg(t.accent_secondary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "  {}",
                Command::all()
                    .iter()
                    .map(|c| c.name())
                    .collect::<Vec<_>>()
                    .join("  ")
            ),
            Style::default().fg(t.text_dim),
        )),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(
                    t!("help.close_hint").to_string(),
                    t.header_style(),
                ))
                .borders(Borders::ALL)
                .border_style(t.border_highlight_style()),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(help, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Artifact, BeforeAfter, IncidentMetrics, IncidentStatus, Severity};

    fn plain(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    fn incident() -> Incident {
        Incident {
            title: "Cert Expiry".to_string(),
            severity: Severity::SEV2,
            status: IncidentStatus::Resolved,
            date: "2024-11-15".to_string(),
            duration_minutes: 90,
            what_happened: "Line one\nLine two".to_string(),
            root_cause: "No renewal job".to_string(),
            resolution: "Renewed".to_string(),
            prevention: "cert-manager".to_string(),
            timeline: Vec::new(),
            artifacts: Vec::new(),
            before_after: None,
            skills_used: vec!["TLS".to_string()],
            metrics: Some(IncidentMetrics {
                mttr_minutes: Some(42),
                sla_breach: true,
            }),
            users_affected: Some(12500),
            revenue_impact_usd: Some(1234567),
        }
    }

    #[test]
    fn detail_formats_metrics_with_separators() {
        rust_i18n::set_locale("en");
        let text = plain(&incident_detail_lines(&incident(), 60, &Theme::default_dark()));
        assert!(text.iter().any(|l| l.contains("12,500")));
        assert!(text.iter().any(|l| l.contains("$1,234,567")));
        assert!(text.iter().any(|l| l.contains("42 min")));
        assert!(text.iter().any(|l| l.trim() == "Line one"));
        assert!(text.iter().any(|l| l.trim() == "Line two"));
    }

    #[test]
    fn optional_sections_only_when_present() {
        let t = Theme::default_dark();
        let without = plain(&incident_detail_lines(&incident(), 60, &t));

        let mut full = incident();
        full.artifacts = vec![Artifact {
            description: "renewal cron".to_string(),
            content: "0 3 * * * certbot renew".to_string(),
        }];
        full.before_after = Some(BeforeAfter {
            before: vec!["manual".to_string()],
            after: vec!["automated".to_string()],
        });
        let with = plain(&incident_detail_lines(&full, 60, &t));

        assert!(with.len() > without.len());
        assert!(with.iter().any(|l| l.contains("certbot renew")));
        assert!(with.iter().any(|l| l.contains("✓ automated")));
        assert!(!without.iter().any(|l| l.contains("✓")));
    }

    #[test]
    fn long_text_is_wrapped_to_width() {
        let mut inc = incident();
        inc.root_cause = "word ".repeat(40);
        let text = plain(&incident_detail_lines(&inc, 30, &Theme::default_dark()));
        assert!(text.iter().all(|l| unicode_width::UnicodeWidthStr::width(l.as_str()) <= 60));
        assert!(text.iter().filter(|l| l.trim_start().starts_with("word")).count() > 3);
    }
}
