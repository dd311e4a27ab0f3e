//! Dashboard column: hero stats, counter cards, live metrics, build
//! history, deploy split, pipeline and stack badges.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ambient::PIPELINE_STAGES;
use crate::constants::*;
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use crate::ui::widgets::{BadgeStrip, BuildChart, GradientGauge};

use super::helpers::panel;

pub fn render_dashboard(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Hero stats
            Constraint::Length(4), // Counter cards
            Constraint::Length(5), // Live metrics
            Constraint::Length(6), // Builds + deploys
            Constraint::Length(3), // Pipeline
            Constraint::Min(3),    // Stack badges
        ])
        .split(area);

    render_hero_stats(frame, chunks[0], state);
    render_cards(frame, chunks[1], state);
    render_live_metrics(frame, chunks[2], state);
    render_builds(frame, chunks[3], state);
    render_pipeline(frame, chunks[4], state);
    render_badges(frame, chunks[5], state);
}

fn stat<'a>(value: String, label: String, t: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::styled(
            value,
            Style::default()
                .fg(t.accent_secondary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {}   ", label), Style::default().fg(t.text_dim)),
    ]
}

fn render_hero_stats(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let m = &state.feed.metrics;

    let mut spans = vec![Span::raw(" ")];
    spans.extend(stat(
        m.total_incidents.to_string(),
        t!("hero.incidents").to_string(),
        t,
    ));
    spans.extend(stat(
        m.resolved_incidents.to_string(),
        t!("hero.resolved").to_string(),
        t,
    ));
    spans.extend(stat(
        format!("{}m", m.avg_mttr_minutes),
        t!("hero.mttr").to_string(),
        t,
    ));
    spans.extend(stat(
        state.feed.skill_stats.total_skills.to_string(),
        t!("hero.skills").to_string(),
        t,
    ));

    let block = panel(t!("panel.overview").to_string(), false, t);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_cards(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let cards: [(u64, String); 6] = [
        (CARD_VULNS_FIXED, t!("cards.vulns_fixed").to_string()),
        (CARD_BUILDS_FIXED, t!("cards.builds_fixed").to_string()),
        (
            state.feed.incidents.len() as u64,
            t!("cards.postmortems").to_string(),
        ),
        (CARD_CHAOS_DAYS, t!("cards.chaos_days").to_string()),
        (CARD_ROLLBACKS, t!("cards.rollbacks").to_string()),
        (CARD_ALERTS_SILENCED, t!("cards.alerts_silenced").to_string()),
    ];

    let lines: Vec<Line> = cards
        .chunks(3)
        .map(|row| {
            let mut spans = vec![Span::raw(" ")];
            for (value, label) in row {
                spans.push(Span::styled(
                    format!("{:>4}", value),
                    Style::default().fg(t.warning).add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::styled(
                    format!(" {:<18}", label),
                    Style::default().fg(t.text_dim),
                ));
            }
            Line::from(spans)
        })
        .collect();

    let block = panel(t!("panel.cards").to_string(), false, t);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_live_metrics(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let block = panel(t!("panel.live_metrics").to_string(), false, t);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 3 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let lm = &state.live_metrics;
    let requests = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", t!("metrics.requests")),
            Style::default().fg(t.text_dim),
        ),
        Span::styled(
            lm.requests_label(),
            Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" req/min", Style::default().fg(t.text_muted)),
    ]));
    frame.render_widget(requests, rows[0]);
    frame.render_widget(
        GradientGauge::new(lm.cpu_percent as f32, " CPU", t),
        rows[1],
    );
    frame.render_widget(
        GradientGauge::new(lm.memory_percent as f32, " MEM", t),
        rows[2],
    );
}

fn render_builds(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let block = panel(t!("panel.builds").to_string(), false, t);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 3 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // chart
            Constraint::Length(1), // deploy split
            Constraint::Min(1),    // last deploy
        ])
        .split(inner);

    frame.render_widget(BuildChart::new(&state.build_history, t), rows[0]);

    let total = DEPLOYS_SUCCESSFUL + DEPLOYS_ROLLED_BACK;
    let pct = DEPLOYS_SUCCESSFUL as f32 / total as f32 * 100.0;
    frame.render_widget(
        GradientGauge::new(100.0 - pct, " Rollbacks", t).value(format!(
            "{}/{}",
            DEPLOYS_ROLLED_BACK, total
        )),
        rows[1],
    );

    let passed = state.build_history.iter().filter(|b| b.success).count();
    let last = Paragraph::new(Line::from(vec![
        Span::styled(
            t!(
                "builds.summary",
                passed = passed,
                total = state.build_history.len()
            )
            .to_string(),
            Style::default().fg(t.text_dim),
        ),
        Span::styled(
            t!(
                "builds.last_deploy",
                when = state.last_deploy.format("%H:%M:%S").to_string()
            )
            .to_string(),
            Style::default().fg(t.success),
        ),
    ]));
    frame.render_widget(last, rows[2]);
}

fn render_pipeline(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let mut spans = vec![Span::raw(" ")];
    for (i, stage) in PIPELINE_STAGES.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" → ", Style::default().fg(t.text_muted)));
        }
        spans.push(Span::styled(
            format!("✓ {}", stage.name),
            Style::default().fg(t.success).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", stage.duration),
            Style::default().fg(t.text_muted),
        ));
    }
    let block = panel(t!("panel.pipeline").to_string(), false, t);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_badges(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let title = if state.chaos.is_active() {
        t!(
            "panel.stack_chaos",
            down = state.chaos.disabled_badge_count()
        )
        .to_string()
    } else {
        t!("panel.stack").to_string()
    };
    let block = panel(title, state.chaos.is_active(), t);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(BadgeStrip::new(&state.badges, &state.chaos, t), inner);
}
