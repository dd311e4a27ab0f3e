//! Terminal feed panel. Minimized, it shows only the latest line.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::terminal::TerminalMessage;
use crate::ui::state::AppState;
use crate::ui::theme::Theme;

use super::helpers::{panel, truncate_str};

/// Panel height when minimized (border + one line).
pub const MINIMIZED_HEIGHT: u16 = 3;

pub fn render_terminal(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let title = if state.terminal_minimized {
        t!("panel.terminal_minimized").to_string()
    } else {
        t!(
            "panel.terminal",
            count = state.terminal.len(),
            capacity = state.terminal.capacity()
        )
        .to_string()
    };
    let block = panel(title, state.show_command_palette, t);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let width = inner.width as usize;

    // Bottom line is the prompt unless minimized.
    let (feed_rows, show_prompt) = if state.terminal_minimized {
        (inner.height as usize, false)
    } else {
        (inner.height.saturating_sub(1) as usize, true)
    };

    let skip = state.terminal.len().saturating_sub(feed_rows);
    let mut lines: Vec<Line> = state
        .terminal
        .iter()
        .skip(skip)
        .map(|m| message_line(m, width, t))
        .collect();

    if show_prompt {
        let cursor = if state.tick_count % 2 == 0 { "█" } else { " " };
        lines.push(Line::from(vec![
            Span::styled(
                "incident-command:~$ ",
                Style::default().fg(t.prompt).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                t!("terminal.prompt_hint").to_string(),
                Style::default().fg(t.text_muted),
            ),
            Span::styled(cursor, Style::default().fg(t.prompt)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn message_line<'a>(msg: &TerminalMessage, width: usize, t: &Theme) -> Line<'a> {
    let stamp = msg.timestamp_label();
    let text_width = width.saturating_sub(stamp.len() + 1);
    Line::from(vec![
        Span::styled(stamp, Style::default().fg(t.text_muted)),
        Span::raw(" "),
        Span::styled(
            truncate_str(&msg.text, text_width),
            t.message_style(msg.severity),
        ),
    ])
}
