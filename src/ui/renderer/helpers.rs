//! Shared rendering helpers: text fitting, section titles, scrollbar, centered rect.

use ratatui::{
    layout::{Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::ui::theme::Theme;

/// Cut `s` to at most `max_width` display columns, ending in "..." when cut.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if unicode_width::UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str("...");
    out
}

/// Bordered panel with a bold title, highlighted when focused.
pub fn panel<'a>(title: String, focused: bool, t: &Theme) -> Block<'a> {
    Block::default()
        .title(Span::styled(format!(" {} ", title), t.header_style()))
        .borders(Borders::ALL)
        .border_style(if focused {
            t.border_highlight_style()
        } else {
            t.border_style()
        })
}

/// Section heading inside a popup.
pub fn section_title<'a>(title: &str, t: &Theme) -> Line<'a> {
    Line::from(Span::styled(
        format!(" {}", title),
        Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
    ))
}

/// "  label  value" line.
pub fn detail_line<'a>(label: &str, value: &str, t: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {}", label), Style::default().fg(t.text_dim)),
        Span::styled(value.to_string(), Style::default().fg(t.text_primary)),
    ])
}

/// Render a vertical scrollbar on the right side of `area`.
///
/// Only renders if `total > visible_height`.
pub fn render_scrollbar(frame: &mut Frame, area: Rect, total: usize, position: usize) {
    let visible_height = area.height as usize;
    if total <= visible_height {
        return;
    }
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("▲"))
        .end_symbol(Some("▼"));
    let mut scrollbar_state = ScrollbarState::new(total).position(position);
    frame.render_stateful_widget(
        scrollbar,
        area.inner(Margin {
            vertical: 0,
            horizontal: 0,
        }),
        &mut scrollbar_state,
    );
}

/// Return a `Rect` centered within `area` with the given dimensions.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
