//! Renderer module: split into focused submodules.
//!
//! - `header`: Logo, status indicator, alert counter, uptime, chaos button
//! - `status_bar`: Bottom status bar with keybinds
//! - `dashboard`: Hero stats, cards, live metrics, builds, pipeline, badges
//! - `incidents`: Filter bar and incident cards
//! - `terminal`: Terminal feed panel
//! - `overlays`: Banner, toasts, command palette, incident detail, help
//! - `helpers`: Shared rendering utilities

mod dashboard;
mod header;
pub mod helpers;
mod incidents;
mod overlays;
mod status_bar;
mod terminal;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use super::state::AppState;

pub(crate) use overlays::detail_max_scroll;

/// Top-level render function.
pub fn render(frame: &mut Frame, state: &AppState) {
    let size = frame.area();

    let banner_height = if state.banner.is_some() { 1 } else { 0 };
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Header bar
            Constraint::Length(banner_height), // Active incident banner
            Constraint::Min(10),               // Content area
            Constraint::Length(1),             // Status bar
        ])
        .split(size);

    header::render_header(frame, main_chunks[0], state);
    overlays::render_banner(frame, main_chunks[1], state);
    status_bar::render_status_bar(frame, main_chunks[3], state);

    let terminal_height = if state.terminal_minimized {
        terminal::MINIMIZED_HEIGHT
    } else {
        12
    };
    let content = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(terminal_height)])
        .split(main_chunks[2]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(content[0]);

    dashboard::render_dashboard(frame, columns[0], state);
    incidents::render_incidents(frame, columns[1], state);
    terminal::render_terminal(frame, content[1], state);

    if !state.toasts.is_empty() {
        overlays::render_toasts(frame, size, state);
    }

    if state.show_incident_detail {
        overlays::render_incident_detail(frame, size, state);
    }

    if state.show_help {
        overlays::render_help_overlay(frame, size, state);
    }

    if state.show_command_palette {
        overlays::render_command_palette(frame, size, state);
    }
}
