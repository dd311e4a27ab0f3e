use std::time::Instant;

use chrono::{DateTime, Local, Utc};
use rand::Rng;
use ratatui::layout::Rect;

use crate::ambient::{self, BuildRecord, LiveMetrics, ToastQueue};
use crate::chaos::ChaosState;
use crate::commands::{self, Command, CommandContext};
use crate::config::Config;
use crate::constants::*;
use crate::incidents::{filter_incidents, IncidentFilter};
use crate::models::{ActiveIncident, FeedData, Incident};
use crate::terminal::TerminalFeed;

use super::renderer::detail_max_scroll;
use super::theme::Theme;

/// The "incident in progress" banner above the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub title: String,
    pub severity: String,
}

impl Banner {
    pub fn from_active(active: &ActiveIncident) -> Self {
        Self {
            title: active
                .title
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_BANNER_TITLE.to_string()),
            severity: active
                .severity
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_BANNER_SEVERITY.to_string()),
        }
    }
}

/// Central application state - the single source of truth.
pub struct AppState {
    pub feed: FeedData,
    pub terminal: TerminalFeed,
    pub chaos: ChaosState,
    pub badges: Vec<String>,

    pub show_help: bool,
    pub tick_count: u64,

    // ── Status message (shown in status bar) ───────────────────
    pub status_message: Option<(String, Instant)>,

    // ── Active incident banner ─────────────────────────────────
    pub banner: Option<Banner>,

    // ── Incident list & detail modal ───────────────────────────
    pub incident_filter: IncidentFilter,
    pub selected_incident: usize,
    pub show_incident_detail: bool,
    pub detail_scroll: usize,
    /// Last drawn frame size; bounds the detail scroll.
    pub viewport: Rect,

    // ── Terminal panel ─────────────────────────────────────────
    pub terminal_minimized: bool,

    // ── Ambient widgets ────────────────────────────────────────
    pub toasts: ToastQueue,
    pub live_metrics: LiveMetrics,
    pub uptime: String,
    pub build_history: Vec<BuildRecord>,
    pub last_deploy: DateTime<Local>,

    // ── Theme ────────────────────────────────────────────────
    pub theme: Theme,

    // ── Language ────────────────────────────────────────────
    pub current_lang: String,

    // ── Command palette ───────────────────────────────────
    pub show_command_palette: bool,
    pub command_input: String,
    pub command_cursor_pos: usize,
}

impl AppState {
    pub fn new<R: Rng + ?Sized>(config: &Config, feed: FeedData, theme: Theme, rng: &mut R) -> Self {
        Self {
            feed,
            terminal: TerminalFeed::new(config.terminal_capacity),
            chaos: ChaosState::new(config.badges.len(), config.chaos_badge_probability),
            badges: config.badges.clone(),
            show_help: false,
            tick_count: 0,
            status_message: None,
            banner: None,
            incident_filter: IncidentFilter::All,
            selected_incident: 0,
            show_incident_detail: false,
            detail_scroll: 0,
            viewport: Rect::default(),
            terminal_minimized: false,
            toasts: ToastQueue::new(
                MAX_VISIBLE_TOASTS,
                std::time::Duration::from_secs(TOAST_LIFETIME_SECS),
            ),
            live_metrics: LiveMetrics::sample(rng),
            uptime: ambient::uptime_text(Utc::now()),
            build_history: ambient::build_history(rng),
            last_deploy: Local::now(),
            theme,
            current_lang: rust_i18n::locale().to_string(),
            show_command_palette: false,
            command_input: String::new(),
            command_cursor_pos: 0,
        }
    }

    /// First lines of the terminal feed, written once the feed is loaded.
    pub fn init_terminal_messages(&mut self) {
        self.terminal.success("✅ System initialized");
        self.terminal.info("📡 Monitoring active");
        self.terminal.success("🔒 Security: All checks passed");
    }

    /// Raise the banner and log the incident to the terminal feed.
    pub fn show_active_incident(&mut self, active: &ActiveIncident) {
        let banner = Banner::from_active(active);
        self.terminal
            .danger(&format!("🚨 Active incident: {}", banner.title));
        tracing::info!(title = %banner.title, severity = %banner.severity, "active incident");
        self.banner = Some(banner);
    }

    pub fn dismiss_banner(&mut self) -> bool {
        self.banner.take().is_some()
    }

    /// Cycle to the next built-in theme.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next_builtin();
    }

    /// Cycle to the next UI language.
    pub fn cycle_lang(&mut self) {
        let current_idx = LANGUAGES
            .iter()
            .position(|&l| l == self.current_lang)
            .unwrap_or(0);
        let next_idx = (current_idx + 1) % LANGUAGES.len();
        let next_lang = LANGUAGES[next_idx];
        rust_i18n::set_locale(next_lang);
        self.current_lang = next_lang.to_string();
    }

    /// Set a status bar message with automatic timestamp.
    pub fn set_status(&mut self, msg: String) {
        self.status_message = Some((msg, Instant::now()));
    }

    // ── Chaos ──────────────────────────────────────────────────

    pub fn toggle_chaos<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.chaos.toggle(rng, &mut self.terminal);
    }

    /// Header alert counter.
    pub fn alert_count(&self) -> u32 {
        self.chaos.alert_count
    }

    // ── Command palette ────────────────────────────────────────

    pub fn open_palette(&mut self) {
        if self.show_command_palette {
            return;
        }
        self.show_command_palette = true;
        self.command_input.clear();
        self.command_cursor_pos = 0;
    }

    pub fn close_palette(&mut self) {
        self.show_command_palette = false;
        self.command_input.clear();
        self.command_cursor_pos = 0;
    }

    /// Dispatch the palette buffer. The palette is closed afterwards
    /// whatever the outcome.
    pub fn submit_palette<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Command> {
        let raw = std::mem::take(&mut self.command_input);
        self.execute_command(&raw, rng)
    }

    pub fn execute_command<R: Rng + ?Sized>(&mut self, raw: &str, rng: &mut R) -> Option<Command> {
        let result = commands::dispatch(
            raw,
            CommandContext {
                feed: &self.feed,
                terminal: &mut self.terminal,
                chaos: &mut self.chaos,
                rng,
            },
        );
        self.close_palette();
        result
    }

    pub fn palette_input_char(&mut self, c: char) {
        self.command_input.insert(self.command_cursor_pos, c);
        self.command_cursor_pos += c.len_utf8();
    }

    pub fn palette_backspace(&mut self) {
        if self.command_cursor_pos > 0 {
            let prev = self.command_input[..self.command_cursor_pos]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.command_input.remove(prev);
            self.command_cursor_pos = prev;
        }
    }

    pub fn palette_cursor_left(&mut self) {
        if self.command_cursor_pos > 0 {
            self.command_cursor_pos = self.command_input[..self.command_cursor_pos]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn palette_cursor_right(&mut self) {
        if self.command_cursor_pos < self.command_input.len() {
            self.command_cursor_pos = self.command_input[self.command_cursor_pos..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.command_cursor_pos + i)
                .unwrap_or(self.command_input.len());
        }
    }

    // ── Incidents ──────────────────────────────────────────────

    pub fn filtered_incidents(&self) -> Vec<&Incident> {
        filter_incidents(&self.feed.incidents, self.incident_filter)
    }

    pub fn selected_incident(&self) -> Option<&Incident> {
        self.filtered_incidents().get(self.selected_incident).copied()
    }

    pub fn cycle_filter(&mut self) {
        self.incident_filter = self.incident_filter.next();
        self.selected_incident = 0;
    }

    pub fn select_prev_incident(&mut self) {
        self.selected_incident = self.selected_incident.saturating_sub(1);
    }

    pub fn select_next_incident(&mut self) {
        let count = self.filtered_incidents().len();
        if self.selected_incident + 1 < count {
            self.selected_incident += 1;
        }
    }

    pub fn open_incident_detail(&mut self) {
        if self.selected_incident().is_some() {
            self.show_incident_detail = true;
            self.detail_scroll = 0;
        }
    }

    pub fn close_incident_detail(&mut self) {
        self.show_incident_detail = false;
        self.detail_scroll = 0;
    }

    fn detail_scroll_limit(&self) -> usize {
        self.selected_incident()
            .map(|incident| detail_max_scroll(incident, self.viewport, &self.theme))
            .unwrap_or(0)
    }

    pub fn detail_scroll_up(&mut self, lines: usize) {
        self.detail_scroll = self
            .detail_scroll
            .min(self.detail_scroll_limit())
            .saturating_sub(lines);
    }

    pub fn detail_scroll_down(&mut self, lines: usize) {
        self.detail_scroll = self
            .detail_scroll
            .saturating_add(lines)
            .min(self.detail_scroll_limit());
    }

    pub fn toggle_terminal(&mut self) {
        self.terminal_minimized = !self.terminal_minimized;
    }

    // ── Ambient ticks ──────────────────────────────────────────

    pub fn refresh_uptime(&mut self, now: DateTime<Utc>) {
        self.uptime = ambient::uptime_text(now);
    }

    pub fn roll_ambient_message<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if let Some(msg) = ambient::ambient_message(rng) {
            self.terminal.success(msg);
        }
    }

    pub fn refresh_live_metrics<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.live_metrics = LiveMetrics::sample(rng);
    }

    /// Maybe pop a toast; the first one is always shown.
    pub fn roll_toast<R: Rng + ?Sized>(&mut self, rng: &mut R, now: Instant, force: bool) {
        if force || rng.gen_bool(TOAST_PROBABILITY) {
            self.toasts.show_random(rng, now);
        }
    }

    pub fn expire_toasts(&mut self, now: Instant) {
        self.toasts.expire(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chaos::ChaosMode;
    use crate::models::{IncidentStatus, Severity};
    use crate::terminal::MessageSeverity;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn make_state() -> (AppState, StdRng) {
        let mut rng = StdRng::seed_from_u64(3);
        let state = AppState::new(
            &Config::default(),
            FeedData::mock(Utc::now()),
            Theme::default_dark(),
            &mut rng,
        );
        (state, rng)
    }

    fn make_incident(title: &str, severity: Severity, status: IncidentStatus) -> Incident {
        Incident {
            title: title.to_string(),
            severity,
            status,
            date: "2024-11-15".to_string(),
            duration_minutes: 30,
            what_happened: String::new(),
            root_cause: String::new(),
            resolution: String::new(),
            prevention: String::new(),
            timeline: Vec::new(),
            artifacts: Vec::new(),
            before_after: None,
            skills_used: Vec::new(),
            metrics: None,
            users_affected: None,
            revenue_impact_usd: None,
        }
    }

    fn state_with_incidents() -> (AppState, StdRng) {
        let (mut state, rng) = make_state();
        state.feed.incidents = vec![
            make_incident("A", Severity::SEV1, IncidentStatus::Resolved),
            make_incident("B", Severity::SEV2, IncidentStatus::Open),
            make_incident("C", Severity::SEV1, IncidentStatus::Open),
        ];
        (state, rng)
    }

    // ── Initial messages ─────────────────────────────────────────

    #[test]
    fn init_terminal_messages_writes_three_lines() {
        let (mut state, _) = make_state();
        state.init_terminal_messages();
        let lines: Vec<_> = state
            .terminal
            .iter()
            .map(|m| (m.text.as_str(), m.severity))
            .collect();
        assert_eq!(
            lines,
            vec![
                ("✅ System initialized", MessageSeverity::Success),
                ("📡 Monitoring active", MessageSeverity::Info),
                ("🔒 Security: All checks passed", MessageSeverity::Success),
            ]
        );
    }

    // ── Palette ──────────────────────────────────────────────────

    #[test]
    fn palette_closes_after_any_dispatch() {
        for input in ["help", "bogus", "", "  CHAOS "] {
            let (mut state, mut rng) = make_state();
            state.open_palette();
            for c in input.chars() {
                state.palette_input_char(c);
            }
            state.submit_palette(&mut rng);
            assert!(!state.show_command_palette, "input {:?}", input);
            assert!(state.command_input.is_empty());
            assert_eq!(state.command_cursor_pos, 0);
        }
    }

    #[test]
    fn unknown_command_logs_one_danger_line() {
        let (mut state, mut rng) = make_state();
        state.open_palette();
        assert_eq!(state.execute_command("  Deploy ", &mut rng), None);
        assert_eq!(state.terminal.len(), 1);
        let last = state.terminal.last().unwrap();
        assert_eq!(last.severity, MessageSeverity::Danger);
        assert_eq!(last.text, "❌ Unknown command:   Deploy ");
        assert!(!state.show_command_palette);
    }

    #[test]
    fn open_palette_twice_keeps_buffer() {
        let (mut state, _) = make_state();
        state.open_palette();
        state.palette_input_char('h');
        state.open_palette();
        assert_eq!(state.command_input, "h");
    }

    #[test]
    fn palette_editing_handles_multibyte() {
        let (mut state, _) = make_state();
        state.open_palette();
        for c in "hé".chars() {
            state.palette_input_char(c);
        }
        state.palette_cursor_left();
        assert_eq!(state.command_cursor_pos, 1);
        state.palette_cursor_right();
        assert_eq!(state.command_cursor_pos, 3);
        state.palette_backspace();
        assert_eq!(state.command_input, "h");
        state.palette_backspace();
        state.palette_backspace();
        assert!(state.command_input.is_empty());
    }

    // ── Chaos ────────────────────────────────────────────────────

    #[test]
    fn key_toggle_and_command_share_state() {
        let (mut state, mut rng) = make_state();
        state.toggle_chaos(&mut rng);
        assert_eq!(state.chaos.mode, ChaosMode::Chaos);
        state.execute_command("chaos", &mut rng);
        assert_eq!(state.chaos.mode, ChaosMode::Nominal);
        assert_eq!(state.alert_count(), 0);
    }

    // ── Incidents ────────────────────────────────────────────────

    #[test]
    fn selection_moves_within_filtered_list() {
        let (mut state, _) = state_with_incidents();
        state.select_next_incident();
        state.select_next_incident();
        state.select_next_incident();
        assert_eq!(state.selected_incident().unwrap().title, "C");
        state.select_prev_incident();
        assert_eq!(state.selected_incident().unwrap().title, "B");
    }

    #[test]
    fn cycling_filter_resets_selection() {
        let (mut state, _) = state_with_incidents();
        state.select_next_incident();
        state.cycle_filter();
        assert_eq!(state.incident_filter, IncidentFilter::Resolved);
        assert_eq!(state.selected_incident, 0);
        assert_eq!(state.filtered_incidents().len(), 1);
        state.select_next_incident();
        assert_eq!(state.selected_incident, 0);
    }

    #[test]
    fn detail_opens_only_with_a_selection() {
        let (mut state, _) = make_state();
        state.open_incident_detail();
        assert!(!state.show_incident_detail);

        let (mut state, _) = state_with_incidents();
        state.open_incident_detail();
        assert!(state.show_incident_detail);
        state.detail_scroll_down(5);
        state.close_incident_detail();
        assert!(!state.show_incident_detail);
        assert_eq!(state.detail_scroll, 0);
    }

    #[test]
    fn detail_scroll_stops_at_the_last_page() {
        let (mut state, _) = state_with_incidents();
        state.viewport = Rect::new(0, 0, 160, 50);
        state.feed.incidents[0].what_happened = "step\n".repeat(100);
        state.open_incident_detail();

        state.detail_scroll_down(10_000);
        let max = state.detail_scroll;
        assert!(max > 0 && max < 10_000);
        state.detail_scroll_down(1);
        assert_eq!(state.detail_scroll, max);

        // One step up is visible immediately.
        state.detail_scroll_up(1);
        assert_eq!(state.detail_scroll, max - 1);
    }

    #[test]
    fn detail_scroll_without_viewport_stays_bounded() {
        let (mut state, _) = state_with_incidents();
        state.open_incident_detail();
        state.detail_scroll_down(usize::MAX);
        assert!(state.detail_scroll < usize::MAX);
    }

    // ── Banner ───────────────────────────────────────────────────

    #[test]
    fn active_incident_uses_defaults_for_missing_fields() {
        let (mut state, _) = make_state();
        state.show_active_incident(&ActiveIncident {
            active: true,
            title: None,
            severity: None,
        });
        let banner = state.banner.clone().unwrap();
        assert_eq!(banner.title, "LEARNING INCIDENT IN PROGRESS");
        assert_eq!(banner.severity, "SEV-1");
        assert_eq!(
            state.terminal.last().unwrap().text,
            "🚨 Active incident: LEARNING INCIDENT IN PROGRESS"
        );
        assert!(state.dismiss_banner());
        assert!(!state.dismiss_banner());
    }

    // ── Ambient ──────────────────────────────────────────────────

    #[test]
    fn forced_toast_is_always_shown() {
        let (mut state, mut rng) = make_state();
        let now = Instant::now();
        state.roll_toast(&mut rng, now, true);
        assert_eq!(state.toasts.len(), 1);
    }

    #[test]
    fn toasts_never_exceed_limit() {
        let (mut state, mut rng) = make_state();
        let now = Instant::now();
        for _ in 0..20 {
            state.roll_toast(&mut rng, now, true);
        }
        assert_eq!(state.toasts.len(), MAX_VISIBLE_TOASTS);
    }

    #[test]
    fn terminal_toggle() {
        let (mut state, _) = make_state();
        state.toggle_terminal();
        assert!(state.terminal_minimized);
        state.toggle_terminal();
        assert!(!state.terminal_minimized);
    }
}
