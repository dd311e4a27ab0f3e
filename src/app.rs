//! Application struct and event loop.
//!
//! Owns the terminal, state, RNG, periodic timers and the active-incident
//! channel.

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Utc;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::ambient::Every;
use crate::config::Config;
use crate::constants::*;
use crate::loader::{FeedLoader, FeedSource};
use crate::models::ActiveIncident;
use crate::ui::{self, AppState, Theme};

/// Main application struct.
///
/// Owns all runtime resources: state, RNG, timers, background channel.
pub struct App {
    state: AppState,
    rng: StdRng,

    // Channels
    incident_rx: mpsc::UnboundedReceiver<ActiveIncident>,

    // Periodic effects
    uptime_timer: Every,
    ambient_timer: Every,
    metrics_timer: Every,
    toast_timer: Option<Every>,
    first_toast_shown: bool,
}

impl App {
    /// Load the feed, seed the terminal and start the active-incident probe.
    ///
    /// The feed load is awaited here so every init step below sees the
    /// final data.
    pub async fn new(config: &Config, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };

        let loader = FeedLoader::new();
        let feed = loader.load(&FeedSource::parse(&config.feed_source)).await;

        // Active incident probe (runs once, reports over a channel)
        let (incident_tx, incident_rx) = mpsc::unbounded_channel();
        let source = FeedSource::parse(&config.active_incident_source);
        tokio::spawn(async move {
            if let Some(active) = loader.check_active_incident(&source).await {
                if incident_tx.send(active).is_err() {
                    tracing::debug!("app gone before active incident arrived");
                }
            }
        });

        let theme = Theme::resolve(&config.theme);
        Ok(Self::from_parts(config, feed, theme, rng, incident_rx))
    }

    fn from_parts(
        config: &Config,
        feed: crate::models::FeedData,
        theme: Theme,
        mut rng: StdRng,
        incident_rx: mpsc::UnboundedReceiver<ActiveIncident>,
    ) -> Self {
        let mut state = AppState::new(config, feed, theme, &mut rng);
        state.init_terminal_messages();

        let now = Instant::now();
        let toast_timer = (config.toast_interval_secs > 0).then(|| {
            Every::starting_after(
                Duration::from_secs(FIRST_TOAST_DELAY_SECS),
                Duration::from_secs(config.toast_interval_secs),
                now,
            )
        });

        Self {
            state,
            rng,
            incident_rx,
            uptime_timer: Every::new(Duration::from_secs(UPTIME_REFRESH_SECS), now),
            ambient_timer: Every::new(
                Duration::from_secs(config.ambient_message_interval_secs),
                now,
            ),
            metrics_timer: Every::new(Duration::from_secs(config.live_metrics_interval_secs), now),
            toast_timer,
            first_toast_shown: false,
        }
    }

    /// Run the main event loop. Returns when the user quits.
    pub async fn run(&mut self) -> Result<()> {
        // Terminal init
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        tracing::info!("dashboard started");

        // Main loop
        loop {
            self.state.viewport = terminal.draw(|frame| ui::render(frame, &self.state))?.area;

            self.drain_incident_events();

            if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key(key) {
                        break; // quit requested
                    }
                }
            }

            let now = Instant::now();
            self.tick_uptime(now);
            self.tick_ambient(now);
            self.tick_live_metrics(now);
            self.tick_toasts(now);
        }

        // Cleanup
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        tracing::info!("dashboard stopped");
        println!("\n{}\n", t!("app.stopped"));
        Ok(())
    }

    // ── Channel draining ─────────────────────────────────────────

    fn drain_incident_events(&mut self) {
        while let Ok(active) = self.incident_rx.try_recv() {
            self.state.show_active_incident(&active);
        }
    }

    // ── Periodic ticks ───────────────────────────────────────────

    fn tick_uptime(&mut self, now: Instant) {
        if self.uptime_timer.due(now) {
            self.state.tick_count = self.state.tick_count.wrapping_add(1);
            self.state.refresh_uptime(Utc::now());
        }
    }

    fn tick_ambient(&mut self, now: Instant) {
        if self.ambient_timer.due(now) {
            self.state.roll_ambient_message(&mut self.rng);
        }
    }

    fn tick_live_metrics(&mut self, now: Instant) {
        if self.metrics_timer.due(now) {
            self.state.refresh_live_metrics(&mut self.rng);
        }
    }

    fn tick_toasts(&mut self, now: Instant) {
        self.state.expire_toasts(now);
        let Some(timer) = self.toast_timer.as_mut() else {
            return;
        };
        if timer.due(now) {
            let force = !self.first_toast_shown;
            self.state.roll_toast(&mut self.rng, now, force);
            self.first_toast_shown = true;
        }
    }

    // ── Key handling ─────────────────────────────────────────────

    /// Returns `true` when the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C quits from any mode
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        // Command palette mode
        if self.state.show_command_palette {
            return self.handle_key_command_palette(key);
        }

        // Help overlay mode
        if self.state.show_help {
            return self.handle_key_help(key);
        }

        // Incident detail popup mode
        if self.state.show_incident_detail {
            return self.handle_key_detail_popup(key);
        }

        // Normal mode
        self.handle_key_normal(key)
    }

    fn handle_key_normal(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char(':') => self.state.open_palette(),
            KeyCode::Char('c') => self.state.toggle_chaos(&mut self.rng),
            KeyCode::Char('f') => {
                self.state.cycle_filter();
                self.state.set_status(format!(
                    "{} {}",
                    t!("status.filter_set"),
                    self.state.incident_filter.label()
                ));
            }
            KeyCode::Up | KeyCode::Char('k') => self.state.select_prev_incident(),
            KeyCode::Down | KeyCode::Char('j') => self.state.select_next_incident(),
            KeyCode::Enter => self.state.open_incident_detail(),
            KeyCode::Char('m') => self.state.toggle_terminal(),
            KeyCode::Char('d') => {
                if self.state.dismiss_banner() {
                    tracing::debug!("banner dismissed");
                }
            }
            KeyCode::Char('x') => {
                self.state.toasts.dismiss_oldest();
            }
            KeyCode::Char('?') => self.state.show_help = true,
            KeyCode::Char('T') => {
                self.state.cycle_theme();
                self.state
                    .set_status(format!("Theme: {}", self.state.theme.name));
            }
            KeyCode::Char('L') => {
                self.state.cycle_lang();
                self.state
                    .set_status(format!("Lang: {}", self.state.current_lang.to_uppercase()));
            }
            KeyCode::Esc => self.state.status_message = None,
            _ => {}
        }
        false
    }

    fn handle_key_command_palette(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => self.state.close_palette(),
            KeyCode::Enter => {
                self.state.submit_palette(&mut self.rng);
            }
            KeyCode::Backspace => {
                if self.state.command_input.is_empty() {
                    self.state.close_palette();
                } else {
                    self.state.palette_backspace();
                }
            }
            KeyCode::Left => self.state.palette_cursor_left(),
            KeyCode::Right => self.state.palette_cursor_right(),
            KeyCode::Char(c) => self.state.palette_input_char(c),
            _ => {}
        }
        false
    }

    fn handle_key_help(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                self.state.show_help = false;
            }
            _ => {}
        }
        false
    }

    fn handle_key_detail_popup(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.state.close_incident_detail(),
            KeyCode::Up | KeyCode::Char('k') => self.state.detail_scroll_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.state.detail_scroll_down(1),
            KeyCode::PageUp => self.state.detail_scroll_up(MODAL_PAGE_STEP),
            KeyCode::PageDown => self.state.detail_scroll_down(MODAL_PAGE_STEP),
            KeyCode::Home => self.state.detail_scroll = 0,
            _ => {}
        }
        false
    }
}
