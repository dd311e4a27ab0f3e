//! # Incident Command - Terminal Incident Portfolio
//!
//! A live dashboard of past production incidents: hero stats, counter
//! cards, incident cards with a detail view, a terminal feed driven by a
//! command palette, alert toasts and a chaos mode.

#[macro_use]
extern crate rust_i18n;

// Load locale files from `locales/` directory, default to English
i18n!("locales", fallback = "en");

mod ambient;
mod app;
mod chaos;
mod commands;
mod config;
pub mod constants;
mod error;
mod incidents;
mod loader;
mod models;
mod terminal;
mod ui;

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use config::Config;
use constants::{default_log_path, LOG_ENV_VAR};

/// Incident Command - terminal incident portfolio dashboard
#[derive(Parser, Debug)]
#[command(
    name = "incident-command",
    version,
    about = "A terminal dashboard for an incident-response portfolio"
)]
struct Cli {
    /// Feed document (path or http(s) URL)
    #[arg(long, value_name = "SOURCE")]
    feed: Option<String>,

    /// Active-incident document (path or http(s) URL)
    #[arg(long, value_name = "SOURCE")]
    active_incident: Option<String>,

    /// Color theme (default, gruvbox, nord, or a custom theme name)
    #[arg(long, short = 't')]
    theme: Option<String>,

    /// UI language (en, es)
    #[arg(long, short = 'l', value_name = "LANG")]
    lang: Option<String>,

    /// Seed the random effects for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Log file (the screen belongs to the dashboard)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// Route tracing output to a file. Logging is best-effort: if the file
/// cannot be opened, events are discarded.
fn init_logging(path: PathBuf) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        Err(_) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::sink)
                .try_init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.clone().unwrap_or_else(default_log_path));

    // Load and apply CLI overrides to config
    let mut config = Config::load();
    if let Some(ref feed) = cli.feed {
        config.feed_source = feed.clone();
    }
    if let Some(ref source) = cli.active_incident {
        config.active_incident_source = source.clone();
    }
    if let Some(ref theme_name) = cli.theme {
        config.theme = theme_name.clone();
    }
    if let Some(ref lang) = cli.lang {
        config.lang = lang.clone();
    }

    // Set UI language (CLI > config > default "en")
    rust_i18n::set_locale(&config.lang);

    tracing::info!(
        feed = %config.feed_source,
        active_incident = %config.active_incident_source,
        theme = %config.theme,
        "starting"
    );

    // Build and run the application
    let mut app = app::App::new(&config, cli.seed).await?;
    app.run().await
}
