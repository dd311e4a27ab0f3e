use serde::Deserialize;

use crate::constants::*;

/// Application configuration with sensible defaults.
///
/// Can be overridden via ~/.config/incident-command/config.toml
#[derive(Debug, Clone)]
pub struct Config {
    /// Feed document: path on disk or http(s) URL
    pub feed_source: String,
    /// Active-incident document: path on disk or http(s) URL
    pub active_incident_source: String,
    /// Theme name (built-in or custom)
    pub theme: String,
    /// UI language (en, es)
    pub lang: String,
    /// Terminal feed capacity
    pub terminal_capacity: usize,
    /// Chance that chaos mode disables each badge
    pub chaos_badge_probability: f64,
    /// Badges shown on the dashboard (chaos targets)
    pub badges: Vec<String>,
    /// Ambient terminal message interval in seconds
    pub ambient_message_interval_secs: u64,
    /// Live metrics jitter interval in seconds
    pub live_metrics_interval_secs: u64,
    /// Alert toast roll interval in seconds (0 = no toasts)
    pub toast_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_source: DEFAULT_FEED_SOURCE.to_string(),
            active_incident_source: DEFAULT_ACTIVE_INCIDENT_SOURCE.to_string(),
            theme: "default".to_string(),
            lang: "en".to_string(),
            terminal_capacity: TERMINAL_CAPACITY,
            chaos_badge_probability: DEFAULT_CHAOS_BADGE_PROBABILITY,
            badges: DEFAULT_BADGES.iter().map(|b| b.to_string()).collect(),
            ambient_message_interval_secs: DEFAULT_AMBIENT_MESSAGE_SECS,
            live_metrics_interval_secs: DEFAULT_LIVE_METRICS_SECS,
            toast_interval_secs: DEFAULT_TOAST_INTERVAL_SECS,
        }
    }
}

/// TOML-deserializable config file format.
/// All fields are optional; missing fields use defaults.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct FileConfig {
    feed_source: Option<String>,
    active_incident_source: Option<String>,
    theme: Option<String>,
    lang: Option<String>,
    terminal_capacity: Option<usize>,
    chaos_badge_probability: Option<f64>,
    badges: Option<Vec<String>>,
    ambient_message_interval_secs: Option<u64>,
    live_metrics_interval_secs: Option<u64>,
    toast_interval_secs: Option<u64>,
}

impl Config {
    /// Load config from ~/.config/incident-command/config.toml, falling back
    /// to defaults for any missing fields. If the file doesn't exist, returns
    /// pure defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        let content = match std::fs::read_to_string(&config_path) {
            Ok(c) => c,
            Err(_) => return Config::default(), // No config file, use defaults
        };

        match Self::from_toml_str(&content) {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "Warning: Failed to parse {}: {}. Using defaults.",
                    config_path.display(),
                    e
                );
                Config::default()
            }
        }
    }

    /// Merge a TOML document over the defaults, clamping out-of-range values.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let file_config: FileConfig = toml::from_str(content)?;
        let mut config = Config::default();

        if let Some(v) = file_config.feed_source {
            if !v.is_empty() {
                config.feed_source = v;
            }
        }
        if let Some(v) = file_config.active_incident_source {
            if !v.is_empty() {
                config.active_incident_source = v;
            }
        }
        if let Some(v) = file_config.theme {
            if !v.is_empty() {
                config.theme = v;
            }
        }
        if let Some(v) = file_config.lang {
            if !v.is_empty() {
                config.lang = v;
            }
        }
        if let Some(v) = file_config.terminal_capacity {
            config.terminal_capacity = v.clamp(MIN_TERMINAL_CAPACITY, MAX_TERMINAL_CAPACITY);
        }
        if let Some(v) = file_config.chaos_badge_probability {
            config.chaos_badge_probability = if v.is_finite() {
                v.clamp(0.0, 1.0)
            } else {
                DEFAULT_CHAOS_BADGE_PROBABILITY
            };
        }
        if let Some(v) = file_config.badges {
            if !v.is_empty() {
                config.badges = v;
            }
        }
        if let Some(v) = file_config.ambient_message_interval_secs {
            config.ambient_message_interval_secs = v.max(1);
        }
        if let Some(v) = file_config.live_metrics_interval_secs {
            config.live_metrics_interval_secs = v.max(1);
        }
        if let Some(v) = file_config.toast_interval_secs {
            config.toast_interval_secs = v; // 0 = disabled
        }

        Ok(config)
    }
}
