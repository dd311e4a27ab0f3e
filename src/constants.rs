//! Application-wide constants.
//!
//! Centralizes the timings, capacities, ranges and defaults used by the
//! dashboard, the command palette and the ambient effects.

use std::path::PathBuf;

// ── Timing ────────────────────────────────────────────────────────
/// Event poll timeout (ms) -- how often the UI checks for input.
pub const EVENT_POLL_MS: u64 = 50;
/// Uptime counter refresh interval (seconds).
pub const UPTIME_REFRESH_SECS: u64 = 1;
/// Default ambient terminal message interval (seconds).
pub const DEFAULT_AMBIENT_MESSAGE_SECS: u64 = 10;
/// Default live metrics jitter interval (seconds).
pub const DEFAULT_LIVE_METRICS_SECS: u64 = 3;
/// Default alert toast roll interval (seconds).
pub const DEFAULT_TOAST_INTERVAL_SECS: u64 = 7;
/// Delay before the first alert toast (seconds).
pub const FIRST_TOAST_DELAY_SECS: u64 = 2;
/// How long a toast stays on screen (seconds).
pub const TOAST_LIFETIME_SECS: u64 = 8;
/// Status message display duration (seconds).
pub const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 5;
/// Timeout for fetching a feed document over HTTP (seconds).
pub const FETCH_TIMEOUT_SECS: u64 = 5;

// ── Capacities ────────────────────────────────────────────────────
/// Terminal feed capacity (oldest entries evicted first).
pub const TERMINAL_CAPACITY: usize = 50;
/// Minimum terminal capacity accepted from the config file.
pub const MIN_TERMINAL_CAPACITY: usize = 10;
/// Maximum terminal capacity accepted from the config file.
pub const MAX_TERMINAL_CAPACITY: usize = 1000;
/// Maximum alert toasts visible at once.
pub const MAX_VISIBLE_TOASTS: usize = 3;
/// Incident summary length on a card (characters).
pub const CARD_SUMMARY_LEN: usize = 150;
/// Skill tags shown on a card before collapsing into "+N".
pub const CARD_MAX_SKILLS: usize = 3;
/// Builds in the mock build history.
pub const BUILD_HISTORY_LEN: usize = 50;

// ── Probabilities ─────────────────────────────────────────────────
/// Chance that chaos mode disables a given badge on activation.
pub const DEFAULT_CHAOS_BADGE_PROBABILITY: f64 = 0.3;
/// Chance that an ambient tick emits a terminal message.
pub const AMBIENT_MESSAGE_PROBABILITY: f64 = 0.3;
/// Chance that a toast tick shows a new toast.
pub const TOAST_PROBABILITY: f64 = 0.5;
/// Chance that a mock build succeeded.
pub const BUILD_SUCCESS_PROBABILITY: f64 = 0.9;

// ── Ranges (half-open) ────────────────────────────────────────────
/// Chaos alert counter range.
pub const CHAOS_ALERT_RANGE: std::ops::Range<u32> = 5..15;
/// `metrics` command: CPU percent.
pub const METRICS_CPU_RANGE: std::ops::Range<u32> = 20..50;
/// `metrics` command: memory percent.
pub const METRICS_MEMORY_RANGE: std::ops::Range<u32> = 30..70;
/// `metrics` command: disk percent.
pub const METRICS_DISK_RANGE: std::ops::Range<u32> = 20..70;
/// `metrics` command: network throughput (Mbps).
pub const METRICS_NETWORK_RANGE: std::ops::Range<u32> = 50..150;
/// Live panel: requests per minute (thousands).
pub const LIVE_REQUESTS_RANGE: std::ops::Range<f64> = 0.8..2.8;
/// Live panel: CPU percent.
pub const LIVE_CPU_RANGE: std::ops::Range<u32> = 15..45;
/// Live panel: memory percent.
pub const LIVE_MEMORY_RANGE: std::ops::Range<u32> = 60..80;
/// Mock build duration (seconds).
pub const BUILD_DURATION_RANGE: std::ops::Range<u32> = 300..600;

// ── Status indicator ──────────────────────────────────────────────
/// Status label while nominal.
pub const STATUS_LABEL_NOMINAL: &str = "ALL SYSTEMS NOMINAL";
/// Status label while chaos mode is on.
pub const STATUS_LABEL_CHAOS: &str = "CHAOS MODE ACTIVE";

// ── Active incident banner ────────────────────────────────────────
/// Banner title when the document carries none.
pub const DEFAULT_BANNER_TITLE: &str = "LEARNING INCIDENT IN PROGRESS";
/// Banner severity when the document carries none.
pub const DEFAULT_BANNER_SEVERITY: &str = "SEV-1";

// ── Uptime ────────────────────────────────────────────────────────
/// The uptime counter counts from this instant (RFC 3339).
pub const UPTIME_EPOCH: &str = "2024-01-01T00:00:00Z";

// ── Dashboard cards ───────────────────────────────────────────────
pub const CARD_VULNS_FIXED: u64 = 47;
pub const CARD_BUILDS_FIXED: u64 = 23;
pub const CARD_CHAOS_DAYS: u64 = 127;
pub const CARD_ROLLBACKS: u64 = 3;
pub const CARD_ALERTS_SILENCED: u64 = 12;
/// Deploy split shown on the deploy card.
pub const DEPLOYS_SUCCESSFUL: u32 = 47;
pub const DEPLOYS_ROLLED_BACK: u32 = 3;

/// Badges shown on the dashboard when the config names none.
pub const DEFAULT_BADGES: &[&str] = &[
    "Kubernetes",
    "Terraform",
    "AWS",
    "Docker",
    "Prometheus",
    "Grafana",
    "ArgoCD",
    "Vault",
    "GitHub Actions",
    "Trivy",
];

// ── Feed locations ────────────────────────────────────────────────
/// Default feed document location.
pub const DEFAULT_FEED_SOURCE: &str = "./data/feed.json";
/// Default active-incident document location.
pub const DEFAULT_ACTIVE_INCIDENT_SOURCE: &str = "./data/active-incident.json";

// ── Logging ───────────────────────────────────────────────────────
/// Env var holding the tracing filter directive.
pub const LOG_ENV_VAR: &str = "INCIDENT_COMMAND_LOG";

// ── Gauge Thresholds (percent) ────────────────────────────────────
pub const USAGE_MID_PCT: f32 = 40.0;
pub const USAGE_HIGH_PCT: f32 = 70.0;
pub const USAGE_CRITICAL_PCT: f32 = 90.0;

// ── Popup Dimensions ──────────────────────────────────────────────
/// Incident modal max width.
pub const MODAL_WIDTH: u16 = 90;
/// Incident modal max height.
pub const MODAL_HEIGHT: u16 = 40;
/// Help overlay width.
pub const HELP_POPUP_WIDTH: u16 = 58;
/// Help overlay height.
pub const HELP_POPUP_HEIGHT: u16 = 24;
/// Toast width.
pub const TOAST_WIDTH: u16 = 46;
/// Scroll step for PageUp/PageDown in the modal.
pub const MODAL_PAGE_STEP: usize = 10;

// ── Supported Languages ───────────────────────────────────────────
/// Available UI languages for cycling.
pub const LANGUAGES: &[&str] = &["en", "es"];

// ── Paths ─────────────────────────────────────────────────────────

/// Returns the user's home directory, falling back to /tmp.
pub fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string()))
}

/// Returns `~/.config/incident-command/`.
pub fn config_dir() -> PathBuf {
    home_dir().join(".config").join("incident-command")
}

/// Returns `~/.config/incident-command/config.toml`.
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns `~/.config/incident-command/themes/<name>.toml`.
pub fn custom_theme_path(name: &str) -> PathBuf {
    config_dir().join("themes").join(format!("{}.toml", name))
}

/// Returns `~/.local/share/incident-command/`.
pub fn data_dir() -> PathBuf {
    home_dir().join(".local").join("share").join("incident-command")
}

/// Returns the default log file path.
pub fn default_log_path() -> PathBuf {
    data_dir().join("incident-command.log")
}
