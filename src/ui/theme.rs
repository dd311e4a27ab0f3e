use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use crate::ambient::ToastKind;
use crate::constants::*;
use crate::models::Severity;
use crate::terminal::MessageSeverity;

/// All available built-in theme names.
pub const BUILTIN_THEME_NAMES: &[&str] = &["default", "gruvbox", "nord"];

/// Data-driven theme: every color in one struct.
/// Constructed from built-in presets or loaded from TOML files.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // ── Brand / Primary ──────────────────────────────────────
    pub accent: Color,
    pub accent_secondary: Color,
    pub bg_dark: Color,
    pub bg_panel: Color,

    // ── Text ─────────────────────────────────────────────────
    pub text_primary: Color,
    pub text_dim: Color,
    pub text_muted: Color,

    // ── Semantic ─────────────────────────────────────────────
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub critical: Color,
    pub info: Color,

    // ── Gauges ───────────────────────────────────────────────
    pub gauge_low: Color,
    pub gauge_mid: Color,
    pub gauge_high: Color,
    pub gauge_critical: Color,
    pub gauge_bg: Color,

    // ── Selection ────────────────────────────────────────────
    pub selected_bg: Color,

    // ── Borders ──────────────────────────────────────────────
    pub border: Color,

    // ── Chaos button / terminal prompt ───────────────────────
    pub chaos: Color,
    pub prompt: Color,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────

    /// Default dark theme.
    pub fn default_dark() -> Self {
        Self {
            name: "default".to_string(),
            accent: Color::Rgb(99, 179, 237),
            accent_secondary: Color::Rgb(129, 230, 217),
            bg_dark: Color::Rgb(22, 22, 30),
            bg_panel: Color::Rgb(30, 30, 42),
            text_primary: Color::Rgb(220, 220, 235),
            text_dim: Color::Rgb(120, 120, 145),
            text_muted: Color::Rgb(80, 80, 100),
            success: Color::Rgb(72, 199, 142),
            warning: Color::Rgb(255, 193, 69),
            danger: Color::Rgb(255, 85, 85),
            critical: Color::Rgb(255, 136, 0),
            info: Color::Rgb(99, 179, 237),
            gauge_low: Color::Rgb(72, 199, 142),
            gauge_mid: Color::Rgb(255, 193, 69),
            gauge_high: Color::Rgb(255, 136, 0),
            gauge_critical: Color::Rgb(255, 85, 85),
            gauge_bg: Color::Rgb(45, 45, 58),
            selected_bg: Color::Rgb(40, 40, 60),
            border: Color::Rgb(55, 55, 75),
            chaos: Color::Rgb(217, 143, 255),
            prompt: Color::Rgb(0, 255, 136),
        }
    }

    /// Gruvbox dark palette.
    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            accent: Color::Rgb(215, 153, 33),            // yellow
            accent_secondary: Color::Rgb(142, 192, 124), // green
            bg_dark: Color::Rgb(40, 40, 40),             // bg0
            bg_panel: Color::Rgb(50, 48, 47),            // bg0_s
            text_primary: Color::Rgb(235, 219, 178),     // fg
            text_dim: Color::Rgb(168, 153, 132),         // fg4
            text_muted: Color::Rgb(102, 92, 84),         // bg4
            success: Color::Rgb(142, 192, 124),
            warning: Color::Rgb(250, 189, 47),
            danger: Color::Rgb(251, 73, 52),
            critical: Color::Rgb(254, 128, 25), // orange
            info: Color::Rgb(131, 165, 152),    // blue
            gauge_low: Color::Rgb(142, 192, 124),
            gauge_mid: Color::Rgb(250, 189, 47),
            gauge_high: Color::Rgb(254, 128, 25),
            gauge_critical: Color::Rgb(251, 73, 52),
            gauge_bg: Color::Rgb(60, 56, 54),
            selected_bg: Color::Rgb(60, 56, 54),
            border: Color::Rgb(80, 73, 69),
            chaos: Color::Rgb(211, 134, 155), // purple
            prompt: Color::Rgb(184, 187, 38),
        }
    }

    /// Nord palette.
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            accent: Color::Rgb(136, 192, 208),           // nord8 frost
            accent_secondary: Color::Rgb(143, 188, 187), // nord7
            bg_dark: Color::Rgb(46, 52, 64),             // nord0
            bg_panel: Color::Rgb(59, 66, 82),            // nord1
            text_primary: Color::Rgb(229, 233, 240),     // nord5
            text_dim: Color::Rgb(182, 191, 204),
            text_muted: Color::Rgb(107, 112, 127),
            success: Color::Rgb(163, 190, 140), // nord14
            warning: Color::Rgb(235, 203, 139), // nord13
            danger: Color::Rgb(191, 97, 106),   // nord11
            critical: Color::Rgb(208, 135, 112), // nord12
            info: Color::Rgb(129, 161, 193),    // nord9
            gauge_low: Color::Rgb(163, 190, 140),
            gauge_mid: Color::Rgb(235, 203, 139),
            gauge_high: Color::Rgb(208, 135, 112),
            gauge_critical: Color::Rgb(191, 97, 106),
            gauge_bg: Color::Rgb(67, 76, 94), // nord2
            selected_bg: Color::Rgb(67, 76, 94),
            border: Color::Rgb(76, 86, 106),  // nord3
            chaos: Color::Rgb(180, 142, 173), // nord15
            prompt: Color::Rgb(163, 190, 140),
        }
    }

    // ── Lookup ───────────────────────────────────────────────

    /// Look up a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::default_dark()),
            "gruvbox" => Some(Self::gruvbox()),
            "nord" => Some(Self::nord()),
            _ => None,
        }
    }

    /// Built-in theme, then `~/.config/incident-command/themes/<name>.toml`,
    /// then the default.
    pub fn resolve(name: &str) -> Self {
        Self::by_name(name)
            .or_else(|| Self::from_toml_file(&custom_theme_path(name)))
            .unwrap_or_else(|| {
                tracing::warn!(theme = name, "unknown theme, using default");
                Self::default_dark()
            })
    }

    /// Cycle to the next built-in theme.
    pub fn next_builtin(&self) -> Self {
        let idx = BUILTIN_THEME_NAMES
            .iter()
            .position(|&n| n == self.name)
            .unwrap_or(0);
        let next_idx = (idx + 1) % BUILTIN_THEME_NAMES.len();
        Self::by_name(BUILTIN_THEME_NAMES[next_idx]).unwrap_or_default()
    }

    /// Load a custom theme from a TOML file, falling back to default for missing fields.
    pub fn from_toml_file(path: &std::path::Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        let file: ThemeFile = toml::from_str(&content).ok()?;
        Some(
            file.into_theme(
                path.file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("custom"),
            ),
        )
    }

    // ── Computed Styles ──────────────────────────────────────

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.accent_secondary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn filter_active_style(&self) -> Style {
        Style::default()
            .fg(self.bg_dark)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn filter_inactive_style(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    /// Terminal feed line color.
    pub fn message_style(&self, severity: MessageSeverity) -> Style {
        let color = match severity {
            MessageSeverity::Info => self.info,
            MessageSeverity::Success => self.success,
            MessageSeverity::Warning => self.warning,
            MessageSeverity::Danger => self.danger,
        };
        Style::default().fg(color)
    }

    /// SEV badge on incident cards and in the modal.
    pub fn severity_badge_style(&self, severity: Severity) -> Style {
        let (fg, bg) = match severity.level() {
            1 => (Color::White, self.danger),
            2 => (self.bg_dark, self.critical),
            3 => (self.bg_dark, self.warning),
            _ => (self.bg_dark, self.info),
        };
        Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD)
    }

    pub fn toast_color(&self, kind: ToastKind) -> Color {
        match kind {
            ToastKind::Error => self.danger,
            ToastKind::Warning => self.warning,
            ToastKind::Info => self.info,
            ToastKind::Success => self.success,
        }
    }

    /// Stack badge; chaos-disabled badges are dimmed and struck through.
    pub fn badge_style(&self, disabled: bool) -> Style {
        if disabled {
            Style::default()
                .fg(self.text_muted)
                .add_modifier(Modifier::CROSSED_OUT | Modifier::DIM)
        } else {
            Style::default().fg(self.accent_secondary)
        }
    }

    /// Returns a color for a usage percentage gauge.
    pub fn usage_color(&self, percent: f32) -> Color {
        if percent >= USAGE_CRITICAL_PCT {
            self.gauge_critical
        } else if percent >= USAGE_HIGH_PCT {
            self.gauge_high
        } else if percent >= USAGE_MID_PCT {
            self.gauge_mid
        } else {
            self.gauge_low
        }
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn border_highlight_style(&self) -> Style {
        Style::default().fg(self.accent)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_dark()
    }
}

// ── TOML deserialization for custom themes ──────────────────

/// Intermediate struct for parsing theme TOML files.
/// All fields are optional; missing fields inherit from the default theme.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ThemeFile {
    accent: Option<String>,
    accent_secondary: Option<String>,
    bg_dark: Option<String>,
    bg_panel: Option<String>,
    text_primary: Option<String>,
    text_dim: Option<String>,
    text_muted: Option<String>,
    success: Option<String>,
    warning: Option<String>,
    danger: Option<String>,
    critical: Option<String>,
    info: Option<String>,
    gauge_low: Option<String>,
    gauge_mid: Option<String>,
    gauge_high: Option<String>,
    gauge_critical: Option<String>,
    gauge_bg: Option<String>,
    selected_bg: Option<String>,
    border: Option<String>,
    chaos: Option<String>,
    prompt: Option<String>,
}

impl ThemeFile {
    fn into_theme(self, name: &str) -> Theme {
        let base = Theme::default_dark();
        Theme {
            name: name.to_string(),
            accent: parse_color(&self.accent).unwrap_or(base.accent),
            accent_secondary: parse_color(&self.accent_secondary).unwrap_or(base.accent_secondary),
            bg_dark: parse_color(&self.bg_dark).unwrap_or(base.bg_dark),
            bg_panel: parse_color(&self.bg_panel).unwrap_or(base.bg_panel),
            text_primary: parse_color(&self.text_primary).unwrap_or(base.text_primary),
            text_dim: parse_color(&self.text_dim).unwrap_or(base.text_dim),
            text_muted: parse_color(&self.text_muted).unwrap_or(base.text_muted),
            success: parse_color(&self.success).unwrap_or(base.success),
            warning: parse_color(&self.warning).unwrap_or(base.warning),
            danger: parse_color(&self.danger).unwrap_or(base.danger),
            critical: parse_color(&self.critical).unwrap_or(base.critical),
            info: parse_color(&self.info).unwrap_or(base.info),
            gauge_low: parse_color(&self.gauge_low).unwrap_or(base.gauge_low),
            gauge_mid: parse_color(&self.gauge_mid).unwrap_or(base.gauge_mid),
            gauge_high: parse_color(&self.gauge_high).unwrap_or(base.gauge_high),
            gauge_critical: parse_color(&self.gauge_critical).unwrap_or(base.gauge_critical),
            gauge_bg: parse_color(&self.gauge_bg).unwrap_or(base.gauge_bg),
            selected_bg: parse_color(&self.selected_bg).unwrap_or(base.selected_bg),
            border: parse_color(&self.border).unwrap_or(base.border),
            chaos: parse_color(&self.chaos).unwrap_or(base.chaos),
            prompt: parse_color(&self.prompt).unwrap_or(base.prompt),
        }
    }
}

/// Parse a hex color string like "#FF8800" or "FF8800" into a ratatui Color.
fn parse_color(opt: &Option<String>) -> Option<Color> {
    let s = opt.as_ref()?;
    let hex = s.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
