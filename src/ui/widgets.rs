use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};
use unicode_width::UnicodeWidthStr;

use crate::ambient::BuildRecord;
use crate::chaos::ChaosState;

use super::theme::Theme;

/// A bar gauge with gradient coloring.
pub struct GradientGauge<'a> {
    pub percent: f32,
    pub label: String,
    pub value: String,
    pub theme: &'a Theme,
}

impl<'a> GradientGauge<'a> {
    pub fn new(percent: f32, label: &str, theme: &'a Theme) -> Self {
        let percent = percent.clamp(0.0, 100.0);
        Self {
            percent,
            label: label.to_string(),
            value: format!("{:>3.0}%", percent),
            theme,
        }
    }

    /// Replace the right-hand value text.
    pub fn value(mut self, value: String) -> Self {
        self.value = value;
        self
    }
}

impl Widget for GradientGauge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 1 {
            return;
        }

        let label_width = self.label.width() as u16 + 1;
        let value_width = self.value.width() as u16 + 1;
        let bar_width = area.width.saturating_sub(label_width + value_width);

        if bar_width < 2 {
            return;
        }

        let label_style = Style::default().fg(self.theme.text_dim);
        buf.set_string(area.x, area.y, &self.label, label_style);

        let bar_x = area.x + label_width;
        let exact = (self.percent / 100.0) * bar_width as f32;
        let filled = exact as u16;
        let color = self.theme.usage_color(self.percent);

        // ░ ▒ ▓ █
        for i in 0..bar_width {
            let (ch, style) = if i < filled {
                ('█', Style::default().fg(color))
            } else if i == filled {
                let frac = exact - filled as f32;
                let partial = if frac > 0.75 {
                    '▓'
                } else if frac > 0.4 {
                    '▒'
                } else {
                    '░'
                };
                (partial, Style::default().fg(color))
            } else {
                ('░', Style::default().fg(self.theme.gauge_bg))
            };
            buf.set_string(bar_x + i, area.y, ch.to_string(), style);
        }

        buf.set_string(
            bar_x + bar_width + 1,
            area.y,
            &self.value,
            Style::default().fg(color),
        );
    }
}

/// One column per build: height tracks duration, color tracks outcome.
pub struct BuildChart<'a> {
    pub builds: &'a [BuildRecord],
    pub theme: &'a Theme,
}

impl<'a> BuildChart<'a> {
    pub fn new(builds: &'a [BuildRecord], theme: &'a Theme) -> Self {
        Self { builds, theme }
    }
}

impl Widget for BuildChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width < 1 || self.builds.is_empty() {
            return;
        }

        let bar_chars = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
        let max = self.builds.iter().map(|b| b.duration_secs).max().unwrap_or(1).max(1);

        // Most recent builds win when the area is narrow.
        let shown = (area.width as usize).min(self.builds.len());
        let start = self.builds.len() - shown;

        for (i, build) in self.builds[start..].iter().enumerate() {
            let idx = ((build.duration_secs as f32 / max as f32) * 7.0).round() as usize;
            let ch = bar_chars[idx.min(7)];
            let color = if build.success {
                self.theme.success
            } else {
                self.theme.danger
            };
            buf.set_string(
                area.x + i as u16,
                area.y + area.height - 1,
                ch.to_string(),
                Style::default().fg(color),
            );
        }
    }
}

/// The stack badges, wrapped across as many rows as the area allows.
pub struct BadgeStrip<'a> {
    pub badges: &'a [String],
    pub chaos: &'a ChaosState,
    pub theme: &'a Theme,
}

impl<'a> BadgeStrip<'a> {
    pub fn new(badges: &'a [String], chaos: &'a ChaosState, theme: &'a Theme) -> Self {
        Self {
            badges,
            chaos,
            theme,
        }
    }
}

impl Widget for BadgeStrip<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width < 4 {
            return;
        }

        let mut x = area.x;
        let mut y = area.y;
        let right = area.x + area.width;

        for (i, name) in self.badges.iter().enumerate() {
            let text = format!("[{}]", name);
            let w = text.width() as u16;
            if x + w > right && x > area.x {
                x = area.x;
                y += 1;
            }
            if y >= area.y + area.height {
                break;
            }
            let style = self.theme.badge_style(self.chaos.is_badge_disabled(i));
            buf.set_stringn(x, y, &text, (right - x) as usize, style);
            x = x.saturating_add(w + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::TerminalFeed;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::style::Modifier;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn gauge_shows_label_and_value() {
        let theme = Theme::default_dark();
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);
        GradientGauge::new(50.0, "CPU", &theme).render(area, &mut buf);
        let row = row_text(&buf, 0);
        assert!(row.starts_with("CPU"));
        assert!(row.trim_end().ends_with("50%"));
    }

    #[test]
    fn gauge_skips_tiny_area() {
        let theme = Theme::default_dark();
        let area = Rect::new(0, 0, 3, 1);
        let mut buf = Buffer::empty(area);
        GradientGauge::new(50.0, "CPU", &theme).render(area, &mut buf);
        assert_eq!(row_text(&buf, 0), "   ");
    }

    #[test]
    fn badge_strip_marks_disabled_badges() {
        let theme = Theme::default_dark();
        let badges = vec!["AWS".to_string(), "Vault".to_string()];
        let mut chaos = ChaosState::new(2, 1.0);
        let mut feed = TerminalFeed::new(10);
        let mut rng = StdRng::seed_from_u64(0);
        chaos.toggle(&mut rng, &mut feed);

        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);
        BadgeStrip::new(&badges, &chaos, &theme).render(area, &mut buf);
        assert!(row_text(&buf, 0).starts_with("[AWS] [Vault]"));
        assert!(buf[(1, 0)].modifier.contains(Modifier::CROSSED_OUT));
    }

    #[test]
    fn badge_strip_wraps_to_next_row() {
        let theme = Theme::default_dark();
        let badges = vec!["Kubernetes".to_string(), "Terraform".to_string()];
        let chaos = ChaosState::new(2, 0.0);
        let area = Rect::new(0, 0, 14, 2);
        let mut buf = Buffer::empty(area);
        BadgeStrip::new(&badges, &chaos, &theme).render(area, &mut buf);
        assert!(row_text(&buf, 0).starts_with("[Kubernetes]"));
        assert!(row_text(&buf, 1).starts_with("[Terraform]"));
    }

    #[test]
    fn build_chart_colors_failures() {
        let theme = Theme::default_dark();
        let builds = vec![
            BuildRecord { build: 1, success: true, duration_secs: 300 },
            BuildRecord { build: 2, success: false, duration_secs: 600 },
        ];
        let area = Rect::new(0, 0, 4, 1);
        let mut buf = Buffer::empty(area);
        BuildChart::new(&builds, &theme).render(area, &mut buf);
        assert_eq!(buf[(1, 0)].symbol(), "█");
        assert_eq!(buf[(1, 0)].fg, theme.danger);
        assert_eq!(buf[(0, 0)].fg, theme.success);
    }
}
