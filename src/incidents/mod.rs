//! Incident list presentation logic: filtering and the text that goes on
//! cards and in the detail view. The ratatui side lives in
//! `ui::renderer::incidents`.

use chrono::{DateTime, Local, NaiveDate};

use crate::constants::{CARD_MAX_SKILLS, CARD_SUMMARY_LEN};
use crate::models::{Incident, IncidentStatus, Severity};

/// Which incident cards are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncidentFilter {
    All,
    Resolved,
    Severity(Severity),
}

impl IncidentFilter {
    /// Filters offered in the filter bar, in order.
    pub fn all() -> &'static [IncidentFilter] {
        &[
            IncidentFilter::All,
            IncidentFilter::Resolved,
            IncidentFilter::Severity(Severity::SEV1),
            IncidentFilter::Severity(Severity::SEV2),
        ]
    }

    pub fn matches(&self, incident: &Incident) -> bool {
        match self {
            IncidentFilter::All => true,
            IncidentFilter::Resolved => incident.status == IncidentStatus::Resolved,
            IncidentFilter::Severity(s) => incident.severity == *s,
        }
    }

    pub fn label(&self) -> String {
        match self {
            IncidentFilter::All => t!("filter.all").to_string(),
            IncidentFilter::Resolved => t!("filter.resolved").to_string(),
            IncidentFilter::Severity(s) => s.to_string(),
        }
    }

    pub fn next(&self) -> Self {
        let filters = Self::all();
        let idx = filters.iter().position(|f| f == self).unwrap_or(0);
        filters[(idx + 1) % filters.len()]
    }
}

/// Incidents passing `filter`, in feed order.
pub fn filter_incidents(incidents: &[Incident], filter: IncidentFilter) -> Vec<&Incident> {
    incidents.iter().filter(|i| filter.matches(i)).collect()
}

/// `Nov 15, 2024, 03:12 AM` in local time. Date-only inputs print without
/// a time; anything unparseable is shown verbatim.
pub fn format_date(date: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return dt
            .with_timezone(&Local)
            .format("%b %d, %Y, %I:%M %p")
            .to_string();
    }
    if let Ok(d) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return d.format("%b %d, %Y").to_string();
    }
    date.to_string()
}

/// Cut to `max_len` characters and append `...` when anything was cut.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_len).collect();
    format!("{}...", cut)
}

/// The card summary line.
pub fn card_summary(incident: &Incident) -> String {
    truncate_text(&incident.what_happened, CARD_SUMMARY_LEN)
}

/// First few skills plus a `+N` tag for the remainder.
pub fn card_skill_tags(skills: &[String]) -> Vec<String> {
    let mut tags: Vec<String> = skills.iter().take(CARD_MAX_SKILLS).cloned().collect();
    if skills.len() > CARD_MAX_SKILLS {
        tags.push(format!("+{}", skills.len() - CARD_MAX_SKILLS));
    }
    tags
}

/// `12345` → `12,345`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Split narrative text into display paragraphs, one per source line.
pub fn paragraphs(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n').collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IncidentMetrics;

    fn incident(title: &str, severity: Severity, status: IncidentStatus) -> Incident {
        Incident {
            title: title.to_string(),
            severity,
            status,
            date: "2024-10-08T14:00:00Z".to_string(),
            duration_minutes: 60,
            what_happened: String::new(),
            root_cause: String::new(),
            resolution: String::new(),
            prevention: String::new(),
            timeline: Vec::new(),
            artifacts: Vec::new(),
            before_after: None,
            skills_used: Vec::new(),
            metrics: None::<IncidentMetrics>,
            users_affected: None,
            revenue_impact_usd: None,
        }
    }

    fn sample() -> Vec<Incident> {
        vec![
            incident("SSL Apocalypse", Severity::SEV1, IncidentStatus::Resolved),
            incident("Terraform Heist", Severity::SEV2, IncidentStatus::Resolved),
            incident("Kubernetes OOM", Severity::SEV1, IncidentStatus::Open),
            incident("Supply Chain", Severity::SEV2, IncidentStatus::Open),
        ]
    }

    fn titles(list: Vec<&Incident>) -> Vec<&str> {
        list.into_iter().map(|i| i.title.as_str()).collect()
    }

    // ── filters ───────────────────────────────────────────────────

    #[test]
    fn filter_all_keeps_everything_in_order() {
        let incidents = sample();
        assert_eq!(
            titles(filter_incidents(&incidents, IncidentFilter::All)),
            vec!["SSL Apocalypse", "Terraform Heist", "Kubernetes OOM", "Supply Chain"]
        );
    }

    #[test]
    fn filter_resolved() {
        let incidents = sample();
        assert_eq!(
            titles(filter_incidents(&incidents, IncidentFilter::Resolved)),
            vec!["SSL Apocalypse", "Terraform Heist"]
        );
    }

    #[test]
    fn filter_by_severity() {
        let incidents = sample();
        assert_eq!(
            titles(filter_incidents(
                &incidents,
                IncidentFilter::Severity(Severity::SEV2)
            )),
            vec!["Terraform Heist", "Supply Chain"]
        );
        assert!(filter_incidents(&incidents, IncidentFilter::Severity(Severity::SEV3)).is_empty());
    }

    #[test]
    fn filter_cycle_wraps() {
        let mut f = IncidentFilter::All;
        for _ in 0..IncidentFilter::all().len() {
            f = f.next();
        }
        assert_eq!(f, IncidentFilter::All);
        assert_eq!(IncidentFilter::All.next(), IncidentFilter::Resolved);
    }

    // ── text helpers ──────────────────────────────────────────────

    #[test]
    fn truncate_text_short_unchanged() {
        assert_eq!(truncate_text("short", 150), "short");
        assert_eq!(truncate_text("", 150), "");
    }

    #[test]
    fn truncate_text_appends_ellipsis_after_limit() {
        assert_eq!(truncate_text("abcdefgh", 5), "abcde...");
    }

    #[test]
    fn truncate_text_counts_chars_not_bytes() {
        assert_eq!(truncate_text("ééééé", 5), "ééééé");
        assert_eq!(truncate_text("éééééé", 5), "ééééé...");
    }

    #[test]
    fn card_summary_caps_at_150() {
        let mut inc = incident("x", Severity::SEV1, IncidentStatus::Open);
        inc.what_happened = "a".repeat(200);
        let s = card_summary(&inc);
        assert_eq!(s.len(), 153);
        assert!(s.ends_with("..."));
    }

    #[test]
    fn skill_tags_collapse_overflow() {
        let skills: Vec<String> = ["k8s", "helm", "terraform", "vault", "aws"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(card_skill_tags(&skills), vec!["k8s", "helm", "terraform", "+2"]);
        assert_eq!(card_skill_tags(&skills[..3]), vec!["k8s", "helm", "terraform"]);
        assert!(card_skill_tags(&[]).is_empty());
    }

    #[test]
    fn thousands_separators() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1234567), "1,234,567");
    }

    #[test]
    fn format_date_variants() {
        assert_eq!(format_date("2024-11-15"), "Nov 15, 2024");
        assert_eq!(format_date("sometime"), "sometime");
        let formatted = format_date("2024-11-15T03:12:00Z");
        assert!(formatted.contains("2024"));
        assert!(formatted.ends_with("AM") || formatted.ends_with("PM"));
    }

    #[test]
    fn paragraphs_split_on_newlines() {
        assert_eq!(paragraphs("one\ntwo"), vec!["one", "two"]);
        assert!(paragraphs("").is_empty());
    }
}
