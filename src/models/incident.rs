use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Incident severity, `SEV-1` being the most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Severity(pub u8);

impl Severity {
    pub const SEV1: Severity = Severity(1);
    pub const SEV2: Severity = Severity(2);
    pub const SEV3: Severity = Severity(3);

    pub fn level(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SEV-{}", self.0)
    }
}

impl FromStr for Severity {
    type Err = String;

    /// Accepts `SEV-2`, `sev-2` and `SEV2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        let digits = upper
            .strip_prefix("SEV-")
            .or_else(|| upper.strip_prefix("SEV"))
            .ok_or_else(|| format!("not a severity: {:?}", s))?;
        match digits.parse::<u8>() {
            Ok(n) if n > 0 => Ok(Severity(n)),
            _ => Err(format!("not a severity: {:?}", s)),
        }
    }
}

impl TryFrom<String> for Severity {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Severity> for String {
    fn from(value: Severity) -> Self {
        value.to_string()
    }
}

/// Whether the incident has been closed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    Resolved,
    Open,
}

impl IncidentStatus {
    pub fn is_resolved(&self) -> bool {
        *self == IncidentStatus::Resolved
    }

    pub fn icon(&self) -> &'static str {
        match self {
            IncidentStatus::Resolved => "✅",
            IncidentStatus::Open => "⚠️",
        }
    }
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncidentStatus::Resolved => write!(f, "resolved"),
            IncidentStatus::Open => write!(f, "open"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub time: String,
    pub event: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub description: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BeforeAfter {
    #[serde(default)]
    pub before: Vec<String>,
    #[serde(default)]
    pub after: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IncidentMetrics {
    #[serde(default, deserialize_with = "super::number::optional_count")]
    pub mttr_minutes: Option<u64>,
    #[serde(default)]
    pub sla_breach: bool,
}

/// A single post-mortem record from the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub title: String,
    pub severity: Severity,
    pub status: IncidentStatus,
    /// ISO-8601 timestamp, kept verbatim for display fallback.
    pub date: String,
    #[serde(default, deserialize_with = "super::number::count")]
    pub duration_minutes: u64,
    #[serde(default)]
    pub what_happened: String,
    #[serde(default)]
    pub root_cause: String,
    #[serde(default)]
    pub resolution: String,
    #[serde(default)]
    pub prevention: String,
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
    #[serde(default)]
    pub before_after: Option<BeforeAfter>,
    #[serde(default)]
    pub skills_used: Vec<String>,
    #[serde(default)]
    pub metrics: Option<IncidentMetrics>,
    #[serde(default, deserialize_with = "super::number::optional_count")]
    pub users_affected: Option<u64>,
    #[serde(default, deserialize_with = "super::number::optional_count")]
    pub revenue_impact_usd: Option<u64>,
}

impl Incident {
    /// MTTR from the incident's own metrics, else its duration.
    pub fn mttr_minutes(&self) -> u64 {
        self.metrics
            .as_ref()
            .and_then(|m| m.mttr_minutes)
            .filter(|&m| m > 0)
            .unwrap_or(self.duration_minutes)
    }

    pub fn sla_breached(&self) -> bool {
        self.metrics.as_ref().map(|m| m.sla_breach).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_parses_common_forms() {
        assert_eq!("SEV-1".parse::<Severity>().unwrap(), Severity::SEV1);
        assert_eq!("sev-2".parse::<Severity>().unwrap(), Severity::SEV2);
        assert_eq!("SEV3".parse::<Severity>().unwrap(), Severity::SEV3);
    }

    #[test]
    fn severity_rejects_garbage() {
        assert!("P1".parse::<Severity>().is_err());
        assert!("SEV-0".parse::<Severity>().is_err());
        assert!("SEV-x".parse::<Severity>().is_err());
    }

    #[test]
    fn severity_display_round_trips_through_json() {
        let json = serde_json::to_string(&Severity::SEV2).unwrap();
        assert_eq!(json, "\"SEV-2\"");
        let back: Severity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Severity::SEV2);
    }

    #[test]
    fn severity_orders_by_level() {
        assert!(Severity::SEV1 < Severity::SEV2);
    }

    #[test]
    fn minimal_incident_deserializes_with_defaults() {
        let inc: Incident = serde_json::from_str(
            r#"{"title":"DB Failover","severity":"SEV-1","status":"resolved","date":"2024-08-17T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(inc.title, "DB Failover");
        assert!(inc.status.is_resolved());
        assert!(inc.timeline.is_empty());
        assert!(inc.before_after.is_none());
        assert_eq!(inc.mttr_minutes(), 0);
    }

    #[test]
    fn mttr_prefers_metrics_over_duration() {
        let mut inc: Incident = serde_json::from_str(
            r#"{"title":"t","severity":"SEV-2","status":"open","date":"d","duration_minutes":120}"#,
        )
        .unwrap();
        assert_eq!(inc.mttr_minutes(), 120);
        inc.metrics = Some(IncidentMetrics {
            mttr_minutes: Some(45),
            sla_breach: true,
        });
        assert_eq!(inc.mttr_minutes(), 45);
        assert!(inc.sla_breached());
    }

    #[test]
    fn unknown_status_is_rejected() {
        let res: Result<Incident, _> = serde_json::from_str(
            r#"{"title":"t","severity":"SEV-2","status":"mitigated","date":"d"}"#,
        );
        assert!(res.is_err());
    }
}
