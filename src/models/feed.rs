use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use super::incident::Incident;

/// Aggregate counters shown in the hero strip and by the `incidents` command.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedMetrics {
    #[serde(deserialize_with = "super::number::count")]
    pub total_incidents: u64,
    #[serde(deserialize_with = "super::number::count")]
    pub resolved_incidents: u64,
    #[serde(deserialize_with = "super::number::count")]
    pub avg_mttr_minutes: u64,
    #[serde(deserialize_with = "super::number::count")]
    pub total_users_affected: u64,
    #[serde(deserialize_with = "super::number::count")]
    pub total_revenue_impact_usd: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillStats {
    #[serde(deserialize_with = "super::number::count")]
    pub total_skills: u64,
    #[serde(deserialize_with = "super::number::count")]
    pub expert_skills: u64,
    #[serde(deserialize_with = "super::number::count")]
    pub recently_proven: u64,
}

/// A skill and the last time an incident proved it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub icon: String,
    /// RFC 3339 timestamp, or null when never exercised.
    #[serde(default)]
    pub last_proven: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
}

impl Skill {
    /// `last_proven` rendered in local time, or `Never` when absent/unparseable.
    pub fn last_proven_display(&self) -> String {
        self.last_proven
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| {
                dt.with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            })
            .unwrap_or_else(|| "Never".to_string())
    }
}

/// The whole feed document. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedData {
    pub generated_at: Option<String>,
    pub version: Option<String>,
    pub incidents: Vec<Incident>,
    pub skills: Vec<Skill>,
    pub metrics: FeedMetrics,
    pub skill_stats: SkillStats,
}

impl FeedData {
    /// The stand-in document used whenever the real feed can't be loaded.
    pub fn mock(now: DateTime<Utc>) -> Self {
        Self {
            generated_at: Some(now.to_rfc3339()),
            version: Some("1.0.0".to_string()),
            incidents: Vec::new(),
            skills: Vec::new(),
            metrics: FeedMetrics {
                total_incidents: 5,
                resolved_incidents: 5,
                avg_mttr_minutes: 89,
                total_users_affected: 0,
                total_revenue_impact_usd: 0,
            },
            skill_stats: SkillStats {
                total_skills: 5,
                expert_skills: 5,
                recently_proven: 5,
            },
        }
    }
}

/// Optional "incident in progress" document driving the banner.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ActiveIncident {
    pub active: bool,
    pub title: Option<String>,
    pub severity: Option<String>,
}
