//! Decorative, randomized dashboard effects.
//!
//! Everything here is display-only: values are drawn from fixed ranges and
//! never feed back into the command or chaos logic. Every generator takes
//! an explicit `Rng` so callers (and tests) control the seed.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::constants::*;

// ── Periodic timers ───────────────────────────────────────────────

/// A fixed-rate deadline checked from the event loop.
#[derive(Debug, Clone)]
pub struct Every {
    period: Duration,
    next: Instant,
}

impl Every {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self::starting_after(period, period, now)
    }

    /// First fire after `delay`, then every `period`.
    pub fn starting_after(delay: Duration, period: Duration, now: Instant) -> Self {
        Self {
            period,
            next: now + delay,
        }
    }

    /// True at most once per period. A late check does not queue up
    /// missed firings.
    pub fn due(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next = now + self.period;
        true
    }
}

// ── Metrics ───────────────────────────────────────────────────────

/// Values printed by the `metrics` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemMetrics {
    pub cpu_percent: u32,
    pub memory_percent: u32,
    pub disk_percent: u32,
    pub network_mbps: u32,
}

impl SystemMetrics {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            cpu_percent: rng.gen_range(METRICS_CPU_RANGE),
            memory_percent: rng.gen_range(METRICS_MEMORY_RANGE),
            disk_percent: rng.gen_range(METRICS_DISK_RANGE),
            network_mbps: rng.gen_range(METRICS_NETWORK_RANGE),
        }
    }
}

/// The jittering numbers in the "live" panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveMetrics {
    /// Requests per minute, in thousands.
    pub requests_k: f64,
    pub cpu_percent: u32,
    pub memory_percent: u32,
}

impl LiveMetrics {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            requests_k: rng.gen_range(LIVE_REQUESTS_RANGE),
            cpu_percent: rng.gen_range(LIVE_CPU_RANGE),
            memory_percent: rng.gen_range(LIVE_MEMORY_RANGE),
        }
    }

    pub fn requests_label(&self) -> String {
        format!("{:.1}K", self.requests_k)
    }
}

// ── Ambient terminal chatter ──────────────────────────────────────

pub const AMBIENT_MESSAGES: &[&str] = &[
    "INFO: Certificate renewed successfully",
    "INFO: Backup completed",
    "INFO: Health check passed",
    "INFO: Deployment successful",
    "INFO: Cache cleared",
];

/// Roll for an ambient message; most ticks stay quiet.
pub fn ambient_message<R: Rng + ?Sized>(rng: &mut R) -> Option<&'static str> {
    if !rng.gen_bool(AMBIENT_MESSAGE_PROBABILITY) {
        return None;
    }
    AMBIENT_MESSAGES.choose(rng).copied()
}

// ── Alert toasts ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Error,
    Warning,
    Info,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastTemplate {
    pub kind: ToastKind,
    pub icon: &'static str,
    pub title: &'static str,
    pub body: &'static str,
}

pub const TOAST_TEMPLATES: &[ToastTemplate] = &[
    ToastTemplate {
        kind: ToastKind::Error,
        icon: "🚨",
        title: "SSL CERTIFICATE ALERT",
        body: "SSL cert expires in 14 days - prod.sarra.dev",
    },
    ToastTemplate {
        kind: ToastKind::Info,
        icon: "📡",
        title: "AUTO-SCALING EVENT",
        body: "K8s HPA scaled api-gateway from 3→5 pods",
    },
    ToastTemplate {
        kind: ToastKind::Warning,
        icon: "⚠️",
        title: "MEMORY THRESHOLD",
        body: "prometheus container using 78% memory",
    },
    ToastTemplate {
        kind: ToastKind::Error,
        icon: "🔥",
        title: "HIGH TRAFFIC ALERT",
        body: "Request rate: 2.4K/min (↑120%)",
    },
    ToastTemplate {
        kind: ToastKind::Success,
        icon: "✅",
        title: "BACKUP COMPLETE",
        body: "Velero snapshot completed - RTO: 15min",
    },
    ToastTemplate {
        kind: ToastKind::Warning,
        icon: "⏰",
        title: "SCHEDULED MAINTENANCE",
        body: "Rolling update scheduled in 2hr",
    },
    ToastTemplate {
        kind: ToastKind::Success,
        icon: "🔒",
        title: "SECURITY SCAN",
        body: "Trivy found 0 vulnerabilities in latest build",
    },
    ToastTemplate {
        kind: ToastKind::Warning,
        icon: "💾",
        title: "DISK SPACE WARNING",
        body: "Volume /var/lib/docker at 82% capacity",
    },
];

#[derive(Debug, Clone)]
pub struct Toast {
    pub template: &'static ToastTemplate,
    pub shown_at: Instant,
}

/// On-screen toasts, oldest first, at most `max_visible`.
#[derive(Debug)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    max_visible: usize,
    lifetime: Duration,
}

impl ToastQueue {
    pub fn new(max_visible: usize, lifetime: Duration) -> Self {
        Self {
            toasts: VecDeque::with_capacity(max_visible),
            max_visible,
            lifetime,
        }
    }

    /// Show a random toast unless the queue is full.
    pub fn show_random<R: Rng + ?Sized>(&mut self, rng: &mut R, now: Instant) -> bool {
        if self.toasts.len() >= self.max_visible {
            return false;
        }
        let Some(template) = TOAST_TEMPLATES.choose(rng) else {
            return false;
        };
        tracing::debug!(title = template.title, "toast shown");
        self.toasts.push_back(Toast {
            template,
            shown_at: now,
        });
        true
    }

    /// Drop toasts older than the lifetime.
    pub fn expire(&mut self, now: Instant) {
        let lifetime = self.lifetime;
        self.toasts
            .retain(|t| now.saturating_duration_since(t.shown_at) < lifetime);
    }

    pub fn dismiss_oldest(&mut self) -> bool {
        self.toasts.pop_front().is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

// ── Uptime ────────────────────────────────────────────────────────

/// `{d}d {h}h {m}m` since [`UPTIME_EPOCH`].
pub fn uptime_text(now: DateTime<Utc>) -> String {
    let epoch = DateTime::parse_from_rfc3339(UPTIME_EPOCH)
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or(now);
    let diff = now.signed_duration_since(epoch);
    let total_minutes = diff.num_minutes().max(0);
    let days = total_minutes / (60 * 24);
    let hours = (total_minutes % (60 * 24)) / 60;
    let minutes = total_minutes % 60;
    format!("{}d {}h {}m", days, hours, minutes)
}

// ── Mock chart data ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildRecord {
    pub build: u32,
    pub success: bool,
    pub duration_secs: u32,
}

/// Fifty builds, mostly green.
pub fn build_history<R: Rng + ?Sized>(rng: &mut R) -> Vec<BuildRecord> {
    (0..BUILD_HISTORY_LEN as u32)
        .map(|i| BuildRecord {
            build: i + 1,
            success: rng.gen_bool(BUILD_SUCCESS_PROBABILITY),
            duration_secs: rng.gen_range(BUILD_DURATION_RANGE),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStage {
    pub name: &'static str,
    pub duration: &'static str,
}

pub const PIPELINE_STAGES: &[PipelineStage] = &[
    PipelineStage { name: "Source", duration: "12s" },
    PipelineStage { name: "Build", duration: "3m 45s" },
    PipelineStage { name: "Test", duration: "2m 18s" },
    PipelineStage { name: "Deploy", duration: "1m 32s" },
    PipelineStage { name: "Monitor", duration: "5s" },
];
