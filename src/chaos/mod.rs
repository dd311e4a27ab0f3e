//! Chaos Monkey mode.
//!
//! Two states, flipped by [`ChaosState::toggle`]. Activation draws a fresh
//! random subset of badges to disable and a random alert count.
//! Deactivation is a fixed reset to the nominal look; it does not replay
//! or invert the activation's draws.

use rand::Rng;

use crate::constants::{CHAOS_ALERT_RANGE, STATUS_LABEL_CHAOS, STATUS_LABEL_NOMINAL};
use crate::terminal::TerminalFeed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChaosMode {
    Nominal,
    Chaos,
}

/// The header status dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIndicator {
    Operational,
    Degraded,
}

#[derive(Debug, Clone)]
pub struct ChaosState {
    pub mode: ChaosMode,
    pub indicator: StatusIndicator,
    pub status_label: &'static str,
    pub alert_count: u32,
    /// One flag per dashboard badge; `true` renders struck-through and dim.
    disabled_badges: Vec<bool>,
    badge_probability: f64,
}

impl ChaosState {
    pub fn new(badge_count: usize, badge_probability: f64) -> Self {
        Self {
            mode: ChaosMode::Nominal,
            indicator: StatusIndicator::Operational,
            status_label: STATUS_LABEL_NOMINAL,
            alert_count: 0,
            disabled_badges: vec![false; badge_count],
            badge_probability: badge_probability.clamp(0.0, 1.0),
        }
    }

    pub fn is_active(&self) -> bool {
        self.mode == ChaosMode::Chaos
    }

    pub fn is_badge_disabled(&self, index: usize) -> bool {
        self.disabled_badges.get(index).copied().unwrap_or(false)
    }

    pub fn disabled_badge_count(&self) -> usize {
        self.disabled_badges.iter().filter(|&&d| d).count()
    }

    /// Flip the mode, apply its effects and log one line to the feed.
    pub fn toggle<R: Rng + ?Sized>(&mut self, rng: &mut R, feed: &mut TerminalFeed) {
        match self.mode {
            ChaosMode::Nominal => {
                self.activate(rng);
                feed.warning("🐵 CHAOS MONKEY MODE ACTIVATED");
                tracing::info!(
                    disabled_badges = self.disabled_badge_count(),
                    alerts = self.alert_count,
                    "chaos mode activated"
                );
            }
            ChaosMode::Chaos => {
                self.deactivate();
                feed.success("✅ Chaos mode deactivated");
                tracing::info!("chaos mode deactivated");
            }
        }
    }

    fn activate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.mode = ChaosMode::Chaos;
        let p = self.badge_probability;
        for disabled in self.disabled_badges.iter_mut() {
            *disabled = rng.gen_bool(p);
        }
        self.indicator = StatusIndicator::Degraded;
        self.status_label = STATUS_LABEL_CHAOS;
        self.alert_count = rng.gen_range(CHAOS_ALERT_RANGE);
    }

    fn deactivate(&mut self) {
        self.mode = ChaosMode::Nominal;
        self.disabled_badges.iter_mut().for_each(|d| *d = false);
        self.indicator = StatusIndicator::Operational;
        self.status_label = STATUS_LABEL_NOMINAL;
        self.alert_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::MessageSeverity;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup(badges: usize) -> (ChaosState, TerminalFeed, StdRng) {
        (
            ChaosState::new(badges, 0.3),
            TerminalFeed::new(50),
            StdRng::seed_from_u64(7),
        )
    }

    #[test]
    fn starts_nominal() {
        let (chaos, _, _) = setup(10);
        assert_eq!(chaos.mode, ChaosMode::Nominal);
        assert_eq!(chaos.indicator, StatusIndicator::Operational);
        assert_eq!(chaos.status_label, "ALL SYSTEMS NOMINAL");
        assert_eq!(chaos.alert_count, 0);
        assert_eq!(chaos.disabled_badge_count(), 0);
    }

    #[test]
    fn parity_decides_mode() {
        let (mut chaos, mut feed, mut rng) = setup(10);
        for n in 1..=21 {
            chaos.toggle(&mut rng, &mut feed);
            let expected = if n % 2 == 0 {
                ChaosMode::Nominal
            } else {
                ChaosMode::Chaos
            };
            assert_eq!(chaos.mode, expected, "after {} toggles", n);
        }
    }

    #[test]
    fn activation_degrades_status_and_sets_alerts_in_range() {
        let (mut chaos, mut feed, mut rng) = setup(10);
        chaos.toggle(&mut rng, &mut feed);
        assert!(chaos.is_active());
        assert_eq!(chaos.indicator, StatusIndicator::Degraded);
        assert_eq!(chaos.status_label, "CHAOS MODE ACTIVE");
        assert!((5..15).contains(&chaos.alert_count));
    }

    #[test]
    fn deactivation_is_a_full_reset() {
        for seed in 0..20 {
            let mut chaos = ChaosState::new(12, 0.3);
            let mut feed = TerminalFeed::new(50);
            let mut rng = StdRng::seed_from_u64(seed);
            chaos.toggle(&mut rng, &mut feed);
            chaos.toggle(&mut rng, &mut feed);
            assert_eq!(chaos.alert_count, 0);
            assert_eq!(chaos.status_label, "ALL SYSTEMS NOMINAL");
            assert_eq!(chaos.indicator, StatusIndicator::Operational);
            assert_eq!(chaos.disabled_badge_count(), 0);
        }
    }

    #[test]
    fn each_transition_logs_exactly_one_line() {
        let (mut chaos, mut feed, mut rng) = setup(4);
        chaos.toggle(&mut rng, &mut feed);
        assert_eq!(feed.len(), 1);
        assert_eq!(feed.last().unwrap().text, "🐵 CHAOS MONKEY MODE ACTIVATED");
        assert_eq!(feed.last().unwrap().severity, MessageSeverity::Warning);
        chaos.toggle(&mut rng, &mut feed);
        assert_eq!(feed.len(), 2);
        assert_eq!(feed.last().unwrap().text, "✅ Chaos mode deactivated");
        assert_eq!(feed.last().unwrap().severity, MessageSeverity::Success);
    }

    #[test]
    fn probability_bounds_are_respected() {
        let mut feed = TerminalFeed::new(50);
        let mut rng = StdRng::seed_from_u64(1);

        let mut never = ChaosState::new(20, 0.0);
        never.toggle(&mut rng, &mut feed);
        assert_eq!(never.disabled_badge_count(), 0);

        let mut always = ChaosState::new(20, 1.0);
        always.toggle(&mut rng, &mut feed);
        assert_eq!(always.disabled_badge_count(), 20);
    }

    #[test]
    fn reactivation_draws_a_fresh_subset() {
        // Over many activations with 40 badges, at least two subsets differ.
        let mut chaos = ChaosState::new(40, 0.3);
        let mut feed = TerminalFeed::new(50);
        let mut rng = StdRng::seed_from_u64(99);
        let mut subsets = Vec::new();
        for _ in 0..5 {
            chaos.toggle(&mut rng, &mut feed);
            subsets.push(
                (0..40)
                    .map(|i| chaos.is_badge_disabled(i))
                    .collect::<Vec<_>>(),
            );
            chaos.toggle(&mut rng, &mut feed);
        }
        assert!(subsets.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn out_of_range_badge_is_enabled() {
        let (chaos, _, _) = setup(3);
        assert!(!chaos.is_badge_disabled(99));
    }
}
