//! The command palette's dispatcher.
//!
//! Input is trimmed and lower-cased, then matched exactly against five
//! command names. Every branch writes its output into the terminal feed;
//! unknown input produces a single danger line echoing what was typed.

use rand::Rng;

use crate::ambient::SystemMetrics;
use crate::chaos::ChaosState;
use crate::models::FeedData;
use crate::terminal::TerminalFeed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Skills,
    Incidents,
    Metrics,
    Chaos,
    Help,
}

impl Command {
    pub fn all() -> &'static [Command] {
        &[
            Command::Skills,
            Command::Incidents,
            Command::Metrics,
            Command::Chaos,
            Command::Help,
        ]
    }

    /// Exact match after trimming and lower-casing.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "skills" => Some(Command::Skills),
            "incidents" => Some(Command::Incidents),
            "metrics" => Some(Command::Metrics),
            "chaos" => Some(Command::Chaos),
            "help" => Some(Command::Help),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Skills => "skills",
            Command::Incidents => "incidents",
            Command::Metrics => "metrics",
            Command::Chaos => "chaos",
            Command::Help => "help",
        }
    }

    /// Shown under the palette input while it is open.
    pub fn suggestion(&self) -> &'static str {
        match self {
            Command::Skills => "List all skills with timestamps",
            Command::Incidents => "Show incident summary",
            Command::Metrics => "Display current system metrics",
            Command::Chaos => "Toggle Chaos Monkey mode",
            Command::Help => "Show all commands",
        }
    }

    /// Printed by `help`.
    pub fn help_text(&self) -> &'static str {
        match self {
            Command::Skills => "List all skills",
            Command::Incidents => "Show incidents summary",
            Command::Metrics => "Display system metrics",
            Command::Chaos => "Toggle Chaos Monkey mode",
            Command::Help => "Show this help",
        }
    }
}

/// Everything a command may read or touch.
pub struct CommandContext<'a, R: Rng + ?Sized> {
    pub feed: &'a FeedData,
    pub terminal: &'a mut TerminalFeed,
    pub chaos: &'a mut ChaosState,
    pub rng: &'a mut R,
}

/// Run one palette line. Closing the palette is the caller's job.
pub fn dispatch<R: Rng + ?Sized>(raw: &str, ctx: CommandContext<'_, R>) -> Option<Command> {
    let CommandContext {
        feed,
        terminal,
        chaos,
        rng,
    } = ctx;

    let Some(command) = Command::parse(raw) else {
        tracing::debug!(input = raw, "unknown command");
        terminal.danger(&format!("❌ Unknown command: {}", raw));
        return None;
    };

    tracing::debug!(command = command.name(), "dispatching command");
    match command {
        Command::Skills => show_skills(feed, terminal),
        Command::Incidents => show_incidents_summary(feed, terminal),
        Command::Metrics => show_metrics(terminal, rng),
        Command::Chaos => chaos.toggle(rng, terminal),
        Command::Help => show_help(terminal),
    }
    Some(command)
}

fn show_skills(feed: &FeedData, terminal: &mut TerminalFeed) {
    terminal.info("📋 SKILLS LIST");
    for skill in &feed.skills {
        terminal.success(&format!(
            "{} {} - Last proven: {}",
            skill.icon,
            skill.name,
            skill.last_proven_display()
        ));
    }
}

fn show_incidents_summary(feed: &FeedData, terminal: &mut TerminalFeed) {
    let m = &feed.metrics;
    terminal.info("🚨 INCIDENTS SUMMARY");
    terminal.info(&format!("Total: {}", m.total_incidents));
    terminal.success(&format!("Resolved: {}", m.resolved_incidents));
    terminal.info(&format!("Avg MTTR: {} minutes", m.avg_mttr_minutes));
}

fn show_metrics<R: Rng + ?Sized>(terminal: &mut TerminalFeed, rng: &mut R) {
    let m = SystemMetrics::sample(rng);
    terminal.info("📊 SYSTEM METRICS");
    terminal.success(&format!("CPU: {}%", m.cpu_percent));
    terminal.success(&format!("Memory: {}%", m.memory_percent));
    terminal.success(&format!("Disk: {}%", m.disk_percent));
    terminal.success(&format!("Network: {} Mbps", m.network_mbps));
}

fn show_help(terminal: &mut TerminalFeed) {
    terminal.info("📖 AVAILABLE COMMANDS");
    for cmd in Command::all() {
        terminal.info(&format!("{:<10} - {}", cmd.name(), cmd.help_text()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chaos::ChaosMode;
    use crate::models::{FeedMetrics, Skill};
    use crate::terminal::MessageSeverity;
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Fixture {
        feed: FeedData,
        terminal: TerminalFeed,
        chaos: ChaosState,
        rng: StdRng,
    }

    impl Fixture {
        fn new(feed: FeedData) -> Self {
            Self {
                feed,
                terminal: TerminalFeed::new(50),
                chaos: ChaosState::new(5, 0.3),
                rng: StdRng::seed_from_u64(42),
            }
        }

        fn run(&mut self, raw: &str) -> Option<Command> {
            dispatch(
                raw,
                CommandContext {
                    feed: &self.feed,
                    terminal: &mut self.terminal,
                    chaos: &mut self.chaos,
                    rng: &mut self.rng,
                },
            )
        }

        fn texts(&self) -> Vec<String> {
            self.terminal.iter().map(|m| m.text.clone()).collect()
        }
    }

    fn terraform_feed() -> FeedData {
        FeedData {
            skills: vec![Skill {
                name: "Terraform".to_string(),
                icon: "🏗️".to_string(),
                last_proven: None,
                category: None,
                level: None,
            }],
            ..FeedData::default()
        }
    }

    // ── parse ─────────────────────────────────────────────────────

    #[test]
    fn parse_trims_and_lowercases() {
        assert_eq!(Command::parse("  SKILLS  "), Some(Command::Skills));
        assert_eq!(Command::parse("Chaos"), Some(Command::Chaos));
        assert_eq!(Command::parse("\thelp\n"), Some(Command::Help));
    }

    #[test]
    fn parse_is_exact_match() {
        assert_eq!(Command::parse("skill"), None);
        assert_eq!(Command::parse("skills now"), None);
        assert_eq!(Command::parse("metricsx"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn every_command_parses_its_own_name() {
        for cmd in Command::all() {
            assert_eq!(Command::parse(cmd.name()), Some(*cmd));
        }
    }

    // ── unknown ───────────────────────────────────────────────────

    #[test]
    fn unknown_input_appends_one_danger_line_with_original_text() {
        for input in ["deploy", "  ROLLBACK ", "", "skills please", "rm -rf /"] {
            let mut fx = Fixture::new(FeedData::default());
            assert_eq!(fx.run(input), None);
            assert_eq!(fx.terminal.len(), 1, "input {:?}", input);
            let msg = fx.terminal.last().unwrap();
            assert_eq!(msg.severity, MessageSeverity::Danger);
            assert_eq!(msg.text, format!("❌ Unknown command: {}", input));
        }
    }

    // ── skills ────────────────────────────────────────────────────

    #[test]
    fn skills_with_untrimmed_uppercase_input() {
        let mut fx = Fixture::new(terraform_feed());
        assert_eq!(fx.run("  SKILLS  "), Some(Command::Skills));
        let texts = fx.texts();
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0], "📋 SKILLS LIST");
        assert!(texts[1].contains("🏗️ Terraform - Last proven: Never"));
    }

    #[test]
    fn skills_with_no_skills_prints_only_header() {
        let mut fx = Fixture::new(FeedData::default());
        fx.run("skills");
        assert_eq!(fx.texts(), vec!["📋 SKILLS LIST"]);
    }

    // ── incidents ─────────────────────────────────────────────────

    #[test]
    fn incidents_summary_reads_feed_metrics() {
        let mut fx = Fixture::new(FeedData {
            metrics: FeedMetrics {
                total_incidents: 7,
                resolved_incidents: 6,
                avg_mttr_minutes: 42,
                ..FeedMetrics::default()
            },
            ..FeedData::default()
        });
        fx.run("incidents");
        assert_eq!(
            fx.texts(),
            vec![
                "🚨 INCIDENTS SUMMARY",
                "Total: 7",
                "Resolved: 6",
                "Avg MTTR: 42 minutes"
            ]
        );
    }

    #[test]
    fn incidents_summary_on_mock_feed() {
        let mut fx = Fixture::new(FeedData::mock(Utc::now()));
        fx.run("incidents");
        assert_eq!(fx.texts()[1], "Total: 5");
        assert_eq!(fx.texts()[3], "Avg MTTR: 89 minutes");
    }

    // ── metrics ───────────────────────────────────────────────────

    #[test]
    fn metrics_prints_header_and_four_lines() {
        let mut fx = Fixture::new(FeedData::default());
        fx.run("metrics");
        let texts = fx.texts();
        assert_eq!(texts.len(), 5);
        assert_eq!(texts[0], "📊 SYSTEM METRICS");
        assert!(texts[1].starts_with("CPU: ") && texts[1].ends_with('%'));
        assert!(texts[2].starts_with("Memory: "));
        assert!(texts[3].starts_with("Disk: "));
        assert!(texts[4].starts_with("Network: ") && texts[4].ends_with(" Mbps"));
    }

    // ── chaos ─────────────────────────────────────────────────────

    #[test]
    fn chaos_command_toggles_mode() {
        let mut fx = Fixture::new(FeedData::default());
        fx.run("chaos");
        assert_eq!(fx.chaos.mode, ChaosMode::Chaos);
        assert_eq!(fx.texts(), vec!["🐵 CHAOS MONKEY MODE ACTIVATED"]);
        fx.run("CHAOS");
        assert_eq!(fx.chaos.mode, ChaosMode::Nominal);
        assert_eq!(fx.terminal.len(), 2);
    }

    // ── help ──────────────────────────────────────────────────────

    #[test]
    fn help_lists_all_five_commands() {
        let mut fx = Fixture::new(FeedData::default());
        fx.run("help");
        assert_eq!(
            fx.texts(),
            vec![
                "📖 AVAILABLE COMMANDS",
                "skills     - List all skills",
                "incidents  - Show incidents summary",
                "metrics    - Display system metrics",
                "chaos      - Toggle Chaos Monkey mode",
                "help       - Show this help",
            ]
        );
    }
}
