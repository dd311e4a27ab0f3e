use chrono::{DateTime, Local};
use std::collections::VecDeque;

use crate::constants::MAX_TERMINAL_CAPACITY;

/// Color class of a terminal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSeverity {
    Info,
    Success,
    Warning,
    Danger,
}

/// A single line in the terminal feed.
#[derive(Debug, Clone)]
pub struct TerminalMessage {
    pub timestamp: DateTime<Local>,
    pub text: String,
    pub severity: MessageSeverity,
}

impl TerminalMessage {
    pub fn new(text: &str, severity: MessageSeverity) -> Self {
        Self {
            timestamp: Local::now(),
            text: text.to_string(),
            severity,
        }
    }

    /// `[HH:MM:SS]` prefix shown before the text.
    pub fn timestamp_label(&self) -> String {
        format!("[{}]", self.timestamp.format("%H:%M:%S"))
    }
}

/// Append-only terminal log with strict FIFO eviction by count.
#[derive(Debug)]
pub struct TerminalFeed {
    messages: VecDeque<TerminalMessage>,
    capacity: usize,
}

impl TerminalFeed {
    pub fn new(capacity: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(capacity.min(MAX_TERMINAL_CAPACITY)),
            capacity,
        }
    }

    pub fn append(&mut self, text: &str, severity: MessageSeverity) {
        self.messages.push_back(TerminalMessage::new(text, severity));
        self.trim();
    }

    pub fn info(&mut self, text: &str) {
        self.append(text, MessageSeverity::Info);
    }

    pub fn success(&mut self, text: &str) {
        self.append(text, MessageSeverity::Success);
    }

    pub fn warning(&mut self, text: &str) {
        self.append(text, MessageSeverity::Warning);
    }

    pub fn danger(&mut self, text: &str) {
        self.append(text, MessageSeverity::Danger);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &TerminalMessage> + ExactSizeIterator {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&TerminalMessage> {
        self.messages.back()
    }

    fn trim(&mut self) {
        while self.messages.len() > self.capacity {
            self.messages.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(feed: &TerminalFeed) -> Vec<String> {
        feed.iter().map(|m| m.text.clone()).collect()
    }

    #[test]
    fn new_feed_empty() {
        let feed = TerminalFeed::new(50);
        assert!(feed.is_empty());
        assert_eq!(feed.capacity(), 50);
    }

    #[test]
    fn huge_capacity_does_not_preallocate() {
        let mut feed = TerminalFeed::new(usize::MAX);
        feed.info("still works");
        assert_eq!(feed.len(), 1);
        assert_eq!(feed.capacity(), usize::MAX);
    }

    #[test]
    fn append_keeps_arrival_order() {
        let mut feed = TerminalFeed::new(50);
        feed.info("one");
        feed.success("two");
        feed.danger("three");
        assert_eq!(texts(&feed), vec!["one", "two", "three"]);
        assert_eq!(feed.last().unwrap().severity, MessageSeverity::Danger);
    }

    #[test]
    fn length_grows_to_capacity_then_holds() {
        let mut feed = TerminalFeed::new(50);
        for i in 0..120 {
            let before = feed.len();
            feed.info(&format!("msg {}", i));
            assert_eq!(feed.len(), (before + 1).min(50));
        }
    }

    #[test]
    fn fifty_first_append_evicts_the_first() {
        let mut feed = TerminalFeed::new(50);
        for i in 0..51 {
            feed.info(&format!("msg {}", i));
        }
        let got = texts(&feed);
        assert_eq!(got.len(), 50);
        assert!(!got.contains(&"msg 0".to_string()));
        let expected: Vec<String> = (1..51).map(|i| format!("msg {}", i)).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn eviction_ignores_severity() {
        let mut feed = TerminalFeed::new(2);
        feed.danger("critical first");
        feed.info("a");
        feed.info("b");
        assert_eq!(texts(&feed), vec!["a", "b"]);
    }

    #[test]
    fn timestamp_label_format() {
        let msg = TerminalMessage::new("x", MessageSeverity::Info);
        let label = msg.timestamp_label();
        assert_eq!(label.len(), 10);
        assert!(label.starts_with('[') && label.ends_with(']'));
        assert_eq!(&label[3..4], ":");
    }
}
