//! Per-patient medical history.
//!
//! The log is append-only. Reads walk it newest-first and never consume entries, so the same
//! history can be rendered any number of times.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fmt;

/// One recorded event in a patient's history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    text: String,
    recorded_at: DateTime<Utc>,
}

impl HistoryEntry {
    fn new(text: String) -> Self {
        Self {
            text,
            recorded_at: Utc::now(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    /// Render as `<rfc3339> <text>`.
    pub fn timestamped(&self) -> String {
        format!(
            "{} {}",
            self.recorded_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.text
        )
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Append-only log read most-recent-first.
///
/// Entries are stored in arrival order and iterated in reverse; there is deliberately no
/// indexing or removal.
#[derive(Clone, Debug, Default)]
pub struct MedicalHistoryLog {
    entries: Vec<HistoryEntry>,
}

impl MedicalHistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, text: impl Into<String>) {
        self.entries.push(HistoryEntry::new(text.into()));
    }

    /// Entries from newest to oldest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> + ExactSizeIterator + '_ {
        self.entries.iter().rev()
    }

    /// Most recent entry, if any.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a MedicalHistoryLog {
    type Item = &'a HistoryEntry;
    type IntoIter = std::iter::Rev<std::slice::Iter<'a, HistoryEntry>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().rev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(log: &MedicalHistoryLog) -> Vec<&str> {
        log.iter().map(HistoryEntry::text).collect()
    }

    #[test]
    fn iterates_newest_first() {
        let mut log = MedicalHistoryLog::new();
        log.append("A");
        log.append("B");
        log.append("C");

        assert_eq!(texts(&log), vec!["C", "B", "A"]);
        assert_eq!(log.latest().map(HistoryEntry::text), Some("C"));
    }

    #[test]
    fn reading_does_not_consume() {
        let mut log = MedicalHistoryLog::new();
        log.append("first");
        log.append("second");

        let once = texts(&log);
        let twice = texts(&log);
        assert_eq!(once, twice);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn empty_log_yields_nothing() {
        let log = MedicalHistoryLog::new();
        assert!(log.is_empty());
        assert_eq!(log.iter().count(), 0);
        assert!(log.latest().is_none());
    }

    #[test]
    fn timestamped_rendering_keeps_text() {
        let mut log = MedicalHistoryLog::new();
        log.append("Blood pressure normal");
        let entry = log.latest().expect("entry");
        let rendered = entry.timestamped();
        assert!(rendered.ends_with(" Blood pressure normal"));
        assert!(rendered.contains('T'));
        assert_eq!(entry.to_string(), "Blood pressure normal");
    }
}
