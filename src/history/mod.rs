//! Bounded, most-recent-first record of completed calculations.

mod store;

pub use store::{decode_history, encode_history, load_history, save_history};

use serde::{Deserialize, Serialize};

/// Maximum number of entries kept.
pub const HISTORY_LIMIT: usize = 7;

/// One completed calculation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The expression as it was typed.
    pub expr: String,
    /// The result text it evaluated to.
    pub result: String,
    /// Stored JSON of an entry that was not a plain `{expr, result}`
    /// object. Written back as-is on save.
    #[serde(skip)]
    raw: Option<serde_json::Value>,
}

impl HistoryEntry {
    pub fn new(expr: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            result: result.into(),
            raw: None,
        }
    }

    /// Whether this entry came from a malformed stored item.
    pub fn is_malformed(&self) -> bool {
        self.raw.is_some()
    }
}

/// Ordered history, newest first, never longer than [`HISTORY_LIMIT`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored entries, dropping anything past the limit.
    pub fn from_entries(mut entries: Vec<HistoryEntry>) -> Self {
        entries.truncate(HISTORY_LIMIT);
        Self { entries }
    }

    /// Insert at the front, evicting the oldest entry on overflow.
    pub fn push_front(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_LIMIT);
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_front_orders_newest_first() {
        let mut history = History::new();
        history.push_front(HistoryEntry::new("1+1", "2"));
        history.push_front(HistoryEntry::new("2+2", "4"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.get(0).unwrap().expr, "2+2");
        assert_eq!(history.get(1).unwrap().expr, "1+1");
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let mut history = History::new();
        for i in 1..=8 {
            history.push_front(HistoryEntry::new(format!("{}+0", i), i.to_string()));
        }

        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history.get(0).unwrap().result, "8");
        assert_eq!(history.get(6).unwrap().result, "2");
        assert!(history.iter().all(|e| e.result != "1"));
    }

    #[test]
    fn test_from_entries_truncates() {
        let entries = (0..10)
            .map(|i| HistoryEntry::new(i.to_string(), i.to_string()))
            .collect();
        let history = History::from_entries(entries);
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history.get(0).unwrap().expr, "0");
    }
}
