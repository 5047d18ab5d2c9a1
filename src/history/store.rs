//! JSON persistence for [`History`].
//!
//! Loading is lenient: an absent record, unparseable JSON, or a JSON value
//! that is not an array all yield an empty history. Individual entries are
//! not validated; a missing or non-string field is kept as displayable text
//! and the original JSON item is written back untouched on the next save.

use super::{History, HistoryEntry};
use crate::storage::{HISTORY_KEY, KeyValueStore, StoreError};
use serde::Serialize;
use serde_json::Value;

/// Text used for a field the stored entry does not have.
const MISSING_FIELD: &str = "undefined";

/// Decode a stored history record.
pub fn decode_history(raw: &str) -> History {
    let parsed: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Discarding unparseable history: {}", e);
            return History::new();
        }
    };

    let Value::Array(items) = parsed else {
        tracing::warn!("Discarding history that is not a list");
        return History::new();
    };

    History::from_entries(items.iter().map(decode_entry).collect())
}

fn decode_entry(item: &Value) -> HistoryEntry {
    let well_formed = match item.as_object() {
        Some(fields) => {
            fields.len() == 2
                && fields.get("expr").is_some_and(Value::is_string)
                && fields.get("result").is_some_and(Value::is_string)
        }
        None => false,
    };

    HistoryEntry {
        expr: field_text(item.get("expr")),
        result: field_text(item.get("result")),
        raw: (!well_formed).then(|| item.clone()),
    }
}

fn field_text(value: Option<&Value>) -> String {
    match value {
        None => MISSING_FIELD.to_string(),
        Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum StoredEntry<'a> {
    Raw(&'a Value),
    Entry(&'a HistoryEntry),
}

/// Encode history as a JSON array of `{expr, result}` objects. Malformed
/// entries loaded from the store keep their original JSON.
pub fn encode_history(history: &History) -> Result<String, serde_json::Error> {
    let items: Vec<StoredEntry<'_>> = history
        .iter()
        .map(|entry| match &entry.raw {
            Some(raw) => StoredEntry::Raw(raw),
            None => StoredEntry::Entry(entry),
        })
        .collect();
    serde_json::to_string(&items)
}

/// Load history from `store`, falling back to empty on any failure.
pub fn load_history<S: KeyValueStore + ?Sized>(store: &S) -> History {
    match store.get(HISTORY_KEY) {
        Ok(Some(raw)) if !raw.is_empty() => decode_history(&raw),
        Ok(_) => History::new(),
        Err(e) => {
            tracing::warn!("Failed to read history: {}", e);
            History::new()
        }
    }
}

/// Persist history to `store`.
pub fn save_history<S: KeyValueStore + ?Sized>(
    store: &mut S,
    history: &History,
) -> Result<(), StoreError> {
    let encoded = encode_history(history)
        .map_err(|e| StoreError::Unavailable(format!("cannot encode history: {}", e)))?;
    store.set(HISTORY_KEY, &encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn sample() -> History {
        let mut history = History::new();
        history.push_front(HistoryEntry::new("1+1", "2"));
        history.push_front(HistoryEntry::new("3*3", "9"));
        history.push_front(HistoryEntry::new("10÷4", "2.5"));
        history
    }

    #[test]
    fn test_save_then_load_preserves_order() {
        let mut store = MemoryStore::new();
        let history = sample();

        save_history(&mut store, &history).unwrap();
        let loaded = load_history(&store);

        assert_eq!(loaded, history);
        assert_eq!(loaded.get(0).unwrap().expr, "10÷4");
        assert_eq!(loaded.get(2).unwrap().expr, "1+1");
    }

    #[test]
    fn test_encoded_shape() {
        let mut history = History::new();
        history.push_front(HistoryEntry::new("2+2", "4"));
        assert_eq!(
            encode_history(&history).unwrap(),
            r#"[{"expr":"2+2","result":"4"}]"#
        );
    }

    #[test]
    fn test_absent_record_is_empty() {
        assert!(load_history(&MemoryStore::new()).is_empty());
        let store = MemoryStore::new().with(HISTORY_KEY, "");
        assert!(load_history(&store).is_empty());
    }

    #[test]
    fn test_corrupt_record_is_empty() {
        assert!(decode_history("{not json").is_empty());
        assert!(decode_history(r#"{"expr":"1","result":"1"}"#).is_empty());
        assert!(decode_history("42").is_empty());
        assert!(decode_history("null").is_empty());
    }

    #[test]
    fn test_malformed_entries_are_tolerated() {
        let raw = r#"[{"expr":"1+1"}, {"expr":5,"result":true}, 7, {"expr":null,"result":"0"}]"#;
        let history = decode_history(raw);

        let texts: Vec<(&str, &str)> = history
            .iter()
            .map(|e| (e.expr.as_str(), e.result.as_str()))
            .collect();
        assert_eq!(
            texts,
            vec![
                ("1+1", "undefined"),
                ("5", "true"),
                ("undefined", "undefined"),
                ("", "0"),
            ]
        );
        assert!(history.iter().all(HistoryEntry::is_malformed));
    }

    #[test]
    fn test_well_formed_entries_are_not_marked() {
        let history = decode_history(r#"[{"expr":"2+2","result":"4"}]"#);
        assert_eq!(history.get(0), Some(&HistoryEntry::new("2+2", "4")));
        assert!(!history.get(0).unwrap().is_malformed());
    }

    #[test]
    fn test_malformed_entries_written_back_unchanged() {
        let raw = r#"[7,{"expr":"1"},{"expr":"2","result":"2","note":"x"}]"#;
        let mut history = decode_history(raw);
        history.push_front(HistoryEntry::new("3*3", "9"));

        assert_eq!(
            encode_history(&history).unwrap(),
            r#"[{"expr":"3*3","result":"9"},7,{"expr":"1"},{"expr":"2","note":"x","result":"2"}]"#
        );
    }

    #[test]
    fn test_long_record_truncated_on_load() {
        let raw = serde_json::to_string(
            &(0..9)
                .map(|i| HistoryEntry::new(i.to_string(), i.to_string()))
                .collect::<Vec<_>>(),
        )
        .unwrap();
        assert_eq!(decode_history(&raw).len(), crate::history::HISTORY_LIMIT);
    }

    #[test]
    fn test_write_failure_is_reported() {
        let mut store = MemoryStore::failing();
        assert!(save_history(&mut store, &sample()).is_err());
    }
}
