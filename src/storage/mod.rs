//! Persistent key-value storage for calculator state.
//!
//! The calculator keeps two independent string records: the current
//! expression and the JSON-encoded history. Storage is best-effort; callers
//! decide how to degrade when a read or write fails.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::path::PathBuf;
use thiserror::Error;

/// Store key holding the current expression text.
pub const EXPRESSION_KEY: &str = "flashcalc-expr-v1";

/// Store key holding the JSON-encoded history list.
pub const HISTORY_KEY: &str = "flashcalc-history-v1";

/// Errors raised by a [`KeyValueStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error for key '{key}' at {}: {source}", .path.display())]
    Io {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A synchronous string-keyed store.
pub trait KeyValueStore {
    /// Read a value. An absent key is `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}
