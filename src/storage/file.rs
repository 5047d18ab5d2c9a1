//! File-backed store: one file per key inside a data directory.

use super::{KeyValueStore, StoreError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Directory name used under the platform data directory.
const APP_DIR: &str = "flashcalc";

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The platform default location, e.g. `~/.local/share/flashcalc`.
    pub fn default_root() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join(APP_DIR))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(file_name_for(key))
    }
}

/// Map a key to a file name, replacing anything outside `[A-Za-z0-9._-]`.
fn file_name_for(key: &str) -> String {
    let name: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if name.is_empty() || name.chars().all(|c| c == '.') {
        format!("_{}", name)
    } else {
        name
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                path,
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let io_err = |path: &Path, source| StoreError::Io {
            key: key.to_string(),
            path: path.to_path_buf(),
            source,
        };

        fs::create_dir_all(&self.root).map_err(|e| io_err(&self.root, e))?;

        // Readers never see a partially written record.
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value).map_err(|e| io_err(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| io_err(&path, e))?;

        tracing::trace!(key, path = %path.display(), "stored value");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("flashcalc-expr-v1").unwrap(), None);
    }

    #[test]
    fn test_round_trip_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("data");
        let mut store = FileStore::new(&root);

        store.set("flashcalc-expr-v1", "12+3").unwrap();

        assert!(root.is_dir());
        assert_eq!(
            store.get("flashcalc-expr-v1").unwrap().as_deref(),
            Some("12+3")
        );
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        store.set("k", "first").unwrap();
        store.set("k", "second").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_unsafe_key_characters_are_replaced() {
        assert_eq!(file_name_for("flashcalc-expr-v1"), "flashcalc-expr-v1");
        assert_eq!(file_name_for("../etc/passwd"), ".._etc_passwd");
        assert_eq!(file_name_for(".."), "_..");
        assert_eq!(file_name_for(""), "_");
    }

    #[test]
    fn test_unreadable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        // A directory where the value file should be cannot be read as text.
        fs::create_dir(dir.path().join("k")).unwrap();
        assert!(matches!(store.get("k"), Err(StoreError::Io { .. })));
    }
}
