// ABOUTME: Durable string-keyed JSON store for favorites, shopping list, and theme
// ABOUTME: Reads substitute defaults on absent/corrupt values; writes are atomic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Saveur Contributors

use crate::errors::StorageError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Store key for the favorites collection
pub const FAVORITES_KEY: &str = "favorites";

/// Store key for the shopping list
pub const SHOPPING_LIST_KEY: &str = "shoppingList";

/// Store key for the theme preference
pub const THEME_KEY: &str = "theme";

/// Durable key-value store over one JSON file per key.
///
/// The browser front end this replaces kept these collections in local
/// storage; the semantics carry over: synchronous load/save, values
/// serialized to a textual encoding on every access, and a read path
/// that never fails — absent or unparsable values yield the caller's
/// default so initial render always succeeds.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// Load the value stored under `key`, or `default` when the value is
    /// absent or fails to parse. This path never errors.
    #[must_use]
    pub fn load_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(error) => {
                    warn!(key, %error, "stored value is corrupt, using default");
                    default
                }
            },
            Err(_) => {
                debug!(key, "no stored value, using default");
                default
            }
        }
    }

    /// Persist `value` under `key` via a temp file renamed into place,
    /// so a crash mid-write never leaves a truncated store.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if serialization or the write fails.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
            key: key.to_owned(),
            source,
        })?;

        let io_error = |source| StorageError::Io {
            key: key.to_owned(),
            source,
        };

        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir).map_err(io_error)?;
        tmp.write_all(raw.as_bytes()).map_err(io_error)?;
        tmp.persist(self.path_for(key))
            .map_err(|e| io_error(e.error))?;

        debug!(key, bytes = raw.len(), "persisted value");
        Ok(())
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Directory backing this store
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Persisted color-scheme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light color scheme
    #[default]
    Light,
    /// Dark color scheme
    Dark,
}

impl Theme {
    /// The other theme, for toggle controls
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_load_absent_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        let items: Vec<String> = store.load_or(SHOPPING_LIST_KEY, Vec::new());
        assert!(items.is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();

        let items = vec!["2 cups flour".to_owned(), "3 eggs".to_owned()];
        store.save(SHOPPING_LIST_KEY, &items).unwrap();

        let loaded: Vec<String> = store.load_or(SHOPPING_LIST_KEY, Vec::new());
        assert_eq!(loaded, items);
    }

    #[test]
    fn test_corrupt_value_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();

        fs::write(dir.path().join("shoppingList.json"), "{not json").unwrap();
        let items: Vec<String> = store.load_or(SHOPPING_LIST_KEY, Vec::new());
        assert!(items.is_empty());
    }

    #[test]
    fn test_theme_toggle_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();

        let theme: Theme = store.load_or(THEME_KEY, Theme::default());
        assert_eq!(theme, Theme::Light);

        store.save(THEME_KEY, &theme.toggled()).unwrap();
        let reloaded: Theme = store.load_or(THEME_KEY, Theme::default());
        assert_eq!(reloaded, Theme::Dark);
    }
}
