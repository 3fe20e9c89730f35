use std::path::Path;

use log::{debug, warn};
use serde_json::Value;

use crate::config::PathsConfig;
use crate::document::{JsonDocumentStore, JsonObject};
use crate::error::Result;
use crate::utils::file_utils;

/// Accessor for the project's editor settings document.
///
/// Queries degrade to `false` / `None` when the document is missing or
/// unparsable; the reason is logged. Writes report their error.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    document: JsonDocumentStore,
}

impl SettingsStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            document: JsonDocumentStore::new(path),
        }
    }

    /// Settings store at the configured location under `root`
    pub fn for_project(root: &Path, paths: &PathsConfig) -> Self {
        Self::new(file_utils::resolve(root, &paths.settings))
    }

    pub fn path(&self) -> &Path {
        self.document.path()
    }

    /// Whether the settings file exists. Creates the containing directory if absent.
    pub fn exists(&self) -> bool {
        if let Some(dir) = self.path().parent() {
            if let Err(e) = file_utils::ensure_dir_exists(dir) {
                warn!("{:#}", e);
                return false;
            }
        }
        self.document.exists()
    }

    pub fn has_property(&self, key: &str) -> bool {
        match self.document.load() {
            Ok(doc) => doc.contains_key(key),
            Err(e) => {
                debug!("Cannot look up {:?}: {}", key, e);
                false
            }
        }
    }

    pub fn get_property(&self, key: &str) -> Option<Value> {
        match self.document.load() {
            Ok(mut doc) => doc.remove(key),
            Err(e) => {
                warn!("Error getting property {:?} value: {}", key, e);
                None
            }
        }
    }

    /// Set one key, rewriting the whole document under lock
    pub fn set_property(&self, key: &str, value: Value) -> Result<()> {
        debug!("Setting {:?} in {}", key, self.path().display());
        self.document.update(|doc| {
            doc.insert(key.to_string(), value);
            Ok(())
        })
    }

    /// Replace the document with `doc`
    pub fn save(&self, doc: &JsonObject) -> Result<()> {
        self.document.save(doc)
    }

    pub fn update<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut JsonObject) -> Result<R>,
    {
        self.document.update(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn exists_creates_directory() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let store = SettingsStore::new(dir.path().join(".vscode").join("settings.json"));

        assert!(!store.exists());
        assert!(dir.path().join(".vscode").is_dir());
        Ok(())
    }

    #[test]
    fn set_then_get() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"editor.wordWrap": "on"}"#)?;
        let store = SettingsStore::new(&path);

        assert!(!store.has_property("git.autofetch"));
        store.set_property("git.autofetch", json!(true))?;

        assert!(store.has_property("git.autofetch"));
        assert_eq!(store.get_property("git.autofetch"), Some(json!(true)));
        assert_eq!(store.get_property("editor.wordWrap"), Some(json!("on")));
        Ok(())
    }

    #[test]
    fn concurrent_writers_keep_every_key() -> anyhow::Result<()> {
        const WRITERS: usize = 16;
        let dir = tempdir()?;
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{}")?;
        let store = SettingsStore::new(&path);

        let failures: Vec<String> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..WRITERS)
                .map(|i| {
                    let store = &store;
                    scope.spawn(move || store.set_property(&format!("key.{i}"), json!(i)))
                })
                .collect();
            handles
                .into_iter()
                .filter_map(|handle| match handle.join() {
                    Ok(Ok(())) => None,
                    Ok(Err(e)) => Some(e.to_string()),
                    Err(_) => Some("writer panicked".to_string()),
                })
                .collect()
        });
        assert_eq!(failures, Vec::<String>::new());

        for i in 0..WRITERS {
            assert_eq!(store.get_property(&format!("key.{i}")), Some(json!(i)), "key.{i}");
        }
        Ok(())
    }

    #[test]
    fn queries_degrade_on_bad_documents() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("settings.json");
        let store = SettingsStore::new(&path);

        assert!(!store.has_property("a"));
        assert_eq!(store.get_property("a"), None);
        assert!(store.set_property("a", json!(1)).is_err());

        std::fs::write(&path, "{ broken")?;
        assert!(!store.has_property("a"));
        assert_eq!(store.get_property("a"), None);
        assert!(store.set_property("a", json!(1)).is_err());
        Ok(())
    }
}
