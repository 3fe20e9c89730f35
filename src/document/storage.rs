use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use fs2::FileExt;
use log::{debug, trace};
use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, ScaffoldError};
use super::JsonObject;

/// Storage for a single JSON object document on disk
#[derive(Debug, Clone)]
pub struct JsonDocumentStore {
    /// Path to the document
    path: PathBuf,
}

impl JsonDocumentStore {
    /// Create a new store for the given path
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the path to the document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the document file exists
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the document from disk
    pub fn load(&self) -> Result<JsonObject> {
        let path = &self.path;
        debug!("Loading JSON document from {}", path.display());

        if !self.exists() {
            return Err(ScaffoldError::NotFound { path: path.clone() });
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        parse_object(path, &content)
    }

    /// Write the whole document, replacing any existing content
    pub fn save(&self, doc: &JsonObject) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let _lock = self.lock()?;
        self.write_atomic(doc)
    }

    /// Read-modify-write under an exclusive lock.
    ///
    /// The document is only written back when `f` succeeds.
    pub fn update<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut JsonObject) -> Result<R>,
    {
        if !self.exists() {
            return Err(ScaffoldError::NotFound { path: self.path.clone() });
        }

        let _lock = self.lock()?;
        let mut doc = self.load()?;
        let result = f(&mut doc)?;
        self.write_atomic(&doc)?;
        Ok(result)
    }

    /// Sidecar file used for advisory locking, e.g. `settings.json.lock`.
    ///
    /// It stays next to the document after a write. Deleting it while another
    /// writer is blocked on it would let a third writer lock a new file at the
    /// same path and run alongside the second.
    pub fn lock_path(&self) -> PathBuf {
        self.sibling(".lock")
    }

    fn sibling(&self, extra: &str) -> PathBuf {
        let mut name: OsString = self.path.file_name().map(OsString::from).unwrap_or_default();
        name.push(extra);
        self.path.with_file_name(name)
    }

    fn lock(&self) -> Result<File> {
        let lock_path = self.lock_path();
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

        // Blocks until any other writer releases the lock
        lock_file
            .lock_exclusive()
            .with_context(|| format!("Failed to lock {}", self.path.display()))?;
        trace!("Locked {}", lock_path.display());

        Ok(lock_file)
    }

    fn write_atomic(&self, doc: &JsonObject) -> Result<()> {
        let content = to_pretty_json(doc)?;

        let temp_path = self.sibling(".tmp");
        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        temp_file
            .write_all(content.as_bytes())
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        temp_file
            .sync_all()
            .with_context(|| format!("Failed to sync {}", temp_path.display()))?;

        fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        debug!("Saved JSON document with {} keys to {}", doc.len(), self.path.display());
        Ok(())
    }
}

/// Parse text into a JSON object, classifying failures
pub fn parse_object(path: &Path, content: &str) -> Result<JsonObject> {
    let value: Value = serde_json::from_str(content).map_err(|source| ScaffoldError::MalformedJson {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ScaffoldError::NotAnObject { path: path.to_path_buf() }),
    }
}

/// Serialize with four-space indentation and a trailing newline
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .context("Failed to serialize JSON document")?;
    buf.push(b'\n');
    Ok(String::from_utf8(buf).context("Serialized JSON is not UTF-8")?)
}
