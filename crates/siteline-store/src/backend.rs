//! Durable backends
//!
//! [`JsonFileBackend`] keeps one `<key>.json` file per collection under a
//! data directory. [`MemoryBackend`] backs tests and ephemeral sessions.

use parking_lot::Mutex;
use siteline_core::{Durable, WriteError};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-per-key JSON storage under a data directory.
#[derive(Debug)]
pub struct JsonFileBackend {
    root: PathBuf,
}

impl JsonFileBackend {
    /// Open (creating if needed) a backend rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, WriteError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|err| WriteError::io(root.display().to_string(), err))?;
        Ok(Self { root })
    }

    /// Directory this backend writes into.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl Durable for JsonFileBackend {
    fn put(&self, key: &str, value: &str) -> Result<(), WriteError> {
        fs::write(self.path_for(key), value).map_err(|err| WriteError::io(key, err))
    }

    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn remove(&self, key: &str) -> Result<(), WriteError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(WriteError::io(key, err)),
        }
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    /// Whether no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }
}

impl Durable for MemoryBackend {
    fn put(&self, key: &str, value: &str) -> Result<(), WriteError> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn remove(&self, key: &str) -> Result<(), WriteError> {
        self.values.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_roundtrip() {
        let backend = MemoryBackend::new();
        assert!(backend.is_empty());

        backend.put("a", "[1,2]").unwrap();
        assert_eq!(backend.get("a").as_deref(), Some("[1,2]"));
        assert_eq!(backend.len(), 1);

        backend.remove("a").unwrap();
        assert!(backend.get("a").is_none());
        // Removing an absent key is not an error.
        backend.remove("a").unwrap();
    }

    #[test]
    fn test_file_backend_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::open(dir.path().join("data")).unwrap();

        assert!(backend.get("missing").is_none());
        backend.put("work-orders", "[]").unwrap();
        assert_eq!(backend.get("work-orders").as_deref(), Some("[]"));

        backend.remove("work-orders").unwrap();
        assert!(backend.get("work-orders").is_none());
        backend.remove("work-orders").unwrap();
    }
}
