//! Key-value storage port for persisted preferences.
//!
//! The application shell decides where preferences live (browser local
//! storage, a settings file, shared preferences). The core only sees this
//! trait. Two implementations ship with the crate: [`MemoryStorage`] for
//! tests and ephemeral sessions, [`FileStorage`] for desktop hosts.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Key under which the selected scale is stored.
pub const SELECTED_SCALE_KEY: &str = "saxophoneSelectedScale";
/// Key under which the note range is stored.
pub const NOTE_RANGE_KEY: &str = "saxophoneNoteRange";
/// Key under which the active tab is stored.
pub const ACTIVE_TAB_KEY: &str = "saxophoneActiveTab";
/// Key under which the fingering image library is stored.
pub const FINGERING_IMAGES_KEY: &str = "saxophoneFingeringImages";

pub trait StoragePort {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StoragePort for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Use `dir`, creating it if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{file}.json"))
    }
}

impl StoragePort for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_round_trips() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
        storage.remove("k").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn file_storage_uses_one_file_per_key() {
        let dir = std::env::temp_dir().join(format!("scalelib-storage-{}", std::process::id()));
        let mut storage = FileStorage::open(&dir).unwrap();
        storage.set(ACTIVE_TAB_KEY, "about").unwrap();
        assert!(dir.join("saxophoneActiveTab.json").exists());
        assert_eq!(storage.get(ACTIVE_TAB_KEY).unwrap().as_deref(), Some("about"));
        storage.remove(ACTIVE_TAB_KEY).unwrap();
        storage.remove(ACTIVE_TAB_KEY).unwrap();
        assert_eq!(storage.get(ACTIVE_TAB_KEY).unwrap(), None);
        std::fs::remove_dir_all(&dir).ok();
    }
}
