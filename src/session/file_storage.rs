//! Local-storage emulation backed by a JSON file.

use greenayu_core::{SessionStorage, StorageError};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A JSON object file mapping keys to string values.
///
/// Every write rewrites the whole file through a sibling temp file and a
/// rename, so a crash leaves either the old or the new map on disk.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StorageError::Read(format!("{}: {}", self.path.display(), e))),
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content)
            .map_err(|e| StorageError::Corrupt(format!("{}: {}", self.path.display(), e)))
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let write_err = |e: std::io::Error| StorageError::Write(format!("{}: {}", self.path.display(), e));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let content = serde_json::to_string_pretty(map)
            .map_err(|e| StorageError::Write(e.to_string()))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, content).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;
        debug!(path = %self.path.display(), entries = map.len(), "Session storage written");
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock();
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock();
        // A corrupt file is replaced rather than blocking sign-in forever.
        let mut map = match self.read_map() {
            Err(StorageError::Corrupt(_)) => BTreeMap::new(),
            other => other?,
        };
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock();
        let mut map = match self.read_map() {
            Err(StorageError::Corrupt(_)) => BTreeMap::new(),
            other => other?,
        };
        if map.remove(key).is_none() && !self.path.exists() {
            return Ok(());
        }
        self.write_map(&map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("session.json"));

        assert_eq!(storage.get("ap_user").unwrap(), None);
        storage.remove("ap_user").unwrap();
        assert!(!storage.path().exists());
    }

    #[test]
    fn set_get_remove() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("nested/data/session.json"));

        storage.set("ap_user", r#"{"name":"Demo User"}"#).unwrap();
        storage.set("theme", "dark").unwrap();

        assert_eq!(
            storage.get("ap_user").unwrap().as_deref(),
            Some(r#"{"name":"Demo User"}"#)
        );

        storage.remove("ap_user").unwrap();
        assert_eq!(storage.get("ap_user").unwrap(), None);
        assert_eq!(storage.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn corrupt_file_is_an_error_until_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();
        let storage = FileStorage::new(&path);

        assert!(matches!(storage.get("ap_user"), Err(StorageError::Corrupt(_))));

        storage.set("ap_user", "x").unwrap();
        assert_eq!(storage.get("ap_user").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("session.json"));
        storage.set("k", "v").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["session.json".to_string()]);
    }
}
