// Key-value persistence: one string value per key.
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{EngineError, EngineResult};

pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> EngineResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> EngineResult<()>;
    fn remove(&self, key: &str) -> EngineResult<()>;
}

/// Stores each key as `<data_dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    data_dir: PathBuf,
}

impl FileStorage {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        FileStorage { data_dir: data_dir.into() }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_for(&self, key: &str) -> EngineResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(EngineError::ConfigError(format!("Invalid storage key '{}'", key)));
        }
        Ok(self.data_dir.join(format!("{}.json", key)))
    }

    // Write to a sibling temp file, then rename over the target.
    fn write_atomic(&self, path: &Path, data: &[u8]) -> EngineResult<()> {
        fs::create_dir_all(&self.data_dir)?;
        let file_name = path.file_name().and_then(|s| s.to_str()).unwrap_or("data");
        let tmp = self
            .data_dir
            .join(format!(".{}.tmp.{}", file_name, std::process::id()));
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(data)?;
            file.sync_all()?;
        }
        if let Err(e) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> EngineResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> EngineResult<()> {
        let path = self.path_for(key)?;
        self.write_atomic(&path, value.as_bytes())?;
        tracing::debug!(key, bytes = value.len(), path = %path.display(), "Stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> EngineResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process storage for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> EngineResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.values
            .lock()
            .map_err(|_| EngineError::ConfigError("memory storage lock poisoned".to_string()))
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> EngineResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> EngineResult<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> EngineResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_storage_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("data"));

        assert_eq!(storage.get("veiculos").unwrap(), None);
        storage.set("veiculos", "[]").unwrap();
        assert_eq!(storage.get("veiculos").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("data").join("veiculos.json").exists());

        storage.set("veiculos", "[1]").unwrap();
        assert_eq!(storage.get("veiculos").unwrap().as_deref(), Some("[1]"));

        storage.remove("veiculos").unwrap();
        assert_eq!(storage.get("veiculos").unwrap(), None);
        // Removing twice is fine.
        storage.remove("veiculos").unwrap();
    }

    #[test]
    fn test_file_storage_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.set("pessoas-cadastradas", "[]").unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["pessoas-cadastradas.json".to_string()]);
    }

    #[test]
    fn test_file_storage_rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());
        assert!(matches!(storage.set("../escape", "x"), Err(EngineError::ConfigError(_))));
    }

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }
}
