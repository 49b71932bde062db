use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::{Storage, StorageError};

/// Filesystem-backed storage.
///
/// Each key is stored as `<key>.json` under the data directory. The
/// directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    data_dir: PathBuf,
}

impl FileStorage {
    /// Creates a new storage instance rooted at `data_dir`.
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Returns the full path for a key.
    pub fn path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path(key);

        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::IoError(path, e)),
        }
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|e| StorageError::IoError(self.data_dir.clone(), e))?;

        let path = self.path(key);
        fs::write(&path, value)
            .await
            .map_err(|e| StorageError::IoError(path, e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_storage() -> (FileStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().to_path_buf());
        (storage, temp_dir)
    }

    #[test]
    fn test_storage_path() {
        let (storage, _temp) = test_storage();
        let path = storage.path("todos");
        assert!(path.ends_with("todos.json"));
    }

    #[tokio::test]
    async fn test_get_nonexistent_returns_none() {
        let (storage, _temp) = test_storage();
        let result = storage.get("todos").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_set_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested_dir = temp_dir.path().join("nested").join("data");
        let storage = FileStorage::new(nested_dir.clone());

        storage.set("todos", b"[]").await.unwrap();

        assert!(nested_dir.exists());
        assert!(storage.path("todos").exists());
    }

    #[tokio::test]
    async fn test_set_and_get_roundtrip() {
        let (storage, _temp) = test_storage();

        storage.set("todos", b"[1,2,3]").await.unwrap();

        let loaded = storage.get("todos").await.unwrap().unwrap();
        assert_eq!(loaded, b"[1,2,3]");
    }

    #[tokio::test]
    async fn test_set_overwrites_existing_value() {
        let (storage, _temp) = test_storage();

        storage.set("todos", b"first").await.unwrap();
        storage.set("todos", b"second").await.unwrap();

        let loaded = storage.get("todos").await.unwrap().unwrap();
        assert_eq!(loaded, b"second");
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let (storage, _temp) = test_storage();

        storage.set("todos", b"tasks").await.unwrap();
        storage.set("other", b"other data").await.unwrap();

        assert_eq!(storage.get("todos").await.unwrap().unwrap(), b"tasks");
        assert_eq!(storage.get("other").await.unwrap().unwrap(), b"other data");
    }
}
