//! Key-value persistence for the task list.
//!
//! The store talks to storage through the [`Storage`] trait: an asynchronous
//! get/set-by-key byte-string interface with one fixed key per collection.
//! Backends: [`FileStorage`] for on-disk persistence, [`MemoryStorage`] for
//! tests and ephemeral use.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;
use std::io;
use std::path::PathBuf;

/// Asynchronous key-value byte store.
///
/// An absent key is `Ok(None)`, not an error. `set` replaces the value
/// under the key in full.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Reads the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Writes `value` under `key`, replacing any prior value.
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;
}

/// Errors that can occur during storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error reading or writing the backing file.
    IoError(PathBuf, io::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::IoError(path, e) => {
                write!(f, "I/O error for {}: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::IoError(_, e) => Some(e),
        }
    }
}
