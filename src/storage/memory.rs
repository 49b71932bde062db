use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{Storage, StorageError};

/// In-memory storage backend.
///
/// Holds values in a shared map and never fails. Clones see the same data,
/// so two stores over clones of one `MemoryStorage` share a backend. Used as
/// the test double for the store, and usable as an ephemeral backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let values = self.values.lock().unwrap();
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let mut values = self.values.lock().unwrap();
        values.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
