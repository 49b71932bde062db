//! The task store.
//!
//! [`TodoStore`] owns the in-memory ordered task list and keeps it reconciled
//! with a [`Storage`] backend under one fixed key. The whole list is written
//! on every change; there are no partial writes.
//!
//! Storage failures are absorbed: operations log a warning and complete as
//! no-ops rather than surfacing errors to the caller. A task id that doesn't
//! match anything is not an error either; mutations report `false` and leave
//! both memory and storage untouched.
//!
//! The detail-view operations ([`TodoStore::fetch_detail`] and
//! [`TodoStore::update_detail`]) deliberately bypass the in-memory list and
//! work against the persisted copy. The detail view runs in a separate view
//! context from the list; merging into the freshly-read persisted state keeps
//! list-side edits made in the meantime. The two paths share no lock, so
//! between a list-side save and a detail-side write, last writer wins.

use crate::models::{Priority, Todo};
use crate::storage::{Storage, StorageError};

/// Fixed storage key for the serialized task list.
pub const STORAGE_KEY: &str = "todos";

/// Owns the task list and its reconciliation with persistent storage.
///
/// Construct one per process and pass it by reference to whichever view
/// needs it.
pub struct TodoStore<S> {
    storage: S,
    todos: Vec<Todo>,
}

impl<S: Storage> TodoStore<S> {
    /// Creates a store with an empty in-memory list. Call [`load`](Self::load)
    /// to populate it from storage.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            todos: Vec::new(),
        }
    }

    /// Loads the persisted task list into memory.
    ///
    /// An absent key yields the empty list. Read or parse failures are
    /// logged and also yield the empty list; this never fails.
    pub async fn load(&mut self) {
        self.todos = match self.read_collection().await {
            Ok(todos) => {
                tracing::debug!("Loaded {} task(s)", todos.len());
                todos
            }
            Err(e) => {
                tracing::warn!("Failed to load task list: {}", e);
                Vec::new()
            }
        };
    }

    /// Adds a new task at the head of the list (newest first) and persists.
    ///
    /// Input is trimmed; blank input is a no-op returning `None`. Returns a
    /// snapshot of the created task otherwise.
    pub async fn add(&mut self, text: &str) -> Option<Todo> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let todo = Todo::new(text);
        self.todos.insert(0, todo.clone());
        self.persist().await;
        Some(todo)
    }

    /// Flips the completed flag of the task matching `id` and persists.
    ///
    /// Returns `false` without writing if no task matches.
    pub async fn toggle(&mut self, id: &str) -> bool {
        match self.todos.iter_mut().find(|t| t.id == id) {
            Some(todo) => {
                todo.completed = !todo.completed;
            }
            None => return false,
        }
        self.persist().await;
        true
    }

    /// Removes the task matching `id` and persists.
    ///
    /// Returns `false` without writing if no task matches.
    pub async fn delete(&mut self, id: &str) -> bool {
        let len_before = self.todos.len();
        self.todos.retain(|t| t.id != id);
        if self.todos.len() == len_before {
            return false;
        }
        self.persist().await;
        true
    }

    /// Reads a fresh snapshot of the task matching `id` from storage.
    ///
    /// This is the detail view's read path: it sources from the persisted
    /// copy, not the in-memory list.
    pub async fn fetch_detail(&self, id: &str) -> Option<Todo> {
        match self.read_collection().await {
            Ok(todos) => todos.into_iter().find(|t| t.id == id),
            Err(e) => {
                tracing::warn!("Failed to load task list: {}", e);
                None
            }
        }
    }

    /// Overwrites the comment and priority of the task matching `id`.
    ///
    /// Re-reads the persisted list, merges the change into it, and writes the
    /// result back. The in-memory list is not consulted or modified, so
    /// list-side edits persisted while a detail view was open are kept. All
    /// other fields of the task are preserved. Returns `false` without
    /// writing if no task matches or the persisted list cannot be read.
    pub async fn update_detail(&self, id: &str, comment: &str, priority: Priority) -> bool {
        let mut todos = match self.read_collection().await {
            Ok(todos) => todos,
            Err(e) => {
                tracing::warn!("Failed to load task list: {}", e);
                return false;
            }
        };

        match todos.iter_mut().find(|t| t.id == id) {
            Some(todo) => {
                todo.comment = comment.to_string();
                todo.priority = priority;
            }
            None => return false,
        }

        match self.write_collection(&todos).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to save task list: {}", e);
                false
            }
        }
    }

    /// Serializes the full in-memory list and writes it under the fixed key,
    /// replacing any prior value.
    pub async fn save(&self) -> Result<(), StoreError> {
        self.write_collection(&self.todos).await
    }

    /// The current in-memory list, newest first.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Looks up a task in the in-memory list.
    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Number of completed tasks in the in-memory list.
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }

    /// Total number of tasks in the in-memory list.
    pub fn total_count(&self) -> usize {
        self.todos.len()
    }

    async fn persist(&self) {
        if let Err(e) = self.save().await {
            tracing::warn!("Failed to save task list: {}", e);
        }
    }

    async fn read_collection(&self) -> Result<Vec<Todo>, StoreError> {
        let bytes = self
            .storage
            .get(STORAGE_KEY)
            .await
            .map_err(StoreError::StorageError)?;

        match bytes {
            Some(bytes) => serde_json::from_slice(&bytes).map_err(StoreError::JsonError),
            None => Ok(Vec::new()),
        }
    }

    async fn write_collection(&self, todos: &[Todo]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(todos).map_err(StoreError::JsonError)?;
        self.storage
            .set(STORAGE_KEY, &bytes)
            .await
            .map_err(StoreError::StorageError)
    }
}

/// Errors that can occur reading or writing the task list.
#[derive(Debug)]
pub enum StoreError {
    /// Error from the storage backend.
    StorageError(StorageError),
    /// Error serializing or deserializing the task list.
    JsonError(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::StorageError(e) => write!(f, "Storage error: {}", e),
            StoreError::JsonError(e) => write!(f, "Task list format error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::StorageError(e) => Some(e),
            StoreError::JsonError(e) => Some(e),
        }
    }
}
