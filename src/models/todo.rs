use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::Priority;

/// A single task entry.
///
/// The serialized field names match the persisted list format, so lists
/// written by earlier versions of the app load unchanged. `id` is an opaque
/// string token; new records get a UUID but any unique string is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub comment: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Create a new pending task with default priority and no comment.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            completed: false,
            priority: Priority::default(),
            comment: String::new(),
            created_at: Utc::now(),
        }
    }
}

impl fmt::Display for Todo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.text)?;
        writeln!(f, "{}", "=".repeat(self.text.chars().count()))?;
        writeln!(f, "Id: {}", self.id)?;
        writeln!(
            f,
            "Status: {}",
            if self.completed { "done" } else { "pending" }
        )?;
        writeln!(f, "Priority: {}", self.priority)?;
        writeln!(f, "Created: {}", self.created_at.format("%Y-%m-%d %H:%M UTC"))?;

        if !self.comment.is_empty() {
            writeln!(f, "\nComment:")?;
            writeln!(f, "  {}", self.comment)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_new() {
        let todo = Todo::new("Buy milk");

        assert_eq!(todo.text, "Buy milk");
        assert!(!todo.completed);
        assert_eq!(todo.priority, Priority::Medium);
        assert!(todo.comment.is_empty());
        assert!(!todo.id.is_empty());
    }

    #[test]
    fn test_todo_ids_are_unique() {
        let a = Todo::new("a");
        let b = Todo::new("b");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_todo_display() {
        let mut todo = Todo::new("Walk the dog");
        todo.comment = "before 6pm".to_string();

        let output = format!("{}", todo);
        assert!(output.contains("Walk the dog"));
        assert!(output.contains("Status: pending"));
        assert!(output.contains("Priority: medium"));
        assert!(output.contains("before 6pm"));
    }

    #[test]
    fn test_todo_json_roundtrip() {
        let todo = Todo::new("Buy milk");

        let json = serde_json::to_string(&todo).unwrap();
        let parsed: Todo = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.id, todo.id);
        assert_eq!(parsed.text, todo.text);
        assert_eq!(parsed.completed, todo.completed);
        assert_eq!(parsed.priority, todo.priority);
        assert_eq!(parsed.created_at, todo.created_at);
    }

    #[test]
    fn test_todo_created_at_serializes_as_created_at_camel_case() {
        let todo = Todo::new("Buy milk");
        let json = serde_json::to_string(&todo).unwrap();
        assert!(json.contains("\"createdAt\""));
    }

    #[test]
    fn test_todo_loads_sparse_record() {
        // A record written by an earlier version of the app: time-based id,
        // no comment, unknown priority value.
        let json = r#"{
            "id": "1699999999999",
            "text": "Old task",
            "completed": true,
            "priority": "urgent",
            "createdAt": "2023-11-14T22:13:19.999Z"
        }"#;

        let parsed: Todo = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.id, "1699999999999");
        assert!(parsed.completed);
        assert_eq!(parsed.priority, Priority::Medium);
        assert!(parsed.comment.is_empty());
    }

    #[test]
    fn test_todo_loads_record_without_priority() {
        let json = r#"{
            "id": "1700000000000",
            "text": "Older task",
            "createdAt": "2023-11-14T22:13:20.000Z"
        }"#;

        let parsed: Todo = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.priority, Priority::Medium);
        assert!(!parsed.completed);
    }
}
