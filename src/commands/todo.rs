use clap::Args;

use super::OutputFormat;
use crate::models::Priority;
use crate::storage::Storage;
use crate::store::TodoStore;

#[derive(Args)]
pub struct AddCommand {
    /// Task text (words are joined with spaces)
    #[arg(required = true)]
    pub text: Vec<String>,
}

impl AddCommand {
    pub async fn run<S: Storage>(
        &self,
        store: &mut TodoStore<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match store.add(&self.text.join(" ")).await {
            Some(todo) => {
                println!("Added \"{}\"", todo.text);
                println!("Id: {}", todo.id);
            }
            None => {
                println!("Nothing to add: task text is empty");
            }
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ListCommand {
    pub fn run<S: Storage>(
        &self,
        store: &TodoStore<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let todos = store.todos();

        if todos.is_empty() {
            println!("No tasks. Add one with: tudu add <text>");
            return Ok(());
        }

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(todos)?);
            }
            OutputFormat::Text => {
                println!("{:<36}  {:<3}  {:<8}  TASK", "ID", "", "PRIORITY");
                println!("{}", "-".repeat(80));
                for todo in todos {
                    let check = if todo.completed { "[x]" } else { "[ ]" };
                    // Mark tasks that carry a comment
                    let marker = if todo.comment.is_empty() { "" } else { " *" };
                    println!(
                        "{:<36}  {}  {:<8}  {}{}",
                        todo.id,
                        check,
                        todo.priority.to_string(),
                        todo.text,
                        marker
                    );
                }
                println!(
                    "\nCompleted: {}/{}",
                    store.completed_count(),
                    store.total_count()
                );
            }
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct ToggleCommand {
    /// Task id
    pub id: String,
}

impl ToggleCommand {
    pub async fn run<S: Storage>(
        &self,
        store: &mut TodoStore<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if store.toggle(&self.id).await {
            if let Some(todo) = store.get(&self.id) {
                if todo.completed {
                    println!("Completed \"{}\"", todo.text);
                } else {
                    println!("Reopened \"{}\"", todo.text);
                }
            }
        } else {
            println!("Task not found: {}", self.id);
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct DeleteCommand {
    /// Task id
    pub id: String,
}

impl DeleteCommand {
    pub async fn run<S: Storage>(
        &self,
        store: &mut TodoStore<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if store.delete(&self.id).await {
            println!("Deleted task {}", self.id);
        } else {
            println!("Task not found: {}", self.id);
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct ShowCommand {
    /// Task id
    pub id: String,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ShowCommand {
    pub async fn run<S: Storage>(
        &self,
        store: &TodoStore<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match store.fetch_detail(&self.id).await {
            Some(todo) => {
                match self.format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&todo)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", todo);
                    }
                }
                Ok(())
            }
            None => {
                println!("Task not found: {}", self.id);
                Ok(())
            }
        }
    }
}

#[derive(Args)]
pub struct EditCommand {
    /// Task id
    pub id: String,

    /// New comment
    #[arg(long)]
    pub comment: Option<String>,

    /// New priority (low, medium, high)
    #[arg(long, short)]
    pub priority: Option<String>,
}

impl EditCommand {
    pub async fn run<S: Storage>(
        &self,
        store: &TodoStore<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        // Parse priority up front so a typo fails before any write
        let priority: Option<Priority> = match &self.priority {
            Some(p) => Some(p.parse().map_err(|e: String| e)?),
            None => None,
        };

        // Unspecified fields keep their persisted values
        let current = match store.fetch_detail(&self.id).await {
            Some(todo) => todo,
            None => {
                println!("Task not found: {}", self.id);
                return Ok(());
            }
        };

        let comment = self.comment.as_deref().unwrap_or(&current.comment);
        let priority = priority.unwrap_or(current.priority);

        if store.update_detail(&self.id, comment, priority).await {
            println!("Updated \"{}\"", current.text);
            println!("Priority: {}", priority);
            if !comment.is_empty() {
                println!("Comment: {}", comment);
            }
        } else {
            println!("Task not found: {}", self.id);
        }
        Ok(())
    }
}
