use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod models;
mod storage;
mod store;

use commands::{
    AddCommand, ConfigCommand, DeleteCommand, EditCommand, ListCommand, ShowCommand, ToggleCommand,
};
use config::Config;
use storage::FileStorage;
use store::TodoStore;

#[derive(Parser)]
#[command(name = "tudu")]
#[command(version)]
#[command(about = "A to-do list CLI application", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add(AddCommand),

    /// List tasks with completion stats
    List(ListCommand),

    /// Toggle a task between pending and done
    Toggle(ToggleCommand),

    /// Delete a task
    Delete(DeleteCommand),

    /// Show task details
    Show(ShowCommand),

    /// Edit a task's comment and priority
    Edit(EditCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tudu=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Add(cmd)) => {
            let mut store = open_store(&config).await;
            cmd.run(&mut store).await?;
        }
        Some(Commands::List(cmd)) => {
            let store = open_store(&config).await;
            cmd.run(&store)?;
        }
        Some(Commands::Toggle(cmd)) => {
            let mut store = open_store(&config).await;
            cmd.run(&mut store).await?;
        }
        Some(Commands::Delete(cmd)) => {
            let mut store = open_store(&config).await;
            cmd.run(&mut store).await?;
        }
        Some(Commands::Show(cmd)) => {
            let store = open_store(&config).await;
            cmd.run(&store).await?;
        }
        Some(Commands::Edit(cmd)) => {
            let store = open_store(&config).await;
            cmd.run(&store).await?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

/// One store per process, loaded from the configured data directory.
async fn open_store(config: &Config) -> TodoStore<FileStorage> {
    let storage = FileStorage::new(config.data_dir.value.clone());
    let mut store = TodoStore::new(storage);
    store.load().await;
    store
}
