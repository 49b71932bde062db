mod config_cmd;
mod todo;

pub use config_cmd::ConfigCommand;
pub use todo::{
    AddCommand, DeleteCommand, EditCommand, ListCommand, ShowCommand, ToggleCommand,
};

use clap::ValueEnum;

/// Output format for commands that render data
#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
