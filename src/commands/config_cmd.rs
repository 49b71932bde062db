use clap::{Args, Subcommand};
use std::fs;
use std::io::Write;

use super::OutputFormat;
use crate::config::Config;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Initialize configuration file
    Init,
}

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            println!(
                                "Config file: {} (not found)",
                                Config::default_config_path().display()
                            );
                        }
                        println!();

                        println!("data_dir: {}", config.data_dir.value.display());
                        println!("  source: {}", config.data_dir.source);
                    }
                }
                Ok(())
            }

            ConfigSubcommand::Init => {
                let config_path = Config::default_config_path();

                // Check if config already exists
                if config_path.exists() {
                    println!("Config file already exists: {}", config_path.display());
                    println!("Use 'tudu config show' to view current configuration.");
                    return Ok(());
                }

                // Create parent directory
                if let Some(parent) = config_path.parent() {
                    fs::create_dir_all(parent)?;
                }

                // Write default config
                let default_config = r#"# tudu configuration

# Directory holding the task list (default: ~/.local/share/tudu)
# data_dir: ~/.local/share/tudu
"#;

                let mut file = fs::File::create(&config_path)?;
                file.write_all(default_config.as_bytes())?;

                println!("Created config file: {}", config_path.display());
                println!("\nEdit this file to customize your settings.");
                Ok(())
            }
        }
    }
}
