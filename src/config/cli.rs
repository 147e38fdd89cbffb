use crate::config::toml_config::DirectoryConfig;
use crate::utils::error::{DirectoryError, Result};
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::Path;

/// Read when present and no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "teldir.toml";

#[derive(Debug, Clone, Parser)]
#[command(name = "teldir")]
#[command(about = "A telephone directory kept sorted by surname")]
pub struct CliConfig {
    /// Directory file, overrides `store.path`
    #[arg(short, long)]
    pub file: Option<String>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Save immediately after removing a phone number
    #[arg(long)]
    pub persist_on_remove: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Add a new subscriber
    Add {
        surname: String,
        name: String,
        phone: String,
    },
    /// Delete a subscriber
    Delete { surname: String, name: String },
    /// Add a phone number to a subscriber
    AddNumber {
        surname: String,
        name: String,
        phone: String,
    },
    /// Remove a phone number from a subscriber
    RemoveNumber {
        surname: String,
        name: String,
        phone: String,
    },
    /// Display a subscriber's phone numbers
    Show { surname: String, name: String },
    /// Display all subscribers
    List {
        #[arg(long)]
        json: bool,
    },
    /// Interactive menu (default)
    Menu,
}

impl CliConfig {
    /// Loads the TOML layer and applies command-line overrides on top.
    pub fn resolve(&self) -> Result<DirectoryConfig> {
        let mut config = match &self.config {
            Some(path) => DirectoryConfig::from_file(path).map_err(|e| {
                DirectoryError::ConfigError {
                    message: format!("cannot load '{}': {}", path, e),
                }
            })?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                DirectoryConfig::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => DirectoryConfig::default(),
        };

        if let Some(file) = &self.file {
            config.store.path = file.clone();
        }
        if self.persist_on_remove {
            config.behavior.persist_on_remove = true;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Menu)
    }
}
