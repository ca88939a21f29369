//! CLI argument definitions for the Nyumba application.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Nyumba - chat-driven rental search.
#[derive(Parser, Debug)]
#[command(name = "nyumba", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Data directory for the favorites database.
    #[arg(short = 'd', long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Interactive chat session (default).
    Chat,
    /// Extract filters from one message and list matching properties.
    Search {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Apply keyword presets ("budget", "family", ...) and list matches.
    SmartSearch {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// List properties.
    List {
        /// Only listings owned by this landlord id.
        #[arg(long)]
        landlord: Option<String>,
        /// Only listings of this type (apartment, house, studio, bedsitter).
        #[arg(long = "type")]
        kind: Option<String>,
        /// Hide listings that are not available.
        #[arg(long)]
        available: bool,
    },
    /// Manage favorite properties.
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum FavoritesAction {
    /// Add the property if absent, remove it otherwise.
    Toggle { id: String },
    /// Show favorite properties.
    List,
}

impl CliArgs {
    /// Subcommand to run, `Chat` when none was given.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Chat)
    }

    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > NYUMBA_CONFIG env var > ~/.nyumba/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("NYUMBA_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// `None` if not overridden (use config value).
    pub fn resolve_data_dir(&self) -> Option<String> {
        self.data_dir
            .as_ref()
            .map(|p| p.to_string_lossy().to_string())
    }

    pub fn resolve_log_level(&self) -> Option<String> {
        self.log_level.clone()
    }
}

fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".nyumba").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".nyumba").join("config.toml");
    }
    PathBuf::from("config.toml")
}
