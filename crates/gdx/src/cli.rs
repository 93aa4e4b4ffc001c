//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the gdx CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// gdx - Filter and tag a game library from the command line
#[derive(Parser, Debug)]
#[command(name = "gdx")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Catalog file to evaluate against (default: from config)
    #[arg(long, global = true, env = "GDX_CATALOG")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List games in the catalog that match a filter
    #[command(alias = "g")]
    Games {
        /// Filter file (JSON)
        #[arg(short, long, conflicts_with = "saved")]
        filter: Option<PathBuf>,

        /// Use a saved filter by id
        #[arg(short, long)]
        saved: Option<String>,

        /// List games matching the filter's negation instead
        #[arg(long)]
        negate: bool,

        /// Limit results
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Validate a filter file and describe it
    Check {
        /// Filter file (JSON)
        file: PathBuf,
    },

    /// Manage saved filters
    #[command(alias = "f")]
    Filters {
        #[command(subcommand)]
        command: Option<FiltersCommands>,
    },

    /// View configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Saved filter subcommands
#[derive(Subcommand, Debug)]
pub enum FiltersCommands {
    /// List all saved filters (default)
    List,

    /// Show a saved filter
    Show {
        /// Filter id
        id: String,
    },

    /// Save a filter from a file, replacing any filter with the same id
    Add {
        /// Filter id
        id: String,

        /// Filter file (JSON)
        #[arg(long)]
        file: PathBuf,

        /// Tag matching games with this filter's id
        #[arg(long)]
        tag: bool,
    },

    /// Delete a saved filter
    #[command(alias = "rm")]
    Delete {
        /// Filter id
        id: String,
    },

    /// Show which tag filters match each game in the catalog
    Tags,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Show config file path
    Path,
}
