//! Command implementations for the gdx CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod check;
pub mod completions;
pub mod config;
pub mod filters;
pub mod games;

use std::fs;
use std::path::{Path, PathBuf};

use gamedex_filter::filter::{codec, Filter, FrozenContext};
use gamedex_filter::FilterStore;
use gamedex_model::catalog::Catalog;
use tracing::debug;

use crate::cli::Cli;
use config::Config;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Filter decoding error.
    #[error("filter error: {0}")]
    Filter(#[from] gamedex_filter::filter::FilterError),

    /// Saved filter store error.
    #[error("store error: {0}")]
    Store(#[from] gamedex_filter::FilterStoreError),

    /// Catalog loading error.
    #[error("catalog error: {0}")]
    Catalog(#[from] gamedex_model::error::ModelError),

    /// A saved filter that does not exist.
    #[error("no saved filter with id '{0}'")]
    FilterNotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Catalog path from the command line or environment.
    pub catalog: Option<PathBuf>,
    /// Loaded configuration.
    pub config: Config,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments and config.
    ///
    /// Colors are disabled by `--no-color`, `NO_COLOR`, or `output.color = false`.
    pub fn from_cli(cli: &Cli, config: Config) -> Self {
        let color_allowed = config.output.color.unwrap_or(true)
            && std::env::var_os("NO_COLOR").is_none();
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && color_allowed,
            quiet: cli.quiet,
            catalog: cli.catalog.clone(),
            config,
        }
    }

    /// Loads the catalog named on the command line, falling back to config.
    pub fn load_catalog(&self) -> Result<Catalog> {
        let path = self
            .catalog
            .as_ref()
            .or(self.config.catalog.as_ref())
            .ok_or_else(|| {
                CommandError::Config(
                    "no catalog given; pass --catalog, set GDX_CATALOG, or set `catalog` in the config file"
                        .to_string(),
                )
            })?;
        debug!(path = %path.display(), "loading catalog");
        Ok(Catalog::load(path)?)
    }

    /// Opens the saved filter store, honoring a `filters` path in config.
    pub fn filter_store(&self) -> Result<FilterStore> {
        match &self.config.filters {
            Some(path) => Ok(FilterStore::with_path(path.clone())),
            None => Ok(FilterStore::new()?),
        }
    }

    /// Builds the evaluation context: the current time plus the provider table
    /// from config.
    pub fn filter_context(&self) -> Result<FrozenContext> {
        self.config.filter_context()
    }
}

/// Reads and decodes a filter file.
pub fn read_filter_file(path: &Path) -> Result<Filter> {
    let contents = fs::read_to_string(path)?;
    Ok(codec::from_json_str(&contents)?)
}
