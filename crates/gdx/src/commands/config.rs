//! Config command implementation.
//!
//! View configuration settings.
//! Config file is located at ~/.config/gdx/config.toml.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use gamedex_filter::filter::FrozenContext;
use gamedex_model::models::Platform;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CommandContext, CommandError, Result};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Configuration file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Default catalog file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    /// Saved filters file (default: XDG data dir).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<PathBuf>,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Metadata providers and the platforms each one supports.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub providers: BTreeMap<String, Vec<String>>,
}

/// Returns the current config version (used by serde default).
fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            catalog: None,
            filters: None,
            output: OutputConfig::default(),
            providers: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Builds an evaluation context at the current time from the provider table.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::Config` if a provider lists an unknown platform.
    pub fn filter_context(&self) -> Result<FrozenContext> {
        let mut context = FrozenContext::at_now();
        for (provider, names) in &self.providers {
            let platforms = names
                .iter()
                .map(|name| {
                    name.parse::<Platform>().map_err(|e| {
                        CommandError::Config(format!("providers.{provider}: {e}"))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            context = context.with_provider(provider.clone(), platforms);
        }
        Ok(context)
    }
}

/// Output configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

/// Gets the config file path.
/// Uses XDG-style paths: ~/.config/gdx/config.toml on all platforms.
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var("GDX_CONFIG") {
        return Ok(PathBuf::from(path));
    }

    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("gdx").join("config.toml"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("gdx").join("config.toml"))
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Loads the configuration from disk. A missing file yields the defaults.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {e}")))?;

    parse_config(&content)
}

/// Parses config text and migrates it to the current schema.
fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {e}")))?;

    migrate_config(config)
}

/// Migrates config to current version if needed.
/// Returns the config as-is if already at current version.
fn migrate_config(mut config: Config) -> Result<Config> {
    if config.version > CONFIG_VERSION {
        return Err(CommandError::Config(format!(
            "config version {} is newer than supported version {CONFIG_VERSION}",
            config.version
        )));
    }

    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;
    let config = &ctx.config;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{header}\n");
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());

        if !path.exists() {
            println!("(No config file exists. Defaults are in use.)");
            return Ok(());
        }

        println!("Settings:");
        if let Some(ref catalog) = config.catalog {
            println!("  catalog: {}", catalog.display());
        }
        if let Some(ref filters) = config.filters {
            println!("  filters: {}", filters.display());
        }

        println!("\n[output]");
        if let Some(color) = config.output.color {
            println!("  color: {color}");
        }

        println!("\n[providers]");
        for (provider, platforms) in &config.providers {
            println!("  {provider}: {}", platforms.join(", "));
        }
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamedex_filter::filter::FilterContext;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(config.catalog.is_none());
        assert!(config.filters.is_none());
        assert!(config.output.color.is_none());
        assert!(config.providers.is_empty());
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
version = 1
catalog = "/games/library.json"

[output]
color = false

[providers]
igdb = ["pc", "switch"]
steam = ["PC", "mac", "linux"]
"#;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.version, 1);
        assert_eq!(config.catalog, Some(PathBuf::from("/games/library.json")));
        assert_eq!(config.output.color, Some(false));
        assert_eq!(config.providers.len(), 2);
        assert_eq!(config.providers["igdb"], vec!["pc", "switch"]);
    }

    #[test]
    fn test_config_deserialization_empty() {
        let config = parse_config("").unwrap();
        // Missing version defaults to current version
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(config.catalog.is_none());
    }

    #[test]
    fn test_config_serialization_skips_unset() {
        let config = Config {
            catalog: Some(PathBuf::from("lib.json")),
            ..Config::default()
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("version = 1"));
        assert!(toml_str.contains("catalog = \"lib.json\""));
        assert!(!toml_str.contains("filters"));
        assert!(!toml_str.contains("[providers]"));
    }

    #[test]
    fn test_parse_config_invalid_toml() {
        let err = parse_config("catalog = [").unwrap_err();
        assert!(matches!(err, CommandError::Config(_)));
    }

    #[test]
    fn test_migrate_rejects_future_version() {
        let err = parse_config("version = 999").unwrap_err();
        assert!(err.to_string().contains("newer than supported"));
    }

    #[test]
    fn test_filter_context_from_providers() {
        let config = parse_config(
            r#"
[providers]
igdb = ["pc", "Switch"]
"#,
        )
        .unwrap();

        let context = config.filter_context().unwrap();
        assert_eq!(context.provider_ids(), vec!["igdb"]);
        assert!(context.supports_provider("igdb", Platform::Pc));
        assert!(context.supports_provider("igdb", Platform::Switch));
        assert!(!context.supports_provider("igdb", Platform::Ps5));
        assert!(!context.supports_provider("steam", Platform::Pc));
    }

    #[test]
    fn test_filter_context_unknown_platform() {
        let config = parse_config(
            r#"
[providers]
igdb = ["pc", "toaster"]
"#,
        )
        .unwrap();

        let err = config.filter_context().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("providers.igdb"));
        assert!(message.contains("toaster"));
    }
}
