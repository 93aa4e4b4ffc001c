use clap::{CommandFactory, Parser};
use std::process::ExitCode;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands, ConfigCommands, FiltersCommands};
use commands::config::load_config;
use commands::filters::FilterAddOptions;
use commands::games::GamesOptions;
use commands::{CommandContext, CommandError};
use gamedex_model::error::ModelError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                eprintln!("{error_json:#}");
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn run(cli: &Cli) -> commands::Result<()> {
    let Some(command) = &cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    // Completions never touch the config file.
    if let Commands::Completions { shell } = command {
        return Ok(commands::completions::execute(shell)?);
    }

    let ctx = CommandContext::from_cli(cli, load_config()?);

    match command {
        Commands::Games {
            filter,
            saved,
            negate,
            limit,
        } => commands::games::execute(
            &ctx,
            &GamesOptions {
                filter: filter.clone(),
                saved: saved.clone(),
                negate: *negate,
                limit: *limit,
            },
        ),
        Commands::Check { file } => commands::check::execute(&ctx, file),
        Commands::Filters { command } => match command {
            None | Some(FiltersCommands::List) => commands::filters::execute_list(&ctx),
            Some(FiltersCommands::Show { id }) => commands::filters::execute_show(&ctx, id),
            Some(FiltersCommands::Add { id, file, tag }) => commands::filters::execute_add(
                &ctx,
                &FilterAddOptions {
                    id,
                    file,
                    tag: *tag,
                },
            ),
            Some(FiltersCommands::Delete { id }) => commands::filters::execute_delete(&ctx, id),
            Some(FiltersCommands::Tags) => commands::filters::execute_tags(&ctx),
        },
        Commands::Config { command } => match command {
            None | Some(ConfigCommands::Show) => commands::config::execute_show(&ctx),
            Some(ConfigCommands::Path) => commands::config::execute_path(&ctx),
        },
        Commands::Completions { .. } => Ok(()),
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Filter(_) => "FILTER_ERROR",
        CommandError::Store(_) => "STORE_ERROR",
        CommandError::Catalog(_) => "CATALOG_ERROR",
        CommandError::FilterNotFound(_) => "NOT_FOUND",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    ExitCode::from(exit_status(e))
}

fn exit_status(e: &CommandError) -> u8 {
    match e {
        CommandError::Filter(_) | CommandError::Json(_) => 1,
        CommandError::Catalog(ModelError::Read { .. }) => 3,
        CommandError::Catalog(_) => 1,
        CommandError::Io(_) => 3,
        CommandError::Config(_) | CommandError::Store(_) | CommandError::FilterNotFound(_) => 5,
    }
}
