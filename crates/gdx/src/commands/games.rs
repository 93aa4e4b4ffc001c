//! Games command implementation.
//!
//! Evaluates a filter against every game in the catalog and lists the matches.

use std::path::PathBuf;

use gamedex_filter::filter::{Filter, FilterEvaluator};
use gamedex_model::models::Game;
use tracing::debug;

use super::{read_filter_file, CommandContext, CommandError, Result};
use crate::output::{format_games_json, format_games_table};

/// Options for the games command.
#[derive(Debug, Default)]
pub struct GamesOptions {
    /// Filter file to evaluate.
    pub filter: Option<PathBuf>,
    /// Saved filter id to evaluate.
    pub saved: Option<String>,
    /// List games matching the negation instead.
    pub negate: bool,
    /// Maximum number of games to print.
    pub limit: Option<usize>,
}

/// Executes the games command.
///
/// Without `--filter` or `--saved` the empty filter is used, so every game is
/// listed (and `--negate` lists none).
///
/// # Errors
///
/// Returns an error if the catalog, filter file or saved filter cannot be loaded.
pub fn execute(ctx: &CommandContext, opts: &GamesOptions) -> Result<()> {
    let filter = resolve_filter(ctx, opts)?;
    let catalog = ctx.load_catalog()?;
    let context = ctx.filter_context()?;

    let evaluator = FilterEvaluator::new(&filter, &context);
    let matched = if opts.negate {
        evaluator.filter_games_not(&catalog.games)
    } else {
        evaluator.filter_games(&catalog.games)
    };

    let total = matched.len();
    let shown = apply_limit(matched, opts.limit);
    debug!(total, shown = shown.len(), negate = opts.negate, "games selected");

    if ctx.json_output {
        println!(
            "{}",
            format_games_json(&shown, filter.to_string(), opts.negate, total)?
        );
    } else if !ctx.quiet {
        print!("{}", format_games_table(&shown, total, ctx.use_colors));
    }

    Ok(())
}

/// Picks the filter from a file, a saved id, or falls back to the empty filter.
fn resolve_filter(ctx: &CommandContext, opts: &GamesOptions) -> Result<Filter> {
    if let Some(path) = &opts.filter {
        return read_filter_file(path);
    }

    if let Some(id) = &opts.saved {
        let store = ctx.filter_store()?;
        return store
            .get(id)?
            .map(|named| named.filter)
            .ok_or_else(|| CommandError::FilterNotFound(id.clone()));
    }

    Ok(Filter::empty())
}

fn apply_limit(mut games: Vec<&Game>, limit: Option<usize>) -> Vec<&Game> {
    if let Some(limit) = limit {
        games.truncate(limit);
    }
    games
}
