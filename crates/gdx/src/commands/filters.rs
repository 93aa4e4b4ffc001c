//! Saved filter commands.
//!
//! List, show, add and delete filters in the [`FilterStore`], and report
//! which tag filters match each catalog game.

use std::path::Path;

use gamedex_filter::filter::FrozenContext;
use gamedex_filter::{filter_tags_for, FilterStore, NamedFilter};
use gamedex_model::models::Game;
use serde::Serialize;
use tracing::info;

use super::{read_filter_file, CommandContext, CommandError, Result};
use crate::output::{
    format_deleted_filter, format_filter_details_json, format_filter_details_table,
    format_filters_json, format_filters_table, format_saved_filter, format_tags_json,
    format_tags_table,
};

/// Filter tags computed for one game.
#[derive(Debug, Serialize)]
pub struct GameTags<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub tags: Vec<String>,
}

/// Executes the filters list command.
pub fn execute_list(ctx: &CommandContext) -> Result<()> {
    let filters = ctx.filter_store()?.load()?;

    if ctx.json_output {
        println!("{}", format_filters_json(&filters)?);
    } else if !ctx.quiet {
        print!("{}", format_filters_table(&filters, ctx.use_colors));
    }

    Ok(())
}

/// Executes the filters show command.
pub fn execute_show(ctx: &CommandContext, id: &str) -> Result<()> {
    let named = ctx
        .filter_store()?
        .get(id)?
        .ok_or_else(|| CommandError::FilterNotFound(id.to_string()))?;

    if ctx.json_output {
        println!("{}", format_filter_details_json(&named)?);
    } else if !ctx.quiet {
        print!("{}", format_filter_details_table(&named, ctx.use_colors));
    }

    Ok(())
}

/// Options for the filters add command.
#[derive(Debug)]
pub struct FilterAddOptions<'a> {
    /// Filter id.
    pub id: &'a str,
    /// Filter file to decode.
    pub file: &'a Path,
    /// Whether the filter produces tags.
    pub tag: bool,
}

/// Executes the filters add command.
///
/// An existing filter with the same id has its expression replaced; its
/// creation time is kept.
pub fn execute_add(ctx: &CommandContext, opts: &FilterAddOptions<'_>) -> Result<()> {
    let filter = read_filter_file(opts.file)?;
    let store = ctx.filter_store()?;

    let named = if opts.tag {
        NamedFilter::tag(opts.id, filter)
    } else {
        NamedFilter::new(opts.id, filter)
    };
    let saved = store.upsert(named)?;
    info!(id = %saved.id, path = %store.path().display(), "saved filter");

    if ctx.json_output {
        println!("{}", format_saved_filter(&saved)?);
    } else if !ctx.quiet {
        println!("Saved filter '{}': {}", saved.id, saved.filter);
    }

    Ok(())
}

/// Executes the filters delete command.
pub fn execute_delete(ctx: &CommandContext, id: &str) -> Result<()> {
    let store = ctx.filter_store()?;
    if !store.remove(id)? {
        return Err(CommandError::FilterNotFound(id.to_string()));
    }

    if ctx.json_output {
        println!("{}", format_deleted_filter(id)?);
    } else if !ctx.quiet {
        println!("Deleted filter '{id}'");
    }

    Ok(())
}

/// Executes the filters tags command.
pub fn execute_tags(ctx: &CommandContext) -> Result<()> {
    let store = ctx.filter_store()?;
    let catalog = ctx.load_catalog()?;
    let context = ctx.filter_context()?;

    let tags = compute_tags(&store, &catalog.games, &context)?;

    if ctx.json_output {
        println!("{}", format_tags_json(&tags)?);
    } else if !ctx.quiet {
        print!("{}", format_tags_table(&tags, ctx.use_colors));
    }

    Ok(())
}

fn compute_tags<'a>(
    store: &FilterStore,
    games: &'a [Game],
    context: &FrozenContext,
) -> Result<Vec<GameTags<'a>>> {
    let filters = store.load()?;
    Ok(games
        .iter()
        .map(|game| GameTags {
            id: &game.id,
            name: &game.name,
            tags: filter_tags_for(game, &filters, context),
        })
        .collect())
}
