//! Output formatting utilities for the gdx CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules by entity type:
//!
//! - [`games`] - Game list output (games command)
//! - [`filters`] - Saved filter, check and tag output
//! - [`helpers`] - Common formatting utilities (truncation, scores, dates)

mod filters;
mod games;
pub mod helpers;

// Games
pub use games::{format_games_json, format_games_table};

// Filters
pub use filters::{
    format_check_json, format_check_table, format_deleted_filter, format_filter_details_json,
    format_filter_details_table, format_filters_json, format_filters_table, format_saved_filter,
    format_tags_json, format_tags_table,
};
