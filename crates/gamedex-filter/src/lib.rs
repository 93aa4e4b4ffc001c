//! Filter engine for gamedex game libraries.
//!
//! This crate evaluates boolean filter trees against
//! [`Game`](gamedex_model::models::Game) records and persists saved filters.
//!
//! - [`filter`] - the filter AST, evaluation, structural queries and JSON codec
//! - [`NamedFilter`] - a saved filter with identity and timestamps
//! - [`FilterStore`] - JSON file storage for saved filters

pub mod filter;
mod named;
mod store;

pub use named::{filter_tags_for, NamedFilter};
pub use store::{FilterStore, FilterStoreError};
