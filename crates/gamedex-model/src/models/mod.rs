//! Data types for game library records.
//!
//! These types are the read-only view of the library that the filter engine
//! evaluates against. They are produced by scanners and metadata providers
//! elsewhere and are never mutated by the engine.

mod file_tree;
mod game;
mod platform;

pub use file_tree::*;
pub use game::*;
pub use platform::*;
