//! Filter expression engine for game libraries.
//!
//! A [`Filter`] is an immutable predicate tree: `And`/`Or` compounds, a `Not`
//! modifier, and leaf rules comparing one attribute of a
//! [`Game`](gamedex_model::models::Game). Evaluation is total; a rule whose
//! data is missing simply does not match, and for most rules it does not match
//! the rule's negation either.
//!
//! # Node Kinds
//!
//! ## Score Rules
//! - `criticScore`, `userScore`, `avgScore`, `minScore`, `maxScore` - score is known and `>= target`
//!
//! ## Date Rules
//! - `targetReleaseDate`, `targetCreateDate`, `targetUpdateDate` - date is known and on or after a calendar date
//! - `periodReleaseDate`, `periodCreateDate`, `periodUpdateDate` - date is known and within a rolling period
//! - `nullReleaseDate` - release date is unknown
//!
//! ## Identity Rules
//! - `platform`, `library`, `genre`, `tag`, `filterTag`
//! - `provider` - provider applies to the game and has data for it
//!
//! ## File Rules
//! - `fileSize` - scanned tree is at least N bytes
//! - `fileName` - some name in the scanned tree matches a regex
//!
//! ## Boolean Operators
//! - `and`, `or`, `not`, and `true` (the empty filter)
//!
//! # Example
//!
//! ```
//! use gamedex_filter::filter::{Filter, FilterEvaluator, FrozenContext};
//! use gamedex_model::models::{Game, Platform};
//!
//! let filter = Filter::and(
//!     Filter::CriticScore { target: 80.0 },
//!     !Filter::Platform(Platform::Switch),
//! );
//!
//! let context = FrozenContext::at_now();
//! let evaluator = FilterEvaluator::new(&filter, &context);
//!
//! let games = vec![
//!     Game::new("1", "Disco Elysium", Platform::Pc, "lib").with_critic_score(91.0),
//!     Game::new("2", "Astral Chain", Platform::Switch, "lib").with_critic_score(87.0),
//! ];
//! let results = evaluator.filter_games(&games);
//! assert_eq!(results.len(), 1);
//! ```

mod ast;
pub mod codec;
mod context;
mod display;
mod error;
mod evaluator;
mod query;

pub use ast::{FileNamePattern, Filter, FilterKind, Period};
pub use context::{FilterContext, FrozenContext};
pub use error::{FilterError, FilterResult};
pub use evaluator::{evaluate, FilterEvaluator, Partition};
pub use query::{find, has_filter, Rules};

#[cfg(test)]
mod tests;
