//! Filter evaluation against game records.
//!
//! Every node answers two questions: does the game match ([`Filter::evaluate`]),
//! and does the game match the node's negation ([`Filter::evaluate_not`]).
//! The second is not always `!evaluate`. Compounds push negation down to their
//! children (De Morgan), and several rules treat a missing value as matching
//! neither side, so `Not(rule)` never matches a game just because data is absent.
//!
//! # Example
//!
//! ```
//! use gamedex_filter::filter::{Filter, FilterEvaluator, FrozenContext};
//! use gamedex_model::models::{Game, Platform};
//!
//! let filter = Filter::negate(Filter::CriticScore { target: 60.0 });
//! let context = FrozenContext::at_now();
//! let evaluator = FilterEvaluator::new(&filter, &context);
//!
//! let unscored = Game::new("1", "Unscored", Platform::Pc, "lib");
//! let panned = Game::new("2", "Panned", Platform::Pc, "lib").with_critic_score(40.0);
//!
//! // A missing score is not "below 60".
//! assert!(!evaluator.matches(&unscored));
//! assert!(evaluator.matches(&panned));
//! ```

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use gamedex_model::models::Game;
use tracing::debug;

use super::ast::{Filter, Period};
use super::context::FilterContext;

/// Evaluates `filter` against `game`.
pub fn evaluate<C: FilterContext + ?Sized>(filter: &Filter, game: &Game, context: &C) -> bool {
    filter.evaluate(game, context)
}

impl Filter {
    /// Returns true if the game matches this filter.
    pub fn evaluate<C: FilterContext + ?Sized>(&self, game: &Game, context: &C) -> bool {
        match self {
            Filter::True => true,

            // Compound / modifier
            Filter::And(children) => children.iter().all(|f| f.evaluate(game, context)),
            Filter::Or(children) => children.iter().any(|f| f.evaluate(game, context)),
            Filter::Not(inner) => inner.evaluate_not(game, context),

            // Score rules
            Filter::CriticScore { target } => target_score(game.critic_score, *target),
            Filter::UserScore { target } => target_score(game.user_score, *target),
            Filter::AvgScore { target } => target_score(game.avg_score(), *target),
            Filter::MinScore { target } => target_score(game.min_score(), *target),
            Filter::MaxScore { target } => target_score(game.max_score(), *target),

            // Date rules
            Filter::TargetReleaseDate { date } => target_date(game.release_date, *date),
            Filter::TargetCreateDate { date } => target_date(calendar_date(game.created_at), *date),
            Filter::TargetUpdateDate { date } => target_date(calendar_date(game.updated_at), *date),
            Filter::PeriodReleaseDate { period } => {
                period_date(release_instant(game), *period, context)
            }
            Filter::PeriodCreateDate { period } => period_date(game.created_at, *period, context),
            Filter::PeriodUpdateDate { period } => period_date(game.updated_at, *period, context),
            Filter::NullReleaseDate => game.release_date.is_none(),

            // Identity rules
            Filter::Platform(platform) => game.platform == *platform,
            Filter::Library(id) => game.library_id == *id,
            Filter::Genre(id) => game.genre_ids.contains(id),
            Filter::Tag(id) => game.tag_ids.contains(id),
            Filter::FilterTag(id) => game.filter_tag_ids.contains(id),
            Filter::Provider(id) => provider_applies(game, id, context) && game.has_provider_data(id),

            // File rules
            Filter::FileSize { bytes } => game
                .file_tree
                .as_ref()
                .is_some_and(|tree| tree.total_size() >= *bytes),
            Filter::FileName(pattern) => game
                .file_tree
                .as_ref()
                .is_some_and(|tree| tree.walk().any(|node| pattern.is_match(&node.name))),
        }
    }

    /// Returns true if the game matches the negation of this filter.
    ///
    /// Only the nodes listed below differ from `!self.evaluate(..)`.
    pub fn evaluate_not<C: FilterContext + ?Sized>(&self, game: &Game, context: &C) -> bool {
        match self {
            Filter::And(children) => children.iter().any(|f| f.evaluate_not(game, context)),
            Filter::Or(children) => children.iter().all(|f| f.evaluate_not(game, context)),
            Filter::Not(inner) => inner.evaluate(game, context),

            Filter::CriticScore { target } => target_score_not(game.critic_score, *target),
            Filter::UserScore { target } => target_score_not(game.user_score, *target),
            Filter::AvgScore { target } => target_score_not(game.avg_score(), *target),
            Filter::MinScore { target } => target_score_not(game.min_score(), *target),
            Filter::MaxScore { target } => target_score_not(game.max_score(), *target),

            Filter::TargetReleaseDate { date } => target_date_not(game.release_date, *date),
            Filter::TargetCreateDate { date } => {
                target_date_not(calendar_date(game.created_at), *date)
            }
            Filter::TargetUpdateDate { date } => {
                target_date_not(calendar_date(game.updated_at), *date)
            }
            Filter::PeriodReleaseDate { period } => {
                period_date_not(release_instant(game), *period, context)
            }
            Filter::PeriodCreateDate { period } => {
                period_date_not(game.created_at, *period, context)
            }
            Filter::PeriodUpdateDate { period } => {
                period_date_not(game.updated_at, *period, context)
            }

            Filter::Provider(id) => {
                provider_applies(game, id, context) && !game.has_provider_data(id)
            }

            _ => !self.evaluate(game, context),
        }
    }
}

/// Score is known and at least `target`.
fn target_score(score: Option<f64>, target: f64) -> bool {
    score.is_some_and(|s| s >= target)
}

/// Negated score rule.
///
/// With a positive target the negation is "known and below target". Any known
/// score satisfies a zero target, so its negation means "no score".
fn target_score_not(score: Option<f64>, target: f64) -> bool {
    if target > 0.0 {
        score.is_some_and(|s| s < target)
    } else {
        score.is_none()
    }
}

fn target_date(date: Option<NaiveDate>, target: NaiveDate) -> bool {
    date.is_some_and(|d| d >= target)
}

fn target_date_not(date: Option<NaiveDate>, target: NaiveDate) -> bool {
    date.is_some_and(|d| d < target)
}

fn period_date<C: FilterContext + ?Sized>(
    at: Option<DateTime<Utc>>,
    period: Period,
    context: &C,
) -> bool {
    at.is_some_and(|t| t >= period.window_start(context.now()))
}

fn period_date_not<C: FilterContext + ?Sized>(
    at: Option<DateTime<Utc>>,
    period: Period,
    context: &C,
) -> bool {
    at.is_some_and(|t| t < period.window_start(context.now()))
}

/// The provider can serve this game and the user has not excluded it.
fn provider_applies<C: FilterContext + ?Sized>(game: &Game, provider_id: &str, context: &C) -> bool {
    context.supports_provider(provider_id, game.platform) && !game.is_provider_excluded(provider_id)
}

fn calendar_date(at: Option<DateTime<Utc>>) -> Option<NaiveDate> {
    at.map(|t| t.date_naive())
}

/// Release dates are calendar dates; period rules compare them at midnight UTC.
fn release_instant(game: &Game) -> Option<DateTime<Utc>> {
    game.release_date
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

/// Evaluates one filter against many games.
///
/// The evaluator borrows a [`Filter`] and a [`FilterContext`] so the same
/// context (and therefore the same `now`) is used for every game in a batch.
pub struct FilterEvaluator<'a> {
    filter: &'a Filter,
    context: &'a dyn FilterContext,
}

impl<'a> FilterEvaluator<'a> {
    /// Creates a new filter evaluator.
    ///
    /// # Arguments
    ///
    /// * `filter` - The filter to evaluate
    /// * `context` - Clock and provider capabilities for this batch
    pub fn new(filter: &'a Filter, context: &'a dyn FilterContext) -> Self {
        Self { filter, context }
    }

    /// Returns the filter being evaluated.
    pub fn filter(&self) -> &Filter {
        self.filter
    }

    /// Returns true if the game matches the filter.
    pub fn matches(&self, game: &Game) -> bool {
        self.filter.evaluate(game, self.context)
    }

    /// Returns true if the game matches the filter's negation.
    pub fn matches_not(&self, game: &Game) -> bool {
        self.filter.evaluate_not(game, self.context)
    }

    /// Filters a slice of games, returning only those that match.
    pub fn filter_games<'b>(&self, games: &'b [Game]) -> Vec<&'b Game> {
        let matched: Vec<&Game> = games.iter().filter(|g| self.matches(g)).collect();
        debug!(
            filter = %self.filter,
            total = games.len(),
            matched = matched.len(),
            "evaluated filter"
        );
        matched
    }

    /// Filters a slice of games, returning those that match the negation.
    pub fn filter_games_not<'b>(&self, games: &'b [Game]) -> Vec<&'b Game> {
        let matched: Vec<&Game> = games.iter().filter(|g| self.matches_not(g)).collect();
        debug!(
            filter = %self.filter,
            total = games.len(),
            matched = matched.len(),
            "evaluated negated filter"
        );
        matched
    }

    /// Splits games into those matching the filter, those matching its
    /// negation, and those matching neither (missing data).
    pub fn partition<'b>(&self, games: &'b [Game]) -> Partition<'b> {
        let mut partition = Partition::default();
        for game in games {
            if self.matches(game) {
                partition.matched.push(game);
            } else if self.matches_not(game) {
                partition.negated.push(game);
            } else {
                partition.unknown.push(game);
            }
        }
        partition
    }
}

/// Result of [`FilterEvaluator::partition`].
#[derive(Debug, Default)]
pub struct Partition<'a> {
    /// Games matching the filter.
    pub matched: Vec<&'a Game>,
    /// Games matching the filter's negation.
    pub negated: Vec<&'a Game>,
    /// Games matching neither.
    pub unknown: Vec<&'a Game>,
}

#[cfg(test)]
#[path = "evaluator_tests.rs"]
mod tests;
