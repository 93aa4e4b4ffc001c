//! Saved filters.
//!
//! A [`NamedFilter`] wraps a [`Filter`] with an identity and timestamps so it
//! can be persisted, listed and, when `is_tag` is set, used to tag games.

use chrono::{DateTime, Utc};
use gamedex_model::models::Game;
use serde::{Deserialize, Serialize};

use crate::filter::{Filter, FilterContext};

/// A filter with an identity.
///
/// An empty `id` denotes an anonymous (unsaved) filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedFilter {
    /// Identifier, unique within a store. Empty for anonymous filters.
    #[serde(default)]
    pub id: String,

    /// The filter expression.
    #[serde(default)]
    pub filter: Filter,

    /// Whether games matching this filter get its id as a filter tag.
    #[serde(default)]
    pub is_tag: bool,

    /// When the filter was first created.
    pub created_at: DateTime<Utc>,

    /// When the filter expression was last replaced.
    pub updated_at: DateTime<Utc>,
}

impl NamedFilter {
    /// Creates a named filter stamped with the current time.
    pub fn new(id: impl Into<String>, filter: Filter) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            filter,
            is_tag: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates an anonymous filter.
    pub fn anonymous(filter: Filter) -> Self {
        Self::new(String::new(), filter)
    }

    /// Creates a tag-producing filter.
    pub fn tag(id: impl Into<String>, filter: Filter) -> Self {
        Self {
            is_tag: true,
            ..Self::new(id, filter)
        }
    }

    /// Returns true if the filter has no identifier.
    pub fn is_anonymous(&self) -> bool {
        self.id.is_empty()
    }

    /// Returns a copy with the filter replaced and `updated_at` bumped.
    pub fn with_filter(&self, filter: Filter) -> Self {
        Self {
            filter,
            updated_at: Utc::now().max(self.updated_at),
            ..self.clone()
        }
    }
}

/// Returns the ids of tag-producing filters that match the game.
///
/// Non-tag filters and anonymous filters are ignored. The result preserves
/// the order of `filters`.
pub fn filter_tags_for<C: FilterContext + ?Sized>(
    game: &Game,
    filters: &[NamedFilter],
    context: &C,
) -> Vec<String> {
    filters
        .iter()
        .filter(|f| f.is_tag && !f.is_anonymous())
        .filter(|f| f.filter.evaluate(game, context))
        .map(|f| f.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FrozenContext;
    use gamedex_model::models::Platform;

    #[test]
    fn test_anonymous_filter() {
        let named = NamedFilter::anonymous(Filter::True);
        assert!(named.is_anonymous());
        assert!(!named.is_tag);
        assert_eq!(named.created_at, named.updated_at);
    }

    #[test]
    fn test_tag_filter() {
        let named = NamedFilter::tag("great", Filter::CriticScore { target: 85.0 });
        assert!(named.is_tag);
        assert!(!named.is_anonymous());
    }

    #[test]
    fn test_with_filter_returns_new_value() {
        let original = NamedFilter::new("pc", Filter::Platform(Platform::Pc));
        let edited = original.with_filter(Filter::Platform(Platform::Mac));

        assert_eq!(original.filter, Filter::Platform(Platform::Pc));
        assert_eq!(edited.filter, Filter::Platform(Platform::Mac));
        assert_eq!(edited.id, "pc");
        assert_eq!(edited.created_at, original.created_at);
        assert!(edited.updated_at >= original.updated_at);
    }

    #[test]
    fn test_serde_round_trip() {
        let named = NamedFilter::tag("recent", Filter::NullReleaseDate);
        let json = serde_json::to_string(&named).unwrap();
        let back: NamedFilter = serde_json::from_str(&json).unwrap();
        assert_eq!(back, named);
    }

    #[test]
    fn test_deserialize_rejects_bad_filter() {
        let json = r#"{
            "id": "bad",
            "filter": {"type": "fileName", "pattern": "("},
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }"#;
        let err = serde_json::from_str::<NamedFilter>(json).unwrap_err();
        assert!(err.to_string().contains("invalid file name pattern"));
    }

    #[test]
    fn test_filter_tags_for() {
        let ctx = FrozenContext::at_now();
        let filters = vec![
            NamedFilter::tag("great", Filter::CriticScore { target: 85.0 }),
            NamedFilter::new("pc-only", Filter::Platform(Platform::Pc)),
            NamedFilter::tag("pc", Filter::Platform(Platform::Pc)),
            NamedFilter::tag("", Filter::True),
            NamedFilter::tag("undated", Filter::NullReleaseDate),
        ];
        let game = Game::new("1", "Game", Platform::Pc, "lib").with_critic_score(90.0);

        assert_eq!(
            filter_tags_for(&game, &filters, &ctx),
            vec!["great".to_string(), "pc".to_string(), "undated".to_string()]
        );
    }
}
