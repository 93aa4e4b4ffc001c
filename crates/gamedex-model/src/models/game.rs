//! Game record model.
//!
//! This module defines the [`Game`] struct: the read-only view of a library
//! entry that filters are evaluated against.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{FileNode, Platform};

/// Metadata fetched for a game from one external provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderData {
    /// The provider's identifier (e.g. `"igdb"`).
    pub provider_id: String,

    /// The game's identifier on the provider's side.
    pub provider_game_id: String,

    /// When the data was last fetched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<DateTime<Utc>>,
}

impl ProviderData {
    /// Creates provider data without a fetch timestamp.
    pub fn new(provider_id: impl Into<String>, provider_game_id: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
            provider_game_id: provider_game_id.into(),
            fetched_at: None,
        }
    }
}

/// A game in the user's library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// The unique identifier for the game.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Platform the game runs on.
    pub platform: Platform,

    /// The library (scanned folder) the game belongs to.
    pub library_id: String,

    /// Critic score, 0-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critic_score: Option<f64>,

    /// User score, 0-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_score: Option<f64>,

    /// Release date reported by providers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,

    /// When the game was added to the library.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the game record was last updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Genre ids.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genre_ids: Vec<String>,

    /// User tag ids.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag_ids: Vec<String>,

    /// Ids of tag-producing saved filters this game matched.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filter_tag_ids: Vec<String>,

    /// Data fetched from external providers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub provider_data: Vec<ProviderData>,

    /// Providers the user excluded for this game.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_providers: Vec<String>,

    /// File tree snapshot. `None` until the game folder has been scanned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_tree: Option<FileNode>,
}

impl Game {
    /// Creates a game with no scores, dates, ids or file tree.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        platform: Platform,
        library_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            platform,
            library_id: library_id.into(),
            critic_score: None,
            user_score: None,
            release_date: None,
            created_at: None,
            updated_at: None,
            genre_ids: Vec::new(),
            tag_ids: Vec::new(),
            filter_tag_ids: Vec::new(),
            provider_data: Vec::new(),
            excluded_providers: Vec::new(),
            file_tree: None,
        }
    }

    /// Sets the critic score.
    pub fn with_critic_score(mut self, score: f64) -> Self {
        self.critic_score = Some(score);
        self
    }

    /// Sets the user score.
    pub fn with_user_score(mut self, score: f64) -> Self {
        self.user_score = Some(score);
        self
    }

    /// Sets the release date.
    pub fn with_release_date(mut self, date: NaiveDate) -> Self {
        self.release_date = Some(date);
        self
    }

    /// Sets the creation timestamp.
    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Sets the update timestamp.
    pub fn with_updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = Some(at);
        self
    }

    /// Adds a genre id.
    pub fn with_genre(mut self, id: impl Into<String>) -> Self {
        self.genre_ids.push(id.into());
        self
    }

    /// Adds a tag id.
    pub fn with_tag(mut self, id: impl Into<String>) -> Self {
        self.tag_ids.push(id.into());
        self
    }

    /// Adds a filter-tag id.
    pub fn with_filter_tag(mut self, id: impl Into<String>) -> Self {
        self.filter_tag_ids.push(id.into());
        self
    }

    /// Adds provider data.
    pub fn with_provider_data(mut self, data: ProviderData) -> Self {
        self.provider_data.push(data);
        self
    }

    /// Excludes a provider for this game.
    pub fn with_excluded_provider(mut self, provider_id: impl Into<String>) -> Self {
        self.excluded_providers.push(provider_id.into());
        self
    }

    /// Sets the file tree snapshot.
    pub fn with_file_tree(mut self, tree: FileNode) -> Self {
        self.file_tree = Some(tree);
        self
    }

    /// Mean of the present critic and user scores.
    pub fn avg_score(&self) -> Option<f64> {
        match (self.critic_score, self.user_score) {
            (Some(critic), Some(user)) => Some((critic + user) / 2.0),
            (Some(score), None) | (None, Some(score)) => Some(score),
            (None, None) => None,
        }
    }

    /// Lowest of the present critic and user scores.
    pub fn min_score(&self) -> Option<f64> {
        match (self.critic_score, self.user_score) {
            (Some(critic), Some(user)) => Some(critic.min(user)),
            (score, None) | (None, score) => score,
        }
    }

    /// Highest of the present critic and user scores.
    pub fn max_score(&self) -> Option<f64> {
        match (self.critic_score, self.user_score) {
            (Some(critic), Some(user)) => Some(critic.max(user)),
            (score, None) | (None, score) => score,
        }
    }

    /// Returns true if data from the given provider has been fetched.
    pub fn has_provider_data(&self, provider_id: &str) -> bool {
        self.provider_data
            .iter()
            .any(|d| d.provider_id == provider_id)
    }

    /// Returns true if the user excluded the given provider for this game.
    pub fn is_provider_excluded(&self, provider_id: &str) -> bool {
        self.excluded_providers.iter().any(|p| p == provider_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> Game {
        Game::new("g1", "Celeste", Platform::Pc, "lib-1")
    }

    #[test]
    fn test_derived_scores_absent_without_scores() {
        let g = game();
        assert_eq!(g.avg_score(), None);
        assert_eq!(g.min_score(), None);
        assert_eq!(g.max_score(), None);
    }

    #[test]
    fn test_derived_scores_with_one_score() {
        let g = game().with_user_score(80.0);
        assert_eq!(g.avg_score(), Some(80.0));
        assert_eq!(g.min_score(), Some(80.0));
        assert_eq!(g.max_score(), Some(80.0));
    }

    #[test]
    fn test_derived_scores_with_both_scores() {
        let g = game().with_critic_score(90.0).with_user_score(70.0);
        assert_eq!(g.avg_score(), Some(80.0));
        assert_eq!(g.min_score(), Some(70.0));
        assert_eq!(g.max_score(), Some(90.0));
    }

    #[test]
    fn test_provider_lookups() {
        let g = game()
            .with_provider_data(ProviderData::new("igdb", "1234"))
            .with_excluded_provider("giantbomb");
        assert!(g.has_provider_data("igdb"));
        assert!(!g.has_provider_data("giantbomb"));
        assert!(g.is_provider_excluded("giantbomb"));
        assert!(!g.is_provider_excluded("igdb"));
    }

    #[test]
    fn test_game_deserialize_minimal() {
        let json = r#"{"id":"g1","name":"Celeste","platform":"pc","library_id":"lib-1"}"#;
        let g: Game = serde_json::from_str(json).unwrap();
        assert_eq!(g, game());
    }

    #[test]
    fn test_game_deserialize_full() {
        let json = r#"{
            "id": "g2",
            "name": "Hades",
            "platform": "switch",
            "library_id": "lib-2",
            "critic_score": 93.0,
            "release_date": "2020-09-17",
            "created_at": "2024-01-02T03:04:05Z",
            "tag_ids": ["roguelike"],
            "provider_data": [{"provider_id": "igdb", "provider_game_id": "113112"}],
            "file_tree": {"name": "Hades", "size": 10, "children": [{"name": "Hades.exe", "size": 10}]}
        }"#;
        let g: Game = serde_json::from_str(json).unwrap();
        assert_eq!(g.platform, Platform::Switch);
        assert_eq!(g.critic_score, Some(93.0));
        assert_eq!(g.release_date, NaiveDate::from_ymd_opt(2020, 9, 17));
        assert_eq!(g.tag_ids, vec!["roguelike".to_string()]);
        assert!(g.has_provider_data("igdb"));
        assert_eq!(g.file_tree.unwrap().children[0].name, "Hades.exe");
    }
}
