//! Catalog files: a JSON snapshot of a game library.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ModelError, Result};
use crate::models::Game;

/// A snapshot of every game in a library.
///
/// Accepts either `{"games": [...]}` or a bare JSON array of games. The shape
/// is chosen from the first token, so errors inside a game entry are reported
/// as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Catalog {
    /// The games in the catalog.
    pub games: Vec<Game>,
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(CatalogVisitor)
    }
}

struct CatalogVisitor;

impl<'de> Visitor<'de> for CatalogVisitor {
    type Value = Catalog;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array of games or an object with a \"games\" array")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Catalog, A::Error> {
        let mut games = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(game) = seq.next_element()? {
            games.push(game);
        }
        Ok(Catalog { games })
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Catalog, A::Error> {
        let mut games: Option<Vec<Game>> = None;
        while let Some(key) = map.next_key::<String>()? {
            if key == "games" {
                if games.is_some() {
                    return Err(de::Error::duplicate_field("games"));
                }
                games = Some(map.next_value()?);
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(Catalog {
            games: games.unwrap_or_default(),
        })
    }
}

impl Catalog {
    /// Creates a catalog from a list of games.
    pub fn new(games: Vec<Game>) -> Self {
        Self { games }
    }

    /// Parses a catalog from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ModelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Finds a game by id.
    pub fn get(&self, id: &str) -> Option<&Game> {
        self.games.iter().find(|g| g.id == id)
    }

    /// Number of games in the catalog.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Returns true if the catalog has no games.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Platform;

    #[test]
    fn test_catalog_from_object() {
        let json = r#"{"games": [{"id":"a","name":"A","platform":"pc","library_id":"l"}]}"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("a").unwrap().platform, Platform::Pc);
    }

    #[test]
    fn test_catalog_from_array() {
        let json = r#"[{"id":"a","name":"A","platform":"mac","library_id":"l"},
                      {"id":"b","name":"B","platform":"linux","library_id":"l"}]"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("c").is_none());
    }

    #[test]
    fn test_catalog_empty_object() {
        let catalog = Catalog::from_json_str("{}").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_catalog_invalid_json() {
        let err = Catalog::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ModelError::Json(_)));
    }

    #[test]
    fn test_catalog_reports_bad_game_entry() {
        let object = r#"{"games": [{"id":"a","name":"A","platform":"3do","library_id":"l"}]}"#;
        let message = Catalog::from_json_str(object).unwrap_err().to_string();
        assert!(message.contains("3do"), "message: {message}");
        assert!(!message.contains("did not match any variant"));

        let array = r#"[{"id":"a","name":"A","library_id":"l"}]"#;
        let message = Catalog::from_json_str(array).unwrap_err().to_string();
        assert!(message.contains("platform"), "message: {message}");
    }

    #[test]
    fn test_catalog_rejects_scalar() {
        let err = Catalog::from_json_str("42").unwrap_err();
        assert!(err.to_string().contains("array of games"));
    }

    #[test]
    fn test_catalog_load_missing_file() {
        let err = Catalog::load("/nonexistent/catalog.json").unwrap_err();
        assert!(matches!(err, ModelError::Read { .. }));
    }
}
