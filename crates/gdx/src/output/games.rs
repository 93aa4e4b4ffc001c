//! Game output formatting.

use gamedex_model::models::Game;
use serde::Serialize;

use super::helpers::{format_date, format_ids, format_score, push_header, truncate_str};

/// JSON output structure for the games command.
#[derive(Serialize)]
pub struct GamesListOutput<'a> {
    pub filter: String,
    pub negated: bool,
    pub total: usize,
    pub games: Vec<GameOutput<'a>>,
}

/// JSON output structure for a single game.
#[derive(Serialize)]
pub struct GameOutput<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub platform: &'static str,
    pub library_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critic_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    pub tag_ids: &'a [String],
    pub filter_tag_ids: &'a [String],
}

impl<'a> From<&'a Game> for GameOutput<'a> {
    fn from(game: &'a Game) -> Self {
        Self {
            id: &game.id,
            name: &game.name,
            platform: game.platform.as_str(),
            library_id: &game.library_id,
            critic_score: game.critic_score,
            user_score: game.user_score,
            release_date: game.release_date.map(|d| d.to_string()),
            tag_ids: &game.tag_ids,
            filter_tag_ids: &game.filter_tag_ids,
        }
    }
}

/// Formats matching games as JSON.
///
/// `total` is the match count before any `--limit` was applied.
pub fn format_games_json(
    games: &[&Game],
    filter: String,
    negated: bool,
    total: usize,
) -> Result<String, serde_json::Error> {
    let output = GamesListOutput {
        filter,
        negated,
        total,
        games: games.iter().map(|g| GameOutput::from(*g)).collect(),
    };

    serde_json::to_string_pretty(&output)
}

/// Formats matching games as a table.
pub fn format_games_table(games: &[&Game], total: usize, use_colors: bool) -> String {
    if games.is_empty() {
        return "No games found.\n".to_string();
    }

    let mut output = String::new();

    let header = format!(
        "{:<10} {:<32} {:<12} {:>6} {:>6} {:<10} {}",
        "ID", "Name", "Platform", "Critic", "User", "Released", "Tags"
    );
    push_header(&mut output, &header, use_colors);

    for game in games {
        let line = format!(
            "{:<10} {:<32} {:<12} {:>6} {:>6} {:<10} {}",
            truncate_str(&game.id, 10),
            truncate_str(&game.name, 32),
            game.platform,
            format_score(game.critic_score, use_colors),
            format_score(game.user_score, use_colors),
            format_date(game.release_date, use_colors),
            format_ids(&game.tag_ids, 30),
        );
        output.push_str(line.trim_end());
        output.push('\n');
    }

    if total > games.len() {
        output.push_str(&format!("\nShowing {} of {total} games.\n", games.len()));
    }

    output
}
