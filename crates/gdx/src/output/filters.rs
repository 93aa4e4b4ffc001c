//! Filter output formatting.

use gamedex_filter::filter::{codec, FilterKind};
use gamedex_filter::NamedFilter;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::commands::check::CheckSummary;
use crate::commands::filters::GameTags;

use super::helpers::{format_ids, push_header, truncate_str};

/// JSON output structure for filters list command.
#[derive(Serialize)]
pub struct FiltersListOutput<'a> {
    pub filters: Vec<FilterOutput<'a>>,
}

/// JSON output structure for a single saved filter.
#[derive(Serialize)]
pub struct FilterOutput<'a> {
    pub id: &'a str,
    pub expression: String,
    pub is_tag: bool,
    pub updated_at: String,
}

impl<'a> From<&'a NamedFilter> for FilterOutput<'a> {
    fn from(named: &'a NamedFilter) -> Self {
        Self {
            id: &named.id,
            expression: named.filter.to_string(),
            is_tag: named.is_tag,
            updated_at: named.updated_at.to_rfc3339(),
        }
    }
}

/// Formats saved filters as JSON.
pub fn format_filters_json(filters: &[NamedFilter]) -> Result<String, serde_json::Error> {
    let output = FiltersListOutput {
        filters: filters.iter().map(FilterOutput::from).collect(),
    };

    serde_json::to_string_pretty(&output)
}

/// Formats saved filters as a table.
pub fn format_filters_table(filters: &[NamedFilter], use_colors: bool) -> String {
    if filters.is_empty() {
        return "No saved filters.\n".to_string();
    }

    let mut output = String::new();

    let header = format!("{:<20} {:<4} {}", "ID", "Tag", "Expression");
    push_header(&mut output, &header, use_colors);

    for named in filters {
        let tag = match (named.is_tag, use_colors) {
            (true, true) => "#".cyan().to_string(),
            (true, false) => "#".to_string(),
            (false, _) => " ".to_string(),
        };
        let line = format!(
            "{:<20} {:<4} {}",
            truncate_str(&named.id, 20),
            tag,
            truncate_str(&named.filter.to_string(), 60)
        );
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// JSON output structure for filter details (filters show command).
#[derive(Serialize)]
pub struct FilterDetailsOutput<'a> {
    pub id: &'a str,
    pub expression: String,
    pub is_tag: bool,
    pub created_at: String,
    pub updated_at: String,
    pub filter: serde_json::Value,
}

/// Formats filter details as JSON (filters show command).
pub fn format_filter_details_json(named: &NamedFilter) -> Result<String, serde_json::Error> {
    let output = FilterDetailsOutput {
        id: &named.id,
        expression: named.filter.to_string(),
        is_tag: named.is_tag,
        created_at: named.created_at.to_rfc3339(),
        updated_at: named.updated_at.to_rfc3339(),
        filter: codec::to_value(&named.filter),
    };

    serde_json::to_string_pretty(&output)
}

/// Formats filter details as a table (filters show command).
pub fn format_filter_details_table(named: &NamedFilter, use_colors: bool) -> String {
    let mut output = String::new();

    if use_colors {
        output.push_str(&format!("{}\n\n", named.id.bold()));
    } else {
        output.push_str(&format!("{}\n\n", named.id));
    }

    output.push_str(&format!("Expression: {}\n", named.filter));
    output.push_str(&format!("Tag:        {}\n", if named.is_tag { "yes" } else { "no" }));
    output.push_str(&format!(
        "Created:    {}\n",
        named.created_at.format("%Y-%m-%d %H:%M")
    ));
    output.push_str(&format!(
        "Updated:    {}\n",
        named.updated_at.format("%Y-%m-%d %H:%M")
    ));
    output.push_str(&format!("\n{}\n", codec::to_json_string_pretty(&named.filter)));

    output
}

/// JSON output structure for a saved or deleted filter.
#[derive(Serialize)]
pub struct FilterChangeOutput<'a> {
    pub status: &'static str,
    pub id: &'a str,
}

/// Formats the result of saving a filter as JSON.
pub fn format_saved_filter(named: &NamedFilter) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&FilterChangeOutput {
        status: "saved",
        id: &named.id,
    })
}

/// Formats the result of deleting a filter as JSON.
pub fn format_deleted_filter(id: &str) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&FilterChangeOutput {
        status: "deleted",
        id,
    })
}

/// JSON output structure for the check command.
#[derive(Serialize)]
pub struct CheckOutput {
    pub valid: bool,
    pub expression: String,
    pub depth: usize,
    pub empty: bool,
    pub rules: Vec<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Formats a check summary as JSON.
pub fn format_check_json(summary: &CheckSummary) -> Result<String, serde_json::Error> {
    let output = CheckOutput {
        valid: true,
        expression: summary.filter.to_string(),
        depth: summary.depth,
        empty: summary.filter.is_empty(),
        rules: summary.rule_kinds.iter().map(|k| k.tag()).collect(),
        warnings: summary.warnings.clone(),
    };

    serde_json::to_string_pretty(&output)
}

/// Formats a check summary as text.
pub fn format_check_table(summary: &CheckSummary, use_colors: bool) -> String {
    let mut output = String::new();

    let ok = "Filter is valid";
    if use_colors {
        output.push_str(&format!("{}\n\n", ok.green().bold()));
    } else {
        output.push_str(&format!("{ok}\n\n"));
    }

    output.push_str(&format!("Expression: {}\n", summary.filter));
    output.push_str(&format!("Depth:      {}\n", summary.depth));

    let rules: Vec<&str> = summary.rule_kinds.iter().map(FilterKind::tag).collect();
    if rules.is_empty() {
        output.push_str("Rules:      (none, matches every game)\n");
    } else {
        output.push_str(&format!("Rules:      {}\n", rules.join(", ")));
    }

    for warning in &summary.warnings {
        if use_colors {
            output.push_str(&format!("{} {warning}\n", "warning:".yellow()));
        } else {
            output.push_str(&format!("warning: {warning}\n"));
        }
    }

    output
}

/// JSON output structure for the filters tags command.
#[derive(Serialize)]
pub struct TagsOutput<'a, 'g> {
    pub games: &'a [GameTags<'g>],
}

/// Formats per-game filter tags as JSON.
pub fn format_tags_json(tags: &[GameTags<'_>]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&TagsOutput { games: tags })
}

/// Formats per-game filter tags as a table. Games without tags are skipped.
pub fn format_tags_table(tags: &[GameTags<'_>], use_colors: bool) -> String {
    let tagged: Vec<&GameTags<'_>> = tags.iter().filter(|t| !t.tags.is_empty()).collect();
    if tagged.is_empty() {
        return "No games matched any tag filter.\n".to_string();
    }

    let mut output = String::new();

    let header = format!("{:<10} {:<32} {}", "ID", "Name", "Filter tags");
    push_header(&mut output, &header, use_colors);

    for entry in tagged {
        let line = format!(
            "{:<10} {:<32} {}",
            truncate_str(entry.id, 10),
            truncate_str(entry.name, 32),
            format_ids(&entry.tags, 40)
        );
        output.push_str(&line);
        output.push('\n');
    }

    output
}
