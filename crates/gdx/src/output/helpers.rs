//! Common helper functions for output formatting.

use chrono::NaiveDate;
use owo_colors::OwoColorize;

/// Truncates a string to a maximum number of characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Formats a 0-100 score for display, colored by band.
pub fn format_score(score: Option<f64>, use_colors: bool) -> String {
    let Some(score) = score else {
        return "-".to_string();
    };

    let label = format!("{score:.0}");
    if !use_colors {
        return label;
    }

    if score >= 75.0 {
        label.green().to_string()
    } else if score >= 50.0 {
        label.yellow().to_string()
    } else {
        label.red().to_string()
    }
}

/// Formats an optional release date as `YYYY-MM-DD`.
pub fn format_date(date: Option<NaiveDate>, use_colors: bool) -> String {
    match date {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None if use_colors => "unknown".dimmed().to_string(),
        None => "unknown".to_string(),
    }
}

/// Formats a list of ids as `#a #b`.
pub fn format_ids(ids: &[String], max_len: usize) -> String {
    if ids.is_empty() {
        return String::new();
    }

    let joined = ids
        .iter()
        .map(|id| format!("#{id}"))
        .collect::<Vec<_>>()
        .join(" ");

    truncate_str(&joined, max_len)
}

/// Writes a dimmed table header line.
pub fn push_header(output: &mut String, header: &str, use_colors: bool) {
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(header);
        output.push('\n');
    }
}
