//! Human-readable rendering of filters.
//!
//! The output is meant for terminals and logs. It is not a parseable format;
//! use [`codec`](super::codec) to persist filters.

use std::fmt;

use super::ast::Filter;

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::True => f.write_str("true"),
            Filter::And(children) => write_joined(f, children, " & "),
            Filter::Or(children) => write_joined(f, children, " | "),
            Filter::Not(inner) => write!(f, "!({inner})"),

            Filter::CriticScore { target } => write!(f, "criticScore >= {target}"),
            Filter::UserScore { target } => write!(f, "userScore >= {target}"),
            Filter::AvgScore { target } => write!(f, "avgScore >= {target}"),
            Filter::MinScore { target } => write!(f, "minScore >= {target}"),
            Filter::MaxScore { target } => write!(f, "maxScore >= {target}"),

            Filter::TargetReleaseDate { date } => write!(f, "releaseDate >= {date}"),
            Filter::TargetCreateDate { date } => write!(f, "createDate >= {date}"),
            Filter::TargetUpdateDate { date } => write!(f, "updateDate >= {date}"),
            Filter::PeriodReleaseDate { period } => write!(f, "releaseDate within {period}"),
            Filter::PeriodCreateDate { period } => write!(f, "createDate within {period}"),
            Filter::PeriodUpdateDate { period } => write!(f, "updateDate within {period}"),
            Filter::NullReleaseDate => f.write_str("releaseDate is null"),

            Filter::Platform(platform) => write!(f, "platform = {platform}"),
            Filter::Library(id) => write!(f, "library = {id}"),
            Filter::Genre(id) => write!(f, "genre = {id}"),
            Filter::Tag(id) => write!(f, "tag = {id}"),
            Filter::FilterTag(id) => write!(f, "filterTag = {id}"),
            Filter::Provider(id) => write!(f, "provider = {id}"),

            Filter::FileSize { bytes } => write!(f, "fileSize >= {bytes}"),
            Filter::FileName(pattern) => write!(f, "fileName ~ /{}/", pattern.as_str()),
        }
    }
}

/// Writes children separated by `sep`, parenthesizing nested compounds.
fn write_joined(f: &mut fmt::Formatter<'_>, children: &[Filter], sep: &str) -> fmt::Result {
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        match child {
            Filter::And(_) | Filter::Or(_) => write!(f, "({child})")?,
            _ => write!(f, "{child}")?,
        }
    }
    Ok(())
}
