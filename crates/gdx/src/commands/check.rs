//! Check command implementation.
//!
//! Decodes a filter file and describes it without evaluating anything.

use std::path::Path;

use gamedex_filter::filter::{Filter, FilterKind};
use tracing::debug;

use super::{read_filter_file, CommandContext, Result};
use crate::output::{format_check_json, format_check_table};

/// What `gdx check` reports about a decoded filter.
#[derive(Debug)]
pub struct CheckSummary {
    /// The decoded filter.
    pub filter: Filter,
    /// Nesting depth (a single rule has depth 1).
    pub depth: usize,
    /// Distinct rule kinds in pre-order of first appearance.
    pub rule_kinds: Vec<FilterKind>,
    /// Rules whose behavior tends to surprise.
    pub warnings: Vec<String>,
}

impl CheckSummary {
    /// Summarizes a filter.
    pub fn new(filter: Filter) -> Self {
        let mut rule_kinds = Vec::new();
        let mut warnings = Vec::new();

        for rule in filter.rules() {
            let kind = rule.kind();
            if !rule_kinds.contains(&kind) {
                rule_kinds.push(kind);
            }
            if let Some(warning) = rule_warning(rule) {
                warnings.push(warning);
            }
        }

        Self {
            depth: filter.depth(),
            filter,
            rule_kinds,
            warnings,
        }
    }
}

/// Zero (or negative) score thresholds flip their negation to "score unknown".
fn rule_warning(rule: &Filter) -> Option<String> {
    let target = match rule {
        Filter::CriticScore { target }
        | Filter::UserScore { target }
        | Filter::AvgScore { target }
        | Filter::MinScore { target }
        | Filter::MaxScore { target } => *target,
        _ => return None,
    };

    (target <= 0.0).then(|| {
        format!("`{rule}` matches any scored game; its negation matches games without a score")
    })
}

/// Executes the check command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not decode to a filter.
pub fn execute(ctx: &CommandContext, file: &Path) -> Result<()> {
    let filter = read_filter_file(file)?;
    debug!(file = %file.display(), filter = %filter, "decoded filter");

    let summary = CheckSummary::new(filter);

    if ctx.json_output {
        println!("{}", format_check_json(&summary)?);
    } else if !ctx.quiet {
        print!("{}", format_check_table(&summary, ctx.use_colors));
    }

    Ok(())
}
