//! Error types for filter construction and decoding.
//!
//! Evaluation never fails; every error here surfaces while a filter is being
//! built or decoded.

use thiserror::Error;

/// A specialized Result type for filter construction operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur while constructing or decoding a filter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// A file-name pattern is not a valid regular expression.
    #[error("invalid file name pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The pattern source.
        pattern: String,
        /// The regex compiler's message.
        message: String,
    },

    /// An And/Or node was built without children.
    #[error("compound filter '{tag}' has no children")]
    EmptyCompound {
        /// The discriminant of the compound node.
        tag: &'static str,
    },

    /// An unknown `type` discriminant was found while decoding.
    #[error("unknown filter type: {tag}{}", suggestion_suffix(.suggestion))]
    UnknownType {
        /// The unrecognized discriminant.
        tag: String,
        /// The closest known discriminant, if any is close enough.
        suggestion: Option<&'static str>,
    },

    /// A required field is missing or has the wrong shape.
    #[error("invalid field '{field}' for filter type '{tag}': {message}")]
    InvalidField {
        /// The discriminant of the node being decoded.
        tag: String,
        /// The offending field.
        field: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// The encoded filter is not a JSON object with a `type` field.
    #[error("malformed filter: {0}")]
    Malformed(String),

    /// The encoded filter is nested deeper than the decoder allows.
    #[error("filter nesting exceeds maximum depth of {max}")]
    TooDeep {
        /// The maximum permitted depth.
        max: usize,
    },
}

fn suggestion_suffix(suggestion: &Option<&'static str>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{s}'?)"),
        None => String::new(),
    }
}

impl FilterError {
    /// Creates an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        FilterError::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid field error.
    pub fn invalid_field(
        tag: impl Into<String>,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        FilterError::InvalidField {
            tag: tag.into(),
            field,
            message: message.into(),
        }
    }

    /// Creates a malformed filter error.
    pub fn malformed(message: impl Into<String>) -> Self {
        FilterError::Malformed(message.into())
    }
}
