//! Abstract Syntax Tree (AST) for filter expressions.

use std::fmt;
use std::ops::Not;

use chrono::{DateTime, Days, Months, NaiveDate, Utc};
use gamedex_model::models::Platform;
use regex::Regex;

use super::error::{FilterError, FilterResult};

/// A predicate tree over a [`Game`](gamedex_model::models::Game).
///
/// Filters are immutable values. Compound nodes (`And`, `Or`) hold a
/// non-empty list of children; use [`Filter::all`] and [`Filter::any`] to
/// build them from a list with that invariant checked. `True` is the empty
/// filter and matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Filter {
    /// Matches every game.
    #[default]
    True,

    // ==================== Compound ====================
    /// Matches when every child matches.
    And(Vec<Filter>),

    /// Matches when any child matches.
    Or(Vec<Filter>),

    // ==================== Modifier ====================
    /// Matches when the child's negation matches.
    Not(Box<Filter>),

    // ==================== Score Rules ====================
    /// Critic score is present and at least `target`.
    CriticScore { target: f64 },

    /// User score is present and at least `target`.
    UserScore { target: f64 },

    /// Average of the present scores is at least `target`.
    AvgScore { target: f64 },

    /// Lowest present score is at least `target`.
    MinScore { target: f64 },

    /// Highest present score is at least `target`.
    MaxScore { target: f64 },

    // ==================== Date Rules ====================
    /// Release date is on or after `date`.
    TargetReleaseDate { date: NaiveDate },

    /// Game was added on or after `date`.
    TargetCreateDate { date: NaiveDate },

    /// Game was updated on or after `date`.
    TargetUpdateDate { date: NaiveDate },

    /// Release date falls within the last `period`.
    PeriodReleaseDate { period: Period },

    /// Game was added within the last `period`.
    PeriodCreateDate { period: Period },

    /// Game was updated within the last `period`.
    PeriodUpdateDate { period: Period },

    /// Release date is unknown.
    NullReleaseDate,

    // ==================== Identity Rules ====================
    /// Game runs on the platform.
    Platform(Platform),

    /// Game belongs to the library with this id.
    Library(String),

    /// Game has the genre with this id.
    Genre(String),

    /// Game has the user tag with this id.
    Tag(String),

    /// Game was tagged by the saved tag filter with this id.
    FilterTag(String),

    /// Game has data from this provider (and the provider applies to it).
    Provider(String),

    // ==================== File Rules ====================
    /// Scanned file tree is at least `bytes` large.
    FileSize { bytes: u64 },

    /// Some file or directory name in the scanned tree matches the pattern.
    FileName(FileNamePattern),
}

/// The kind of a [`Filter`] node, without its parameters.
///
/// Used for structural queries ([`Filter::find`]) and as the stable string
/// discriminant of each variant in the encoded form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    True,
    And,
    Or,
    Not,
    CriticScore,
    UserScore,
    AvgScore,
    MinScore,
    MaxScore,
    TargetReleaseDate,
    TargetCreateDate,
    TargetUpdateDate,
    PeriodReleaseDate,
    PeriodCreateDate,
    PeriodUpdateDate,
    NullReleaseDate,
    Platform,
    Library,
    Genre,
    Tag,
    FilterTag,
    Provider,
    FileSize,
    FileName,
}

impl FilterKind {
    /// Every kind, in declaration order.
    pub const ALL: [FilterKind; 24] = [
        FilterKind::True,
        FilterKind::And,
        FilterKind::Or,
        FilterKind::Not,
        FilterKind::CriticScore,
        FilterKind::UserScore,
        FilterKind::AvgScore,
        FilterKind::MinScore,
        FilterKind::MaxScore,
        FilterKind::TargetReleaseDate,
        FilterKind::TargetCreateDate,
        FilterKind::TargetUpdateDate,
        FilterKind::PeriodReleaseDate,
        FilterKind::PeriodCreateDate,
        FilterKind::PeriodUpdateDate,
        FilterKind::NullReleaseDate,
        FilterKind::Platform,
        FilterKind::Library,
        FilterKind::Genre,
        FilterKind::Tag,
        FilterKind::FilterTag,
        FilterKind::Provider,
        FilterKind::FileSize,
        FilterKind::FileName,
    ];

    /// Returns the stable string discriminant for this kind.
    ///
    /// These strings are part of the persisted format and must not change.
    pub fn tag(&self) -> &'static str {
        match self {
            FilterKind::True => "true",
            FilterKind::And => "and",
            FilterKind::Or => "or",
            FilterKind::Not => "not",
            FilterKind::CriticScore => "criticScore",
            FilterKind::UserScore => "userScore",
            FilterKind::AvgScore => "avgScore",
            FilterKind::MinScore => "minScore",
            FilterKind::MaxScore => "maxScore",
            FilterKind::TargetReleaseDate => "targetReleaseDate",
            FilterKind::TargetCreateDate => "targetCreateDate",
            FilterKind::TargetUpdateDate => "targetUpdateDate",
            FilterKind::PeriodReleaseDate => "periodReleaseDate",
            FilterKind::PeriodCreateDate => "periodCreateDate",
            FilterKind::PeriodUpdateDate => "periodUpdateDate",
            FilterKind::NullReleaseDate => "nullReleaseDate",
            FilterKind::Platform => "platform",
            FilterKind::Library => "library",
            FilterKind::Genre => "genre",
            FilterKind::Tag => "tag",
            FilterKind::FilterTag => "filterTag",
            FilterKind::Provider => "provider",
            FilterKind::FileSize => "fileSize",
            FilterKind::FileName => "fileName",
        }
    }

    /// Looks up a kind by its string discriminant (exact match).
    pub fn from_tag(tag: &str) -> Option<FilterKind> {
        FilterKind::ALL.iter().copied().find(|k| k.tag() == tag)
    }

    /// Returns true for `And` and `Or`.
    pub fn is_compound(&self) -> bool {
        matches!(self, FilterKind::And | FilterKind::Or)
    }

    /// Returns true for leaf rules (everything except compounds, `Not` and `True`).
    pub fn is_rule(&self) -> bool {
        !matches!(
            self,
            FilterKind::True | FilterKind::And | FilterKind::Or | FilterKind::Not
        )
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.tag())
    }
}

/// A calendar period used by rolling-window date rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Period {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl Period {
    /// Creates a period from its parts.
    pub fn new(years: u32, months: u32, days: u32) -> Self {
        Self {
            years,
            months,
            days,
        }
    }

    /// A period of `n` days.
    pub fn days(n: u32) -> Self {
        Self::new(0, 0, n)
    }

    /// A period of `n` months.
    pub fn months(n: u32) -> Self {
        Self::new(0, n, 0)
    }

    /// A period of `n` years.
    pub fn years(n: u32) -> Self {
        Self::new(n, 0, 0)
    }

    /// Returns true if all parts are zero.
    pub fn is_zero(&self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }

    /// Returns the start of the window ending at `now`.
    ///
    /// Saturates at the earliest representable instant, so huge periods
    /// simply cover all of history.
    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let months = self.years.saturating_mul(12).saturating_add(self.months);
        now.checked_sub_months(Months::new(months))
            .and_then(|t| t.checked_sub_days(Days::new(u64::from(self.days))))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0d");
        }
        let mut first = true;
        for (value, unit) in [(self.years, "y"), (self.months, "m"), (self.days, "d")] {
            if value == 0 {
                continue;
            }
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{value}{unit}")?;
            first = false;
        }
        Ok(())
    }
}

/// A regular expression over file names, compiled when the filter is built.
#[derive(Debug, Clone)]
pub struct FileNamePattern {
    source: String,
    regex: Regex,
}

impl FileNamePattern {
    /// Compiles a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidPattern`] if `source` is not a valid regex.
    pub fn new(source: impl Into<String>) -> FilterResult<Self> {
        let source = source.into();
        let regex = Regex::new(&source)
            .map_err(|e| FilterError::invalid_pattern(source.as_str(), e.to_string()))?;
        Ok(Self { source, regex })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns true if the pattern matches anywhere in `name`.
    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

impl PartialEq for FileNamePattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Filter {
    /// Returns the empty filter, which matches everything.
    pub fn empty() -> Self {
        Filter::True
    }

    /// Returns true only for the literal `True` node.
    ///
    /// A compound that happens to contain only `True` is not empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, Filter::True)
    }

    /// Creates an AND filter from two filters.
    ///
    /// # Example
    ///
    /// ```
    /// use gamedex_filter::filter::Filter;
    ///
    /// let filter = Filter::and(Filter::CriticScore { target: 80.0 }, Filter::NullReleaseDate);
    /// assert!(matches!(filter, Filter::And(ref children) if children.len() == 2));
    /// ```
    pub fn and(left: Filter, right: Filter) -> Self {
        Filter::And(vec![left, right])
    }

    /// Creates an OR filter from two filters.
    ///
    /// # Example
    ///
    /// ```
    /// use gamedex_filter::filter::Filter;
    ///
    /// let filter = Filter::or(Filter::Tag("coop".into()), Filter::Tag("local".into()));
    /// assert!(matches!(filter, Filter::Or(_)));
    /// ```
    pub fn or(left: Filter, right: Filter) -> Self {
        Filter::Or(vec![left, right])
    }

    /// Creates a NOT filter from another filter. Also available as `!filter`.
    ///
    /// # Example
    ///
    /// ```
    /// use gamedex_filter::filter::Filter;
    ///
    /// let filter = Filter::negate(Filter::NullReleaseDate);
    /// assert!(matches!(filter, Filter::Not(_)));
    /// ```
    pub fn negate(inner: Filter) -> Self {
        Filter::Not(Box::new(inner))
    }

    /// Creates an AND over a list of filters.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::EmptyCompound`] if `children` is empty.
    pub fn all(children: Vec<Filter>) -> FilterResult<Self> {
        if children.is_empty() {
            return Err(FilterError::EmptyCompound {
                tag: FilterKind::And.tag(),
            });
        }
        Ok(Filter::And(children))
    }

    /// Creates an OR over a list of filters.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::EmptyCompound`] if `children` is empty.
    pub fn any(children: Vec<Filter>) -> FilterResult<Self> {
        if children.is_empty() {
            return Err(FilterError::EmptyCompound {
                tag: FilterKind::Or.tag(),
            });
        }
        Ok(Filter::Or(children))
    }

    /// Creates a file-name rule, compiling `pattern` immediately.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidPattern`] if `pattern` is not a valid regex.
    pub fn file_name(pattern: impl Into<String>) -> FilterResult<Self> {
        Ok(Filter::FileName(FileNamePattern::new(pattern)?))
    }

    /// Returns the kind of this node.
    pub fn kind(&self) -> FilterKind {
        match self {
            Filter::True => FilterKind::True,
            Filter::And(_) => FilterKind::And,
            Filter::Or(_) => FilterKind::Or,
            Filter::Not(_) => FilterKind::Not,
            Filter::CriticScore { .. } => FilterKind::CriticScore,
            Filter::UserScore { .. } => FilterKind::UserScore,
            Filter::AvgScore { .. } => FilterKind::AvgScore,
            Filter::MinScore { .. } => FilterKind::MinScore,
            Filter::MaxScore { .. } => FilterKind::MaxScore,
            Filter::TargetReleaseDate { .. } => FilterKind::TargetReleaseDate,
            Filter::TargetCreateDate { .. } => FilterKind::TargetCreateDate,
            Filter::TargetUpdateDate { .. } => FilterKind::TargetUpdateDate,
            Filter::PeriodReleaseDate { .. } => FilterKind::PeriodReleaseDate,
            Filter::PeriodCreateDate { .. } => FilterKind::PeriodCreateDate,
            Filter::PeriodUpdateDate { .. } => FilterKind::PeriodUpdateDate,
            Filter::NullReleaseDate => FilterKind::NullReleaseDate,
            Filter::Platform(_) => FilterKind::Platform,
            Filter::Library(_) => FilterKind::Library,
            Filter::Genre(_) => FilterKind::Genre,
            Filter::Tag(_) => FilterKind::Tag,
            Filter::FilterTag(_) => FilterKind::FilterTag,
            Filter::Provider(_) => FilterKind::Provider,
            Filter::FileSize { .. } => FilterKind::FileSize,
            Filter::FileName(_) => FilterKind::FileName,
        }
    }

    /// Returns the direct children of this node.
    pub fn children(&self) -> &[Filter] {
        match self {
            Filter::And(children) | Filter::Or(children) => children,
            Filter::Not(inner) => std::slice::from_ref(inner.as_ref()),
            _ => &[],
        }
    }
}

impl Not for Filter {
    type Output = Filter;

    fn not(self) -> Self::Output {
        Filter::negate(self)
    }
}
