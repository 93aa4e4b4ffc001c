//! JSON encoding of filters.
//!
//! Each node is an object with a `"type"` discriminant taken from
//! [`FilterKind::tag`] and the node's parameters as sibling fields:
//!
//! ```json
//! {"type": "and", "filters": [
//!     {"type": "criticScore", "target": 60.0},
//!     {"type": "not", "filter": {"type": "platform", "platform": "switch"}}
//! ]}
//! ```
//!
//! Decoding validates everything [`Filter`]'s constructors validate: compound
//! lists must be non-empty and file-name patterns must compile. Nesting is
//! capped at [`MAX_DEPTH`].

use chrono::NaiveDate;
use gamedex_model::models::Platform;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Map, Value};
use strsim::levenshtein;

use super::ast::{FileNamePattern, Filter, FilterKind, Period};
use super::error::{FilterError, FilterResult};

/// Maximum nesting depth accepted by the decoder.
pub const MAX_DEPTH: usize = 64;

/// Maximum Levenshtein distance to consider a known tag as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Encodes a filter as a JSON value.
pub fn to_value(filter: &Filter) -> Value {
    let mut obj = Map::new();
    obj.insert("type".to_string(), Value::from(filter.kind().tag()));

    match filter {
        Filter::True | Filter::NullReleaseDate => {}
        Filter::And(children) | Filter::Or(children) => {
            obj.insert(
                "filters".to_string(),
                Value::Array(children.iter().map(to_value).collect()),
            );
        }
        Filter::Not(inner) => {
            obj.insert("filter".to_string(), to_value(inner));
        }
        Filter::CriticScore { target }
        | Filter::UserScore { target }
        | Filter::AvgScore { target }
        | Filter::MinScore { target }
        | Filter::MaxScore { target } => {
            obj.insert("target".to_string(), json!(target));
        }
        Filter::TargetReleaseDate { date }
        | Filter::TargetCreateDate { date }
        | Filter::TargetUpdateDate { date } => {
            obj.insert("date".to_string(), Value::from(date.to_string()));
        }
        Filter::PeriodReleaseDate { period }
        | Filter::PeriodCreateDate { period }
        | Filter::PeriodUpdateDate { period } => {
            obj.insert(
                "period".to_string(),
                json!({
                    "years": period.years,
                    "months": period.months,
                    "days": period.days,
                }),
            );
        }
        Filter::Platform(platform) => {
            obj.insert("platform".to_string(), Value::from(platform.as_str()));
        }
        Filter::Library(id)
        | Filter::Genre(id)
        | Filter::Tag(id)
        | Filter::FilterTag(id)
        | Filter::Provider(id) => {
            obj.insert("id".to_string(), Value::from(id.as_str()));
        }
        Filter::FileSize { bytes } => {
            obj.insert("bytes".to_string(), Value::from(*bytes));
        }
        Filter::FileName(pattern) => {
            obj.insert("pattern".to_string(), Value::from(pattern.as_str()));
        }
    }

    Value::Object(obj)
}

/// Decodes a filter from a JSON value.
///
/// # Errors
///
/// Returns a [`FilterError`] describing the first problem found.
pub fn from_value(value: &Value) -> FilterResult<Filter> {
    decode(value, 1)
}

/// Decodes a filter from a JSON string.
pub fn from_json_str(json: &str) -> FilterResult<Filter> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| FilterError::malformed(e.to_string()))?;
    from_value(&value)
}

/// Encodes a filter as pretty-printed JSON.
pub fn to_json_string_pretty(filter: &Filter) -> String {
    // Serializing a `Value` to a string cannot fail.
    serde_json::to_string_pretty(&to_value(filter)).unwrap_or_default()
}

fn decode(value: &Value, depth: usize) -> FilterResult<Filter> {
    if depth > MAX_DEPTH {
        return Err(FilterError::TooDeep { max: MAX_DEPTH });
    }

    let obj = value
        .as_object()
        .ok_or_else(|| FilterError::malformed("expected a JSON object"))?;
    let tag = obj
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| FilterError::malformed("missing string field 'type'"))?;
    let kind = FilterKind::from_tag(tag).ok_or_else(|| FilterError::UnknownType {
        tag: tag.to_string(),
        suggestion: suggest_tag(tag),
    })?;
    let fields = Fields { tag, obj };

    let filter = match kind {
        FilterKind::True => Filter::True,
        FilterKind::And => Filter::all(fields.children(depth)?)?,
        FilterKind::Or => Filter::any(fields.children(depth)?)?,
        FilterKind::Not => Filter::negate(decode(fields.get("filter")?, depth + 1)?),

        FilterKind::CriticScore => Filter::CriticScore {
            target: fields.f64("target")?,
        },
        FilterKind::UserScore => Filter::UserScore {
            target: fields.f64("target")?,
        },
        FilterKind::AvgScore => Filter::AvgScore {
            target: fields.f64("target")?,
        },
        FilterKind::MinScore => Filter::MinScore {
            target: fields.f64("target")?,
        },
        FilterKind::MaxScore => Filter::MaxScore {
            target: fields.f64("target")?,
        },

        FilterKind::TargetReleaseDate => Filter::TargetReleaseDate {
            date: fields.date()?,
        },
        FilterKind::TargetCreateDate => Filter::TargetCreateDate {
            date: fields.date()?,
        },
        FilterKind::TargetUpdateDate => Filter::TargetUpdateDate {
            date: fields.date()?,
        },
        FilterKind::PeriodReleaseDate => Filter::PeriodReleaseDate {
            period: fields.period()?,
        },
        FilterKind::PeriodCreateDate => Filter::PeriodCreateDate {
            period: fields.period()?,
        },
        FilterKind::PeriodUpdateDate => Filter::PeriodUpdateDate {
            period: fields.period()?,
        },
        FilterKind::NullReleaseDate => Filter::NullReleaseDate,

        FilterKind::Platform => Filter::Platform(fields.platform()?),
        FilterKind::Library => Filter::Library(fields.string("id")?),
        FilterKind::Genre => Filter::Genre(fields.string("id")?),
        FilterKind::Tag => Filter::Tag(fields.string("id")?),
        FilterKind::FilterTag => Filter::FilterTag(fields.string("id")?),
        FilterKind::Provider => Filter::Provider(fields.string("id")?),

        FilterKind::FileSize => Filter::FileSize {
            bytes: fields.u64("bytes")?,
        },
        FilterKind::FileName => Filter::FileName(FileNamePattern::new(fields.string("pattern")?)?),
    };

    Ok(filter)
}

/// Finds the known tag closest to an unknown one.
fn suggest_tag(tag: &str) -> Option<&'static str> {
    let tag_lower = tag.to_lowercase();
    let (best, distance) = FilterKind::ALL
        .iter()
        .map(|k| (k.tag(), levenshtein(&tag_lower, &k.tag().to_lowercase())))
        .min_by_key(|(_, d)| *d)?;

    (distance <= MAX_SUGGESTION_DISTANCE).then_some(best)
}

/// Field accessors for one encoded node, producing errors that name the node.
struct Fields<'a> {
    tag: &'a str,
    obj: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    fn get(&self, field: &'static str) -> FilterResult<&'a Value> {
        self.obj
            .get(field)
            .ok_or_else(|| FilterError::invalid_field(self.tag, field, "missing"))
    }

    fn children(&self, depth: usize) -> FilterResult<Vec<Filter>> {
        let items = self
            .get("filters")?
            .as_array()
            .ok_or_else(|| FilterError::invalid_field(self.tag, "filters", "expected an array"))?;
        items.iter().map(|item| decode(item, depth + 1)).collect()
    }

    fn f64(&self, field: &'static str) -> FilterResult<f64> {
        self.get(field)?
            .as_f64()
            .ok_or_else(|| FilterError::invalid_field(self.tag, field, "expected a number"))
    }

    fn u64(&self, field: &'static str) -> FilterResult<u64> {
        self.get(field)?.as_u64().ok_or_else(|| {
            FilterError::invalid_field(self.tag, field, "expected a non-negative integer")
        })
    }

    fn string(&self, field: &'static str) -> FilterResult<String> {
        self.get(field)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| FilterError::invalid_field(self.tag, field, "expected a string"))
    }

    fn date(&self) -> FilterResult<NaiveDate> {
        let raw = self.string("date")?;
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|e| {
            FilterError::invalid_field(self.tag, "date", format!("'{raw}' is not YYYY-MM-DD: {e}"))
        })
    }

    fn platform(&self) -> FilterResult<Platform> {
        let raw = self.string("platform")?;
        raw.parse::<Platform>()
            .map_err(|e| FilterError::invalid_field(self.tag, "platform", e.to_string()))
    }

    fn period(&self) -> FilterResult<Period> {
        let obj = self
            .get("period")?
            .as_object()
            .ok_or_else(|| FilterError::invalid_field(self.tag, "period", "expected an object"))?;
        let part = |name: &str| -> FilterResult<u32> {
            match obj.get(name) {
                None | Some(Value::Null) => Ok(0),
                Some(v) => v
                    .as_u64()
                    .and_then(|n| u32::try_from(n).ok())
                    .ok_or_else(|| {
                        FilterError::invalid_field(
                            self.tag,
                            "period",
                            format!("'{name}' must be a non-negative integer"),
                        )
                    }),
            }
        };
        Ok(Period::new(part("years")?, part("months")?, part("days")?))
    }
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        to_value(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Filter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        from_value(&value).map_err(serde::de::Error::custom)
    }
}
