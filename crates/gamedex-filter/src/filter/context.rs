//! Evaluation context.
//!
//! Rules that depend on the wall clock or on provider capabilities ask the
//! context instead of reaching for global state, so one evaluation pass sees a
//! single consistent `now`.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use gamedex_model::models::Platform;

/// Read-only capabilities a filter may need during evaluation.
pub trait FilterContext {
    /// The instant rolling-period rules are measured from.
    fn now(&self) -> DateTime<Utc>;

    /// Returns true if the provider can fetch metadata for games on `platform`.
    fn supports_provider(&self, provider_id: &str, platform: Platform) -> bool;
}

impl<C: FilterContext + ?Sized> FilterContext for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn supports_provider(&self, provider_id: &str, platform: Platform) -> bool {
        (**self).supports_provider(provider_id, platform)
    }
}

/// A [`FilterContext`] with a fixed clock and a static provider table.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use gamedex_filter::filter::{FilterContext, FrozenContext};
/// use gamedex_model::models::Platform;
///
/// let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
/// let ctx = FrozenContext::new(now).with_provider("igdb", [Platform::Pc, Platform::Switch]);
///
/// assert_eq!(ctx.now(), now);
/// assert!(ctx.supports_provider("igdb", Platform::Pc));
/// assert!(!ctx.supports_provider("igdb", Platform::Ps4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrozenContext {
    now: DateTime<Utc>,
    providers: HashMap<String, HashSet<Platform>>,
}

impl FrozenContext {
    /// Creates a context frozen at `now` with no providers.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            providers: HashMap::new(),
        }
    }

    /// Creates a context frozen at the current time.
    pub fn at_now() -> Self {
        Self::new(Utc::now())
    }

    /// Registers the platforms a provider supports. Repeated calls for the
    /// same provider extend its platform set.
    pub fn with_provider(
        mut self,
        provider_id: impl Into<String>,
        platforms: impl IntoIterator<Item = Platform>,
    ) -> Self {
        self.providers
            .entry(provider_id.into())
            .or_default()
            .extend(platforms);
        self
    }

    /// Ids of all registered providers, sorted.
    pub fn provider_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl FilterContext for FrozenContext {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn supports_provider(&self, provider_id: &str, platform: Platform) -> bool {
        self.providers
            .get(provider_id)
            .is_some_and(|platforms| platforms.contains(&platform))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_unknown_provider_is_unsupported() {
        let ctx = FrozenContext::at_now();
        assert!(!ctx.supports_provider("igdb", Platform::Pc));
    }

    #[test]
    fn test_with_provider_extends_platforms() {
        let ctx = FrozenContext::at_now()
            .with_provider("igdb", [Platform::Pc])
            .with_provider("igdb", [Platform::Mac])
            .with_provider("steam", [Platform::Linux]);
        assert!(ctx.supports_provider("igdb", Platform::Pc));
        assert!(ctx.supports_provider("igdb", Platform::Mac));
        assert!(!ctx.supports_provider("steam", Platform::Pc));
        assert_eq!(ctx.provider_ids(), vec!["igdb", "steam"]);
    }

    #[test]
    fn test_reference_context_delegates() {
        let now = Utc.with_ymd_and_hms(2020, 1, 1, 12, 0, 0).unwrap();
        let ctx = FrozenContext::new(now).with_provider("igdb", [Platform::Pc]);

        fn snapshot(ctx: impl FilterContext) -> (DateTime<Utc>, bool) {
            (ctx.now(), ctx.supports_provider("igdb", Platform::Pc))
        }

        assert_eq!(snapshot(&ctx), (now, true));
    }
}
