//! Seam between the container and feature management.
//!
//! Whether a feature is on is answered by a [`FeatureEvaluator`]; who it's on for is narrowed by
//! every registered [`FeatureFilter`]. The targeting context isn't ambient state: it's held by a
//! [`ContextAccessor`] that the caller updates and passes explicitly to [`FeatureManager::is_enabled`].

use alloc::{
    boxed::Box,
    collections::BTreeMap,
    string::{String, ToString as _},
    sync::Arc,
    vec::Vec,
};
use parking_lot::RwLock;
use tracing::debug;

use crate::utils::future::BoxFuture;

/// Who a feature is evaluated for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetingContext {
    pub user_id: String,
    pub groups: Vec<String>,
}

impl TargetingContext {
    #[inline]
    #[must_use]
    pub fn user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            groups: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }
}

/// Single slot holding the current [`TargetingContext`].
///
/// Usually registered as a singleton instance and kept by the caller, who updates it between queries.
#[derive(Debug, Default)]
pub struct ContextAccessor {
    current: RwLock<Option<TargetingContext>>,
}

impl ContextAccessor {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn set_current(&self, context: TargetingContext) {
        *self.current.write() = Some(context);
    }

    #[inline]
    pub fn clear(&self) {
        *self.current.write() = None;
    }

    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<TargetingContext> {
        self.current.read().clone()
    }
}

/// Answers whether a feature is turned on at all.
///
/// Evaluation is asynchronous; dropping the returned future cancels it.
pub trait FeatureEvaluator {
    fn is_enabled<'a>(&'a self, feature: &'a str, context: &'a TargetingContext) -> BoxFuture<'a, bool>;
}

/// Service type under which an evaluator is registered.
pub type BoxFeatureEvaluator = Box<dyn FeatureEvaluator + Send + Sync>;

/// Narrows a feature that is on to the contexts it applies to.
///
/// Filters are registered as bindings of [`BoxFeatureFilter`], usually keyed by [`FeatureFilter::name`],
/// and all of them are handed to the [`FeatureManager`].
pub trait FeatureFilter {
    fn name(&self) -> &str;

    fn evaluate<'a>(&'a self, feature: &'a str, context: &'a TargetingContext) -> BoxFuture<'a, bool>;
}

/// Service type under which a filter is registered.
pub type BoxFeatureFilter = Box<dyn FeatureFilter + Send + Sync>;

/// Combines an evaluator and the filters with the current targeting context.
pub struct FeatureManager {
    evaluator: Arc<BoxFeatureEvaluator>,
    filters: Vec<Arc<BoxFeatureFilter>>,
}

impl FeatureManager {
    #[inline]
    #[must_use]
    pub fn new(evaluator: Arc<BoxFeatureEvaluator>, filters: Vec<Arc<BoxFeatureFilter>>) -> Self {
        Self { evaluator, filters }
    }

    /// Names of the filters, in the order they're consulted.
    #[must_use]
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|filter| filter.name()).collect()
    }

    /// Evaluates `feature` for the current context of `accessor`.
    ///
    /// The feature is enabled when the evaluator turns it on and every filter, consulted in order,
    /// passes it. The first filter that rejects it decides. Without a current context the feature is disabled.
    pub async fn is_enabled(&self, feature: &str, accessor: &ContextAccessor) -> bool {
        let Some(context) = accessor.current() else {
            debug!(feature, "No targeting context, feature is disabled");
            return false;
        };

        if !self.evaluator.is_enabled(feature, &context).await {
            debug!(feature, user_id = %context.user_id, "Feature is off");
            return false;
        }

        for filter in &self.filters {
            if !filter.evaluate(feature, &context).await {
                debug!(feature, user_id = %context.user_id, filter = filter.name(), "Feature rejected by filter");
                return false;
            }
        }

        debug!(feature, user_id = %context.user_id, filters = self.filters.len(), "Feature enabled");
        true
    }
}

/// Lookup-table evaluator: each feature is either on or off. Unknown features are off.
#[derive(Debug, Clone, Default)]
pub struct StaticFeatures {
    states: BTreeMap<String, bool>,
}

impl StaticFeatures {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn enable(mut self, feature: &str) -> Self {
        self.states.insert(feature.to_string(), true);
        self
    }

    #[must_use]
    pub fn disable(mut self, feature: &str) -> Self {
        self.states.insert(feature.to_string(), false);
        self
    }
}

impl FeatureEvaluator for StaticFeatures {
    fn is_enabled<'a>(&'a self, feature: &'a str, _context: &'a TargetingContext) -> BoxFuture<'a, bool> {
        Box::pin(async move { self.states.get(feature).copied().unwrap_or_default() })
    }
}

/// Users and groups a feature is rolled out to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Audience {
    pub users: Vec<String>,
    pub groups: Vec<String>,
}

impl Audience {
    #[must_use]
    pub fn users<I, S>(users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            users: users.into_iter().map(Into::into).collect(),
            groups: Vec::new(),
        }
    }

    #[must_use]
    pub fn groups<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            users: Vec::new(),
            groups: groups.into_iter().map(Into::into).collect(),
        }
    }

    fn contains(&self, context: &TargetingContext) -> bool {
        self.users.iter().any(|user| *user == context.user_id)
            || self.groups.iter().any(|group| context.groups.contains(group))
    }
}

/// Passes a feature only for its [`Audience`]. Features without an audience aren't targeted and always pass.
#[derive(Debug, Clone, Default)]
pub struct TargetingFilter {
    audiences: BTreeMap<String, Audience>,
}

impl TargetingFilter {
    pub const NAME: &'static str = "Targeting";

    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, feature: &str, audience: Audience) -> Self {
        self.audiences.insert(feature.to_string(), audience);
        self
    }
}

impl FeatureFilter for TargetingFilter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate<'a>(&'a self, feature: &'a str, context: &'a TargetingContext) -> BoxFuture<'a, bool> {
        Box::pin(async move {
            self.audiences
                .get(feature)
                .map_or(true, |audience| audience.contains(context))
        })
    }
}
