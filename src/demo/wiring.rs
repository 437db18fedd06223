//! Registrations of the sample graph.
//!
//! Both application containers share the same services: the logger is a singleton instance,
//! components are singletons that receive the logger by property injection, and strategies are
//! transient bindings keyed by their names. They differ only in how the application finds a strategy.

use alloc::{boxed::Box, format, string::String, sync::Arc, vec::Vec};
use tracing::debug;

use super::{
    application::{Application, BoxApplication, EnumeratingApp, IndexedApp},
    component::{ComponentA, ComponentB},
    logger::BoxLogger,
    strategy::{BoxStrategy, Strategy, StrategyA, StrategyB},
};
use crate::{
    features::{
        Audience, BoxFeatureEvaluator, BoxFeatureFilter, ContextAccessor, FeatureManager, StaticFeatures, TargetingContext,
        TargetingFilter,
    },
    Container, Index, Inject, InjectAll, Lifetime, Prebuilt, RegisterErrorKind, Registration, RegistryBuilder,
    ResolveErrorKind,
};

fn services(logger: BoxLogger) -> Result<RegistryBuilder, RegisterErrorKind> {
    RegistryBuilder::new()
        .provide_instance::<BoxLogger>(logger)?
        .register(
            Registration::constructor(|| Ok(ComponentA::default()))
                .property(|component: &mut ComponentA, Inject(logger): Inject<BoxLogger>| component.set_logger(logger)),
        )?
        .register(
            Registration::constructor(|| Ok(ComponentB::default()))
                .property(|component: &mut ComponentB, Inject(logger): Inject<BoxLogger>| component.set_logger(logger)),
        )?
        .provide_keyed(
            StrategyA::NAME,
            |Inject(logger): Inject<BoxLogger>| Ok(boxed!(StrategyA::new(logger); Strategy + Send + Sync)),
            Lifetime::Transient,
        )?
        .provide_keyed(
            StrategyB::NAME,
            |Inject(logger): Inject<BoxLogger>| Ok(boxed!(StrategyB::new(logger); Strategy + Send + Sync)),
            Lifetime::Transient,
        )
}

/// Application built by a factory from every strategy, see [`EnumeratingApp`].
///
/// # Errors
/// Returns [`RegisterErrorKind`] if a registration is rejected
pub fn enumerating_container(logger: BoxLogger) -> Result<Container, RegisterErrorKind> {
    let registry = services(logger)?.provide_factory(
        |resolver| {
            let InjectAll(strategies) = resolver.inject::<InjectAll<BoxStrategy>>()?;
            let app = EnumeratingApp::new(strategies, resolver.resolve()?, resolver.resolve()?);
            Ok(boxed!(app; Application + Send + Sync))
        },
        Lifetime::Singleton,
    )?;
    Ok(Container::new(registry))
}

/// Application constructed with a lazy strategy index and given its components by property injection,
/// see [`IndexedApp`].
///
/// # Errors
/// Returns [`RegisterErrorKind`] if a registration is rejected
pub fn indexed_container(logger: BoxLogger) -> Result<Container, RegisterErrorKind> {
    let registry = services(logger)?
        .register(
            Registration::constructor(|strategies: Index<BoxStrategy>| Ok(IndexedApp::new(strategies)))
                .property(|app: &mut IndexedApp, Inject(a): Inject<ComponentA>| app.a = Some(a))
                .property(|app: &mut IndexedApp, Inject(b): Inject<ComponentB>| app.b = Some(b)),
        )?
        .provide_factory(
            |resolver| {
                let app = resolver.resolve::<IndexedApp>()?;
                Ok(boxed!(app; Application + Send + Sync))
            },
            Lifetime::Singleton,
        )?;
    Ok(Container::new(registry))
}

/// Resolves the application and runs the strategy named `name` on it.
///
/// # Errors
/// Returns [`ResolveErrorKind`] if the application can't be resolved
pub fn run_strategy(container: &Container, name: &str) -> Result<Arc<BoxApplication>, ResolveErrorKind> {
    let app = container.resolve::<BoxApplication>()?;
    app.run_strategy(name);
    Ok(app)
}

/// "Beta" is turned on.
#[must_use]
pub fn sample_features() -> StaticFeatures {
    StaticFeatures::new().enable("Beta")
}

/// Targeting that rolls "Beta" out to Jeff only.
#[must_use]
pub fn sample_filters() -> Vec<BoxFeatureFilter> {
    Vec::from([Box::new(TargetingFilter::new().with("Beta", Audience::users(["Jeff"]))) as BoxFeatureFilter])
}

/// Container with a feature manager over `features` and `filters`. Each filter is a binding of
/// [`BoxFeatureFilter`] keyed by its name, and the manager receives all of them in registration order.
/// The accessor is registered as an instance and stays shared with the caller.
///
/// # Errors
/// Returns [`RegisterErrorKind`] if a registration is rejected, e.g. two filters with the same name
pub fn feature_container(
    features: StaticFeatures,
    filters: Vec<BoxFeatureFilter>,
    accessor: Arc<ContextAccessor>,
) -> Result<Container, RegisterErrorKind> {
    let mut registry = RegistryBuilder::new()
        .provide_instance::<ContextAccessor>(accessor)?
        .provide_instance::<BoxFeatureEvaluator>(Box::new(features) as BoxFeatureEvaluator)?;

    for filter in filters {
        let name: Box<str> = filter.name().into();
        registry = registry.register(Registration::<BoxFeatureFilter, Prebuilt>::instance(filter).keyed(name))?;
    }

    let registry = registry.provide_factory(
        |resolver| {
            let evaluator = resolver.resolve::<BoxFeatureEvaluator>()?;
            let filters = resolver.resolve_all::<BoxFeatureFilter>()?;
            Ok(FeatureManager::new(evaluator, filters))
        },
        Lifetime::Singleton,
    )?;
    Ok(Container::new(registry))
}

/// Evaluates `feature` for each user in turn, updating the registered accessor before each query.
///
/// Returns one `"<feature> is enabled|disabled for <user>."` line per user.
///
/// # Errors
/// Returns [`ResolveErrorKind`] if the feature manager or the accessor can't be resolved
pub async fn feature_report(container: &Container, users: &[&str], feature: &str) -> Result<Vec<String>, ResolveErrorKind> {
    debug!(feature, users = users.len(), "Feature report");

    let manager = container.resolve::<FeatureManager>()?;
    let accessor = container.resolve::<ContextAccessor>()?;

    let mut report = Vec::with_capacity(users.len());
    for user in users {
        accessor.set_current(TargetingContext::user(*user));
        let state = if manager.is_enabled(feature, &accessor).await {
            "enabled"
        } else {
            "disabled"
        };
        report.push(format!("{feature} is {state} for {user}."));
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::{enumerating_container, feature_container, feature_report, indexed_container, sample_features, sample_filters};
    use crate::{
        demo::{BoxApplication, BoxLogger, BoxStrategy, ConsoleLogger, Logger},
        features::{BoxFeatureFilter, ContextAccessor, FeatureFilter, FeatureManager, TargetingContext},
        utils::future::BoxFuture,
        ServiceKey,
    };

    use alloc::{
        boxed::Box,
        format,
        string::{String, ToString as _},
        sync::Arc,
        vec::Vec,
    };
    use parking_lot::Mutex;
    use tracing_test::traced_test;

    #[test]
    #[traced_test]
    fn test_containers_register_the_same_services() {
        for container in [
            enumerating_container(Box::new(ConsoleLogger)).unwrap(),
            indexed_container(Box::new(ConsoleLogger)).unwrap(),
        ] {
            assert!(container.is_registered::<BoxLogger>());
            assert!(container.is_registered::<BoxApplication>());
            assert_eq!(
                container.keys_of::<BoxStrategy>(),
                [
                    ServiceKey::keyed::<BoxStrategy>("StrategyA"),
                    ServiceKey::keyed::<BoxStrategy>("StrategyB")
                ]
            );
        }
    }

    #[test]
    #[traced_test]
    fn test_logger_is_shared() {
        let container = indexed_container(Box::new(ConsoleLogger)).unwrap();

        let logger = container.resolve::<BoxLogger>().unwrap();
        logger.info("shared");

        assert!(Arc::ptr_eq(&logger, &container.resolve::<BoxLogger>().unwrap()));
        assert!(logs_contain("INFO: shared"));
    }

    #[test]
    #[traced_test]
    fn test_feature_container_shares_accessor() {
        let accessor = Arc::new(ContextAccessor::new());
        let container = feature_container(sample_features(), sample_filters(), accessor.clone()).unwrap();

        assert!(Arc::ptr_eq(&accessor, &container.resolve::<ContextAccessor>().unwrap()));
        assert!(Arc::ptr_eq(
            &container.resolve::<FeatureManager>().unwrap(),
            &container.resolve::<FeatureManager>().unwrap()
        ));
    }

    struct Recording {
        name: &'static str,
        calls: Arc<Mutex<Vec<&'static str>>>,
    }

    impl FeatureFilter for Recording {
        fn name(&self) -> &str {
            self.name
        }

        fn evaluate<'a>(&'a self, _feature: &'a str, _context: &'a TargetingContext) -> BoxFuture<'a, bool> {
            Box::pin(async move {
                self.calls.lock().push(self.name);
                true
            })
        }
    }

    #[tokio::test]
    #[traced_test]
    async fn test_feature_manager_gets_every_filter() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut filters = sample_filters();
        for name in ["Audit", "Rollout"] {
            filters.push(Box::new(Recording {
                name,
                calls: calls.clone(),
            }) as BoxFeatureFilter);
        }

        let container = feature_container(sample_features(), filters, Arc::new(ContextAccessor::new())).unwrap();

        assert_eq!(container.keys_of::<BoxFeatureFilter>().len(), 3);
        assert_eq!(
            container.resolve::<FeatureManager>().unwrap().filter_names(),
            ["Targeting", "Audit", "Rollout"]
        );

        let report = feature_report(&container, &["Jeff", "Sam"], "Beta").await.unwrap();
        assert_eq!(report, ["Beta is enabled for Jeff.", "Beta is disabled for Sam."]);
        // Sam is rejected by targeting before the other filters are asked
        assert_eq!(*calls.lock(), ["Audit", "Rollout"]);
    }

    #[test]
    #[traced_test]
    fn test_filters_with_the_same_name_are_rejected() {
        let mut filters = sample_filters();
        filters.extend(sample_filters());

        assert!(feature_container(sample_features(), filters, Arc::new(ContextAccessor::new())).is_err());
    }
}
