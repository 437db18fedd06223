use alloc::{sync::Arc, vec::Vec};
use core::marker::PhantomData;
use tracing::error;

use crate::{
    container::WeakContainer, dependency_resolver::DependencyResolver, key::ServiceName, resolver::Resolver, ResolveErrorKind,
};

/// Default binding of `Dep`. Singletons are shared, transients are fresh on every activation.
pub struct Inject<Dep>(pub Arc<Dep>);

impl<Dep: Send + Sync + 'static> DependencyResolver for Inject<Dep> {
    type Error = ResolveErrorKind;

    fn resolve(resolver: &Resolver<'_>) -> Result<Self, Self::Error> {
        resolver.resolve().map(Self)
    }
}

/// Keyed binding of `Dep` under the name [`ServiceName::NAME`] of `Name`.
pub struct InjectKeyed<Dep, Name: ServiceName>(pub Arc<Dep>, pub PhantomData<Name>);

impl<Dep: Send + Sync + 'static, Name: ServiceName> DependencyResolver for InjectKeyed<Dep, Name> {
    type Error = ResolveErrorKind;

    fn resolve(resolver: &Resolver<'_>) -> Result<Self, Self::Error> {
        resolver.resolve_keyed(Name::NAME).map(|dependency| Self(dependency, PhantomData))
    }
}

/// Every binding of `Dep`, default and keyed, in registration order.
///
/// All of them are activated eagerly. Use [`Index`] to activate only the one you need.
pub struct InjectAll<Dep>(pub Vec<Arc<Dep>>);

impl<Dep: Send + Sync + 'static> DependencyResolver for InjectAll<Dep> {
    type Error = ResolveErrorKind;

    fn resolve(resolver: &Resolver<'_>) -> Result<Self, Self::Error> {
        resolver.resolve_all().map(Self)
    }
}

/// Lazy lookup of keyed bindings of `Dep`.
///
/// Nothing is activated when the index itself is injected; [`Index::try_get`] activates only
/// the binding that was asked for.
pub struct Index<Dep> {
    container: WeakContainer,
    _marker: PhantomData<fn() -> Dep>,
}

impl<Dep: Send + Sync + 'static> Index<Dep> {
    /// Resolves the binding registered under `key`.
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::ContainerDropped`] if the container no longer exists
    /// - Returns the activation error of the binding, if any
    pub fn try_get(&self, key: &str) -> Result<Option<Arc<Dep>>, ResolveErrorKind> {
        let Some(container) = self.container.upgrade() else {
            let err = ResolveErrorKind::ContainerDropped;
            error!("{}", err);
            return Err(err);
        };
        container.try_resolve_keyed(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.container
            .upgrade()
            .is_some_and(|container| container.is_registered_keyed::<Dep>(key))
    }
}

impl<Dep> Clone for Index<Dep> {
    fn clone(&self) -> Self {
        Self {
            container: self.container.clone(),
            _marker: PhantomData,
        }
    }
}

impl<Dep: Send + Sync + 'static> DependencyResolver for Index<Dep> {
    type Error = ResolveErrorKind;

    fn resolve(resolver: &Resolver<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            container: resolver.container().downgrade(),
            _marker: PhantomData,
        })
    }
}
