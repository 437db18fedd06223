use alloc::{sync::Arc, vec::Vec};
use core::any::TypeId;
use tracing::{debug, error, info_span};

use crate::{
    any::{RcAny, TypeInfo},
    cache::Resolved,
    container::Container,
    dependency_resolver::DependencyResolver,
    errors::{InstantiateErrorKind, ResolveErrorKind},
    key::ServiceKey,
    lock::ActivationGuard,
    registration::{RegistrationData, Strategy},
    registry::RegistrationId,
};

/// Resolution handle passed to factories and dependency resolvers.
///
/// Every activation, whichever handle started it, runs under the activation lock of the container,
/// which keeps the chain of registrations being activated. A resolve that re-enters a registration
/// on that chain fails with [`ResolveErrorKind::CircularDependency`].
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    container: &'a Container,
}

impl<'a> Resolver<'a> {
    #[inline]
    #[must_use]
    pub(crate) const fn new(container: &'a Container) -> Self {
        Self { container }
    }

    #[inline]
    #[must_use]
    pub fn container(&self) -> &'a Container {
        self.container
    }

    /// Resolves the default binding of `T`.
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::Unregistered`] if `T` has no default binding, even if keyed bindings exist
    /// - Returns [`ResolveErrorKind::CircularDependency`] if resolving `T` re-enters a registration that is still being activated
    /// - Returns [`ResolveErrorKind::Activation`] if the production strategy of `T` or one of its dependencies fails
    pub fn resolve<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, ResolveErrorKind> {
        let span = info_span!("resolve", service = %TypeInfo::of::<T>());
        let _guard = span.enter();

        let Some(id) = self.container.inner.registry.get_default(&TypeId::of::<T>()) else {
            let err = ResolveErrorKind::Unregistered { key: ServiceKey::of::<T>() };
            error!("{}", err);
            return Err(err);
        };
        downcast(self.resolve_id(id)?)
    }

    /// Resolves the binding of `T` registered under `key`.
    ///
    /// # Errors
    /// Same as [`Self::resolve`]. A missing key is [`ResolveErrorKind::Unregistered`]
    pub fn resolve_keyed<T: Send + Sync + 'static>(&self, key: &str) -> Result<Arc<T>, ResolveErrorKind> {
        match self.try_resolve_keyed(key)? {
            Some(dependency) => Ok(dependency),
            None => {
                let err = ResolveErrorKind::Unregistered {
                    key: ServiceKey::keyed::<T>(key),
                };
                error!("{}", err);
                Err(err)
            }
        }
    }

    /// Resolves the binding of `T` registered under `key`, if there is one.
    ///
    /// Only that binding is activated; the other bindings of `T` aren't touched.
    ///
    /// # Errors
    /// Same as [`Self::resolve`], except a missing key isn't an error
    pub fn try_resolve_keyed<T: Send + Sync + 'static>(&self, key: &str) -> Result<Option<Arc<T>>, ResolveErrorKind> {
        let span = info_span!("resolve_keyed", service = %TypeInfo::of::<T>(), key);
        let _guard = span.enter();

        let Some(id) = self.container.inner.registry.get_keyed(&TypeId::of::<T>(), key) else {
            debug!("No binding under the key");
            return Ok(None);
        };
        downcast(self.resolve_id(id)?).map(Some)
    }

    /// Resolves every binding of `T`, default and keyed, in registration order.
    ///
    /// Returns an empty sequence if `T` has no bindings.
    ///
    /// # Errors
    /// Returns the first error of activating any binding. Nothing is returned partially
    pub fn resolve_all<T: Send + Sync + 'static>(&self) -> Result<Vec<Arc<T>>, ResolveErrorKind> {
        let span = info_span!("resolve_all", service = %TypeInfo::of::<T>());
        let _guard = span.enter();

        let ids = self.container.inner.registry.get_all(&TypeId::of::<T>());
        debug!(count = ids.len(), "Bindings found");

        ids.iter().map(|id| downcast(self.resolve_id(*id)?)).collect()
    }

    /// Resolves any [`DependencyResolver`], e.g. [`crate::Inject`] or a tuple of them.
    ///
    /// # Errors
    /// Returns the error of the dependency resolver
    #[inline]
    pub fn inject<D: DependencyResolver>(&self) -> Result<D, ResolveErrorKind> {
        D::resolve(self).map_err(Into::into)
    }

    fn resolve_id(&self, id: RegistrationId) -> Result<RcAny, ResolveErrorKind> {
        let data = self.container.inner.registry.get(id);

        if data.lifetime.is_cached() {
            self.resolve_singleton(id, data)
        } else {
            let activation = self.container.inner.activation.lock();
            self.activate(&activation, id, data)
        }
    }

    fn resolve_singleton(&self, id: RegistrationId, data: &RegistrationData) -> Result<RcAny, ResolveErrorKind> {
        let inner = &self.container.inner;

        let cached = inner.cache.lock().get(id);
        if let Some(dependency) = cached {
            debug!("Found in cache");
            return Ok(dependency);
        }

        let activation = inner.activation.lock();

        // Another thread may have finished the activation while we waited
        let cached = inner.cache.lock().get(id);
        if let Some(dependency) = cached {
            debug!("Found in cache after waiting for activation");
            return Ok(dependency);
        }
        debug!("Not found in cache");

        let dependency = self.activate(&activation, id, data)?;

        let mut cache = inner.cache.lock();
        cache.insert(id, dependency.clone());
        debug!("Cached");

        if data.finalizer.is_some() {
            cache.push_resolved(Resolved {
                id,
                dependency: dependency.clone(),
            });
            debug!("Pushed to resolved set");
        }
        Ok(dependency)
    }

    fn activate(
        &self,
        activation: &ActivationGuard<'_>,
        id: RegistrationId,
        data: &RegistrationData,
    ) -> Result<RcAny, ResolveErrorKind> {
        let instantiator = match &data.strategy {
            Strategy::Instance(instance) => return Ok(instance.clone()),
            Strategy::Factory(instantiator) | Strategy::Constructor(instantiator) => instantiator,
        };

        let _activating = activation.enter(id).map_err(|cycle| self.circular_dependency(&cycle, &data.key))?;
        let depth = activation.depth();

        let mut dependency = instantiator(self).map_err(|err| {
            // Resolve errors were logged where they were raised
            if let InstantiateErrorKind::Custom(_) = &err {
                error!(service = %data.key, "Activation failed: {}", err);
            }
            ResolveErrorKind::from_instantiate(err)
        })?;

        for property in &data.properties {
            property(&mut *dependency, self)?;
        }

        debug!(
            service = %data.key,
            strategy = data.strategy.name(),
            lifetime = data.lifetime.name(),
            depth,
            "Activated"
        );
        Ok(RcAny::from(dependency))
    }

    fn circular_dependency(&self, cycle: &[RegistrationId], key: &ServiceKey) -> ResolveErrorKind {
        let registry = &self.container.inner.registry;

        let mut path: Vec<ServiceKey> = cycle.iter().map(|id| registry.get(*id).key.clone()).collect();
        path.push(key.clone());

        let err = ResolveErrorKind::CircularDependency { path };
        error!("{}", err);
        err
    }
}

fn downcast<T: Send + Sync + 'static>(dependency: RcAny) -> Result<Arc<T>, ResolveErrorKind> {
    dependency.downcast::<T>().map_err(|dependency| {
        let err = ResolveErrorKind::IncorrectType {
            expected: TypeInfo::of::<T>(),
            actual: (*dependency).type_id(),
        };
        error!("{}", err);
        err
    })
}
