use alloc::{
    sync::{Arc, Weak},
    vec::Vec,
};
use core::any::TypeId;
use parking_lot::Mutex;
use tracing::{debug, info_span};

use super::cache::Cache;
use crate::{
    cache::Resolved,
    errors::ResolveErrorKind,
    key::ServiceKey,
    lock::ActivationLock,
    registry::{Registry, RegistryBuilder},
    resolver::Resolver,
};

/// Resolution side of the container. Cheap to clone: clones share the registry and the singleton cache.
///
/// # Examples
/// ```rust
/// use std::sync::Arc;
/// use wirebox::{Container, Inject, Lifetime, RegistryBuilder};
///
/// struct Config(u16);
/// struct Server(Arc<Config>);
///
/// let container = Container::new(
///     RegistryBuilder::new()
///         .provide_instance(Config(8080))
///         .unwrap()
///         .provide(|Inject(config): Inject<Config>| Ok(Server(config)), Lifetime::Singleton)
///         .unwrap(),
/// );
///
/// let server = container.resolve::<Server>().unwrap();
/// assert_eq!(server.0 .0, 8080);
/// assert!(Arc::ptr_eq(&server, &container.resolve::<Server>().unwrap()));
/// ```
#[derive(Clone)]
pub struct Container {
    pub(crate) inner: Arc<ContainerInner>,
}

impl Container {
    #[inline]
    #[must_use]
    pub fn new(registry: RegistryBuilder) -> Self {
        let registry = registry.build();
        debug!(registrations = registry.len(), "Container built");

        Self {
            inner: Arc::new(ContainerInner {
                registry,
                cache: Mutex::new(Cache::new()),
                activation: ActivationLock::new(),
            }),
        }
    }

    /// Root resolution handle.
    #[inline]
    #[must_use]
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(self)
    }

    /// See [`Resolver::resolve`].
    #[allow(clippy::missing_errors_doc)]
    #[inline]
    pub fn resolve<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, ResolveErrorKind> {
        self.resolver().resolve()
    }

    /// See [`Resolver::resolve_keyed`].
    #[allow(clippy::missing_errors_doc)]
    #[inline]
    pub fn resolve_keyed<T: Send + Sync + 'static>(&self, key: &str) -> Result<Arc<T>, ResolveErrorKind> {
        self.resolver().resolve_keyed(key)
    }

    /// See [`Resolver::try_resolve_keyed`].
    #[allow(clippy::missing_errors_doc)]
    #[inline]
    pub fn try_resolve_keyed<T: Send + Sync + 'static>(&self, key: &str) -> Result<Option<Arc<T>>, ResolveErrorKind> {
        self.resolver().try_resolve_keyed(key)
    }

    /// See [`Resolver::resolve_all`].
    #[allow(clippy::missing_errors_doc)]
    #[inline]
    pub fn resolve_all<T: Send + Sync + 'static>(&self) -> Result<Vec<Arc<T>>, ResolveErrorKind> {
        self.resolver().resolve_all()
    }

    #[inline]
    #[must_use]
    pub fn is_registered<T: 'static>(&self) -> bool {
        self.inner.registry.get_default(&TypeId::of::<T>()).is_some()
    }

    #[inline]
    #[must_use]
    pub fn is_registered_keyed<T: 'static>(&self, key: &str) -> bool {
        self.inner.registry.get_keyed(&TypeId::of::<T>(), key).is_some()
    }

    /// Keys of every binding of `T`, in registration order.
    #[must_use]
    pub fn keys_of<T: 'static>(&self) -> Vec<ServiceKey> {
        self.inner
            .registry
            .get_all(&TypeId::of::<T>())
            .iter()
            .map(|id| self.inner.registry.get(*id).key.clone())
            .collect()
    }

    /// Number of registrations.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.registry.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every cached singleton, calling finalizers in LIFO order of activation.
    ///
    /// The container stays usable: the next resolution of a singleton creates a new instance.
    /// Dispose is also called when the last clone of the container is dropped.
    pub fn dispose(&self) {
        self.inner.dispose();
    }

    #[inline]
    #[must_use]
    pub fn downgrade(&self) -> WeakContainer {
        WeakContainer {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

/// Non-owning handle of a [`Container`], used by lazy lookups that are stored inside singletons.
#[derive(Clone)]
pub struct WeakContainer {
    inner: Weak<ContainerInner>,
}

impl WeakContainer {
    #[inline]
    #[must_use]
    pub fn upgrade(&self) -> Option<Container> {
        self.inner.upgrade().map(|inner| Container { inner })
    }
}

pub(crate) struct ContainerInner {
    pub(crate) registry: Registry,
    pub(crate) cache: Mutex<Cache>,
    pub(crate) activation: ActivationLock,
}

impl ContainerInner {
    fn dispose(&self) {
        let span = info_span!("dispose");
        let _guard = span.enter();

        // Activations in progress on other threads finish before the cache is emptied
        let _activation = self.activation.lock();
        let mut resolved_set = self.cache.lock().take();

        while let Some(Resolved { id, dependency }) = resolved_set.pop() {
            let data = self.registry.get(id);
            if let Some(finalizer) = &data.finalizer {
                finalizer(dependency);
                debug!(service = %data.key, "Finalizer called");
            }
        }
        debug!("Disposed");
    }
}

impl Drop for ContainerInner {
    fn drop(&mut self) {
        self.dispose();
        debug!("Container disposed on drop");
    }
}
