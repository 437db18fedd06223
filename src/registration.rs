use alloc::{boxed::Box, sync::Arc, vec::Vec};
use core::marker::PhantomData;

use crate::{
    any::{RcAny, TypeInfo},
    dependency_resolver::DependencyResolver,
    errors::InstantiateErrorKind,
    finalizer::{boxed_finalizer, BoxedFinalizer, Finalizer},
    instantiator::{boxed_factory, boxed_instantiator, BoxedInstantiator, Instantiator},
    key::ServiceKey,
    lifetime::Lifetime,
    property::{boxed_property, BoxedProperty, PropertyInjector},
    resolver::Resolver,
};

/// Marker of registrations activated by the container (constructor or factory).
pub struct Activated;

/// Marker of registrations of a value built outside the container.
pub struct Prebuilt;

/// Description of one binding of the service `T`: how it's produced, its lifetime, an optional
/// key, the properties injected after construction and an optional finalizer.
///
/// # Examples
/// ```rust
/// use std::sync::Arc;
/// use wirebox::{Container, Inject, Registration, RegistryBuilder};
///
/// struct Logger;
///
/// #[derive(Default)]
/// struct Component {
///     logger: Option<Arc<Logger>>,
/// }
///
/// let registry = RegistryBuilder::new()
///     .register(Registration::instance(Logger))
///     .unwrap()
///     .register(
///         Registration::constructor(|| Ok(Component::default()))
///             .property(|component: &mut Component, Inject(logger): Inject<Logger>| component.logger = Some(logger)),
///     )
///     .unwrap();
///
/// let component = Container::new(registry).resolve::<Component>().unwrap();
/// assert!(component.logger.is_some());
/// ```
#[must_use]
pub struct Registration<T, S = Activated> {
    key: Option<Box<str>>,
    lifetime: Lifetime,
    strategy: Strategy,
    properties: Vec<BoxedProperty>,
    finalizer: Option<BoxedFinalizer>,
    _marker: PhantomData<fn() -> (T, S)>,
}

impl<T: Send + Sync + 'static> Registration<T, Activated> {
    /// Activates `T` by calling `instantiator` with its arguments resolved from the container.
    pub fn constructor<Inst, Deps>(instantiator: Inst) -> Self
    where
        Inst: Instantiator<Deps, Provides = T, Error = InstantiateErrorKind>,
        Deps: DependencyResolver + 'static,
    {
        Self::with_strategy(Strategy::Constructor(boxed_instantiator::<Inst, Deps>(instantiator)))
    }

    /// Activates `T` by calling `factory` with a [`Resolver`], which it may use to resolve anything it needs.
    pub fn factory<F>(factory: F) -> Self
    where
        F: Fn(&Resolver<'_>) -> Result<T, InstantiateErrorKind> + Send + Sync + 'static,
    {
        Self::with_strategy(Strategy::Factory(boxed_factory(factory)))
    }

    #[inline]
    pub fn lifetime(mut self, lifetime: Lifetime) -> Self {
        self.lifetime = lifetime;
        self
    }

    #[inline]
    pub fn singleton(self) -> Self {
        self.lifetime(Lifetime::Singleton)
    }

    #[inline]
    pub fn transient(self) -> Self {
        self.lifetime(Lifetime::Transient)
    }

    /// Adds a property to the injection plan. Properties are applied in the order they're added.
    pub fn property<P, Dep>(mut self, property: P) -> Self
    where
        P: PropertyInjector<T, Dep>,
        Dep: DependencyResolver + 'static,
    {
        self.properties.push(boxed_property::<T, Dep, P>(property));
        self
    }

    fn with_strategy(strategy: Strategy) -> Self {
        Self {
            key: None,
            lifetime: Lifetime::default(),
            strategy,
            properties: Vec::new(),
            finalizer: None,
            _marker: PhantomData,
        }
    }
}

impl<T: Send + Sync + 'static> Registration<T, Prebuilt> {
    /// Registers a value created outside the container. It's always a singleton:
    /// every resolution returns the same `Arc`, shared with whoever else holds it.
    pub fn instance(value: impl Into<Arc<T>>) -> Self {
        let instance: Arc<T> = value.into();
        Self {
            key: None,
            lifetime: Lifetime::Singleton,
            strategy: Strategy::Instance(instance),
            properties: Vec::new(),
            finalizer: None,
            _marker: PhantomData,
        }
    }
}

impl<T: Send + Sync + 'static, S> Registration<T, S> {
    /// Registers the binding under `key` instead of as the default binding of `T`.
    #[inline]
    pub fn keyed(mut self, key: impl Into<Box<str>>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets a finalizer called with the cached instance when the container is disposed.
    #[inline]
    pub fn finalizer(mut self, finalizer: impl Finalizer<T>) -> Self {
        self.finalizer = Some(boxed_finalizer::<T, _>(finalizer));
        self
    }

    pub(crate) fn into_data(self) -> RegistrationData {
        RegistrationData {
            key: ServiceKey {
                type_info: TypeInfo::of::<T>(),
                key: self.key,
            },
            lifetime: self.lifetime,
            strategy: self.strategy,
            properties: self.properties,
            finalizer: self.finalizer,
        }
    }
}

pub(crate) enum Strategy {
    Instance(RcAny),
    Factory(BoxedInstantiator),
    Constructor(BoxedInstantiator),
}

impl Strategy {
    #[inline]
    pub(crate) const fn name(&self) -> &'static str {
        match self {
            Strategy::Instance(_) => "instance",
            Strategy::Factory(_) => "factory",
            Strategy::Constructor(_) => "constructor",
        }
    }
}

pub(crate) struct RegistrationData {
    pub(crate) key: ServiceKey,
    pub(crate) lifetime: Lifetime,
    pub(crate) strategy: Strategy,
    pub(crate) properties: Vec<BoxedProperty>,
    pub(crate) finalizer: Option<BoxedFinalizer>,
}
