use alloc::{boxed::Box, collections::BTreeMap, sync::Arc, vec::Vec};
use core::any::TypeId;
use tracing::{debug, error};

use super::{
    errors::{InstantiateErrorKind, RegisterErrorKind},
    registration::{Registration, RegistrationData},
};
use crate::{dependency_resolver::DependencyResolver, instantiator::Instantiator, resolver::Resolver, Lifetime};

pub(crate) type RegistrationId = usize;

/// Collects registrations before the container is built.
///
/// Registration happens only here: once the builder is moved into [`crate::Container::new`]
/// the set of bindings is fixed.
#[derive(Default)]
pub struct RegistryBuilder {
    registry: Registry,
}

impl RegistryBuilder {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a registration.
    ///
    /// # Errors
    /// Returns [`RegisterErrorKind::Duplicate`] if the service already has a default binding and the
    /// registration is unkeyed, or if the service already has a binding with the same key
    pub fn register<T, S>(mut self, registration: Registration<T, S>) -> Result<Self, RegisterErrorKind>
    where
        T: Send + Sync + 'static,
    {
        self.registry.insert(registration.into_data())?;
        Ok(self)
    }

    /// Default binding activated by a constructor function.
    ///
    /// # Errors
    /// See [`Self::register`]
    pub fn provide<Inst, Deps>(self, instantiator: Inst, lifetime: Lifetime) -> Result<Self, RegisterErrorKind>
    where
        Inst: Instantiator<Deps, Error = InstantiateErrorKind>,
        Deps: DependencyResolver + 'static,
    {
        self.register(Registration::constructor(instantiator).lifetime(lifetime))
    }

    /// Keyed binding activated by a constructor function.
    ///
    /// # Errors
    /// See [`Self::register`]
    pub fn provide_keyed<Inst, Deps>(self, key: impl Into<Box<str>>, instantiator: Inst, lifetime: Lifetime) -> Result<Self, RegisterErrorKind>
    where
        Inst: Instantiator<Deps, Error = InstantiateErrorKind>,
        Deps: DependencyResolver + 'static,
    {
        self.register(Registration::constructor(instantiator).lifetime(lifetime).keyed(key))
    }

    /// Default binding activated by a factory receiving the [`Resolver`].
    ///
    /// # Errors
    /// See [`Self::register`]
    pub fn provide_factory<T, F>(self, factory: F, lifetime: Lifetime) -> Result<Self, RegisterErrorKind>
    where
        T: Send + Sync + 'static,
        F: Fn(&Resolver<'_>) -> Result<T, InstantiateErrorKind> + Send + Sync + 'static,
    {
        self.register(Registration::factory(factory).lifetime(lifetime))
    }

    /// Default binding to a value created outside the container.
    ///
    /// # Errors
    /// See [`Self::register`]
    pub fn provide_instance<T>(self, value: impl Into<Arc<T>>) -> Result<Self, RegisterErrorKind>
    where
        T: Send + Sync + 'static,
    {
        self.register(Registration::instance(value))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.len() == 0
    }

    #[inline]
    pub(crate) fn build(self) -> Registry {
        self.registry
    }
}

#[derive(Default)]
struct ServiceEntries {
    default: Option<RegistrationId>,
    keyed: BTreeMap<Box<str>, RegistrationId>,
    all: Vec<RegistrationId>,
}

#[derive(Default)]
pub(crate) struct Registry {
    registrations: Vec<RegistrationData>,
    services: BTreeMap<TypeId, ServiceEntries>,
}

impl Registry {
    fn insert(&mut self, data: RegistrationData) -> Result<RegistrationId, RegisterErrorKind> {
        let id = self.registrations.len();
        let entries = self.services.entry(data.key.type_info.id).or_default();

        let is_duplicate = match &data.key.key {
            Some(key) => entries.keyed.contains_key(key),
            None => entries.default.is_some(),
        };
        if is_duplicate {
            let err = RegisterErrorKind::Duplicate { key: data.key };
            error!("{}", err);
            return Err(err);
        }

        match &data.key.key {
            Some(key) => {
                entries.keyed.insert(key.clone(), id);
            }
            None => entries.default = Some(id),
        }
        entries.all.push(id);

        debug!(
            service = %data.key,
            strategy = data.strategy.name(),
            lifetime = data.lifetime.name(),
            properties = data.properties.len(),
            "Registered"
        );

        self.registrations.push(data);
        Ok(id)
    }

    #[inline]
    #[must_use]
    pub(crate) fn get(&self, id: RegistrationId) -> &RegistrationData {
        &self.registrations[id]
    }

    #[inline]
    #[must_use]
    pub(crate) fn get_default(&self, type_id: &TypeId) -> Option<RegistrationId> {
        self.services.get(type_id).and_then(|entries| entries.default)
    }

    #[inline]
    #[must_use]
    pub(crate) fn get_keyed(&self, type_id: &TypeId, key: &str) -> Option<RegistrationId> {
        self.services.get(type_id).and_then(|entries| entries.keyed.get(key).copied())
    }

    /// Ids of every binding of the service, in registration order.
    #[inline]
    #[must_use]
    pub(crate) fn get_all(&self, type_id: &TypeId) -> &[RegistrationId] {
        self.services.get(type_id).map_or(&[], |entries| entries.all.as_slice())
    }

    #[inline]
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.registrations.len()
    }
}
