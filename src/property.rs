use alloc::sync::Arc;
use core::any::Any;
use tracing::{debug, error};

use crate::{any::TypeInfo, dependency_resolver::DependencyResolver, resolver::Resolver, ResolveErrorKind};

/// Setter applied to a freshly constructed `T`, after its constructor dependencies are resolved.
///
/// Implemented for every `Fn(&mut T, Dep)` where `Dep` is a [`DependencyResolver`].
///
/// ```rust
/// use std::sync::Arc;
/// use wirebox::Inject;
///
/// struct Logger;
///
/// #[derive(Default)]
/// struct Component {
///     logger: Option<Arc<Logger>>,
/// }
///
/// let _property = |component: &mut Component, Inject(logger): Inject<Logger>| component.logger = Some(logger);
/// ```
pub trait PropertyInjector<T, Dep>: Send + Sync + 'static
where
    Dep: DependencyResolver,
{
    fn inject(&self, target: &mut T, dependency: Dep);
}

impl<F, T, Dep> PropertyInjector<T, Dep> for F
where
    F: Fn(&mut T, Dep) + Send + Sync + 'static,
    Dep: DependencyResolver,
{
    #[inline]
    fn inject(&self, target: &mut T, dependency: Dep) {
        self(target, dependency);
    }
}

pub(crate) type BoxedProperty = Arc<dyn Fn(&mut (dyn Any + Send + Sync), &Resolver<'_>) -> Result<(), ResolveErrorKind> + Send + Sync>;

#[must_use]
pub(crate) fn boxed_property<T, Dep, P>(property: P) -> BoxedProperty
where
    T: Send + Sync + 'static,
    Dep: DependencyResolver + 'static,
    P: PropertyInjector<T, Dep>,
{
    Arc::new(move |target: &mut (dyn Any + Send + Sync), resolver: &Resolver<'_>| {
        let dependency = Dep::resolve(resolver).map_err(Into::<ResolveErrorKind>::into)?;

        let actual = (*target).type_id();
        let Some(target) = target.downcast_mut::<T>() else {
            let err = ResolveErrorKind::IncorrectType {
                expected: TypeInfo::of::<T>(),
                actual,
            };
            error!("{}", err);
            return Err(err);
        };
        property.inject(target, dependency);

        debug!(dependency = %TypeInfo::of::<Dep>(), "Property injected");
        Ok(())
    })
}
