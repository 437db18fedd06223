use alloc::{boxed::Box, sync::Arc};
use tracing::debug;

use super::{
    dependency_resolver::DependencyResolver,
    errors::{InstantiateErrorKind, ResolveErrorKind},
};
use crate::{any::BoxAny, resolver::Resolver};

/// Constructor-style production strategy: a function whose arguments are resolved from the container.
///
/// Implemented for every `Fn(Deps...) -> Result<T, E>` where each argument is a [`DependencyResolver`].
pub trait Instantiator<Deps>: Send + Sync + 'static
where
    Deps: DependencyResolver,
{
    type Provides: Send + Sync + 'static;
    type Error: Into<InstantiateErrorKind>;

    /// # Errors
    /// Returns the error of the production strategy itself
    fn instantiate(&self, dependencies: Deps) -> Result<Self::Provides, Self::Error>;
}

pub(crate) type BoxedInstantiator = Arc<dyn Fn(&Resolver<'_>) -> Result<BoxAny, InstantiateErrorKind> + Send + Sync>;

#[must_use]
pub(crate) fn boxed_instantiator<Inst, Deps>(instantiator: Inst) -> BoxedInstantiator
where
    Inst: Instantiator<Deps>,
    Deps: DependencyResolver + 'static,
{
    Arc::new(move |resolver: &Resolver<'_>| {
        let dependencies = Deps::resolve(resolver).map_err(|err| InstantiateErrorKind::from(Into::<ResolveErrorKind>::into(err)))?;
        let dependency = instantiator.instantiate(dependencies).map_err(Into::<InstantiateErrorKind>::into)?;

        debug!("Instantiated");

        Ok(Box::new(dependency) as BoxAny)
    })
}

#[must_use]
pub(crate) fn boxed_factory<T, F>(factory: F) -> BoxedInstantiator
where
    T: Send + Sync + 'static,
    F: Fn(&Resolver<'_>) -> Result<T, InstantiateErrorKind> + Send + Sync + 'static,
{
    Arc::new(move |resolver: &Resolver<'_>| {
        let dependency = factory(resolver)?;

        debug!("Produced by factory");

        Ok(Box::new(dependency) as BoxAny)
    })
}

macro_rules! impl_instantiator {
    (
        [$($ty:ident),*]
    ) => {
        #[allow(non_snake_case)]
        impl<F, Response, Err, $($ty,)*> Instantiator<($($ty,)*)> for F
        where
            F: Fn($($ty,)*) -> Result<Response, Err> + Send + Sync + 'static,
            Response: Send + Sync + 'static,
            Err: Into<InstantiateErrorKind>,
            $( $ty: DependencyResolver, )*
        {
            type Provides = Response;
            type Error = Err;

            fn instantiate(&self, ($($ty,)*): ($($ty,)*)) -> Result<Self::Provides, Self::Error> {
                self($($ty,)*)
            }
        }
    };
}

all_the_tuples!(impl_instantiator);

#[cfg(test)]
mod tests {
    extern crate std;

    use super::{boxed_factory, boxed_instantiator, DependencyResolver, InstantiateErrorKind, Instantiator};
    use crate::{inject::Inject, Container, Lifetime, RegistryBuilder, ResolveErrorKind};

    use alloc::{
        format,
        string::{String, ToString as _},
        sync::Arc,
    };
    use core::sync::atomic::{AtomicU8, Ordering};
    use tracing::debug;
    use tracing_test::traced_test;

    struct Request(bool);
    struct Response(bool);

    #[test]
    #[allow(dead_code)]
    fn test_factory_helper() {
        fn resolver<Deps: DependencyResolver, F: Instantiator<Deps>>(_f: F) {}
        fn resolver_with_dep<Deps: DependencyResolver>() {
            resolver(|| Ok::<_, InstantiateErrorKind>(()));
        }
    }

    #[test]
    #[traced_test]
    fn test_boxed_instantiator() {
        let instantiator_request_call_count = Arc::new(AtomicU8::new(0));
        let instantiator_response_call_count = Arc::new(AtomicU8::new(0));

        let container = Container::new(
            RegistryBuilder::new()
                .provide(
                    {
                        let instantiator_request_call_count = instantiator_request_call_count.clone();
                        move || {
                            instantiator_request_call_count.fetch_add(1, Ordering::SeqCst);

                            debug!("Call instantiator request");
                            Ok(Request(true))
                        }
                    },
                    Lifetime::Transient,
                )
                .unwrap(),
        );

        let instantiator_response = boxed_instantiator({
            let instantiator_response_call_count = instantiator_response_call_count.clone();
            move |Inject(val_1): Inject<Request>, Inject(val_2): Inject<Request>| {
                assert_eq!(val_1.0, val_2.0);

                instantiator_response_call_count.fetch_add(1, Ordering::SeqCst);

                debug!("Call instantiator response");
                Ok::<_, InstantiateErrorKind>(Response(val_1.0))
            }
        });

        let response_1 = instantiator_response(&container.resolver()).unwrap();
        let response_2 = instantiator_response(&container.resolver()).unwrap();

        assert!(response_1.downcast::<Response>().unwrap().0);
        assert!(response_2.downcast::<Response>().unwrap().0);
        assert_eq!(instantiator_request_call_count.load(Ordering::SeqCst), 4);
        assert_eq!(instantiator_response_call_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    #[traced_test]
    fn test_boxed_instantiator_missing_dependency() {
        let container = Container::new(RegistryBuilder::new());

        let instantiator = boxed_instantiator(|Inject(request): Inject<Request>| Ok::<_, InstantiateErrorKind>(Response(request.0)));

        match instantiator(&container.resolver()) {
            Err(InstantiateErrorKind::Resolve(err)) => assert!(matches!(*err, ResolveErrorKind::Unregistered { .. })),
            _ => panic!("expected an unregistered dependency"),
        }
    }

    #[test]
    #[traced_test]
    fn test_boxed_factory() {
        let container = Container::new(RegistryBuilder::new().provide_instance(Request(true)).unwrap());

        let factory = boxed_factory(|resolver| {
            let request = resolver.resolve::<Request>()?;
            Ok(Response(request.0))
        });

        let response = factory(&container.resolver()).unwrap();
        assert!(response.downcast::<Response>().unwrap().0);
    }
}
