use super::errors::ResolveErrorKind;
use crate::resolver::Resolver;

/// A value that can be resolved from the container as a constructor or property dependency.
///
/// Implemented by [`crate::Inject`], [`crate::InjectKeyed`], [`crate::InjectAll`], [`crate::Index`]
/// and by tuples of resolvers, which resolve their elements left to right.
pub trait DependencyResolver: Sized {
    type Error: Into<ResolveErrorKind>;

    /// # Errors
    /// Returns an error if a dependency of the value can't be resolved
    fn resolve(resolver: &Resolver<'_>) -> Result<Self, Self::Error>;
}

macro_rules! impl_dependency_resolver {
    (
        [$($ty:ident),*]
    ) => {
        #[allow(non_snake_case, unused_mut)]
        impl<$($ty,)*> DependencyResolver for ($($ty,)*)
        where
            $( $ty: DependencyResolver, )*
        {
            type Error = ResolveErrorKind;

            #[inline]
            #[allow(unused_variables)]
            fn resolve(resolver: &Resolver<'_>) -> Result<Self, Self::Error> {
                Ok(($($ty::resolve(resolver).map_err(Into::<ResolveErrorKind>::into)?,)*))
            }
        }
    };
}

all_the_tuples!(impl_dependency_resolver);
