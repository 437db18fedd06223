use alloc::vec::Vec;
use core::{
    any::TypeId,
    fmt::{self, Display, Formatter},
};

use super::InstantiateErrorKind;
use crate::{any::TypeInfo, key::ServiceKey};

#[derive(thiserror::Error, Debug)]
pub enum ResolveErrorKind {
    #[error("Service {key} is not registered")]
    Unregistered { key: ServiceKey },
    #[error("Circular dependency detected: {}", CyclePath(path))]
    CircularDependency { path: Vec<ServiceKey> },
    #[error("Incorrect instantiator provides type. Actual: {actual:?}, expected: {expected}")]
    IncorrectType { expected: TypeInfo, actual: TypeId },
    #[error("Container was dropped before the lookup")]
    ContainerDropped,
    #[error(transparent)]
    Activation(InstantiateErrorKind),
}

impl ResolveErrorKind {
    /// Unwraps resolve errors raised inside a factory, so a nested failure reaches the caller as it was raised.
    #[must_use]
    pub(crate) fn from_instantiate(err: InstantiateErrorKind) -> Self {
        match err {
            InstantiateErrorKind::Resolve(err) => *err,
            err @ InstantiateErrorKind::Custom(_) => Self::Activation(err),
        }
    }
}

struct CyclePath<'a>(&'a [ServiceKey]);

impl Display for CyclePath<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut keys = self.0.iter();
        if let Some(first) = keys.next() {
            write!(f, "{first}")?;
        }
        for key in keys {
            write!(f, " -> {key}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ResolveErrorKind;
    use crate::{key::ServiceKey, InstantiateErrorKind};

    use alloc::{string::ToString as _, vec};

    struct A;
    struct B;

    #[test]
    fn test_cycle_display() {
        let err = ResolveErrorKind::CircularDependency {
            path: vec![ServiceKey::of::<A>(), ServiceKey::keyed::<B>("b"), ServiceKey::of::<A>()],
        };
        assert_eq!(err.to_string(), "Circular dependency detected: A -> B[\"b\"] -> A");
    }

    #[test]
    fn test_from_instantiate_unwraps_resolve() {
        let nested = InstantiateErrorKind::from(ResolveErrorKind::Unregistered { key: ServiceKey::of::<A>() });
        assert!(matches!(
            ResolveErrorKind::from_instantiate(nested),
            ResolveErrorKind::Unregistered { .. }
        ));

        let custom = InstantiateErrorKind::Custom(anyhow::anyhow!("boom"));
        let err = ResolveErrorKind::from_instantiate(custom);
        assert!(matches!(err, ResolveErrorKind::Activation(InstantiateErrorKind::Custom(_))));
        assert_eq!(err.to_string(), "boom");
    }
}
