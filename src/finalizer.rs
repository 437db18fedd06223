use alloc::sync::Arc;
use tracing::error;

use crate::any::{RcAny, TypeInfo};

/// Called for a cached singleton when the container is disposed.
///
/// Finalizers run in LIFO order of activation (not the order of registration).
///
/// # Warning
/// - Transient instances aren't cached, so their finalizers are never called.
/// - [`Drop`] isn't an equivalent of a finalizer: the finalizer sees the instance while the
///   singletons activated before it are still alive.
pub trait Finalizer<Dep>: Send + Sync + 'static {
    fn finalize(&self, dependency: Arc<Dep>);
}

impl<F, Dep> Finalizer<Dep> for F
where
    F: Fn(Arc<Dep>) + Send + Sync + 'static,
{
    #[inline]
    fn finalize(&self, dependency: Arc<Dep>) {
        self(dependency);
    }
}

pub(crate) type BoxedFinalizer = Arc<dyn Fn(RcAny) + Send + Sync>;

#[must_use]
pub(crate) fn boxed_finalizer<Dep, Fin>(finalizer: Fin) -> BoxedFinalizer
where
    Dep: Send + Sync + 'static,
    Fin: Finalizer<Dep>,
{
    Arc::new(move |dependency: RcAny| match dependency.downcast::<Dep>() {
        Ok(dependency) => finalizer.finalize(dependency),
        Err(_) => error!(expected = %TypeInfo::of::<Dep>(), "Finalizer skipped, cached value has another type"),
    })
}
