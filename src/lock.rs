use alloc::vec::Vec;
use core::cell::RefCell;
use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

use crate::registry::RegistrationId;

/// Serializes activation and keeps the path of registrations being activated.
///
/// Reentrant, so an activation that resolves other services on the same thread doesn't deadlock,
/// whether it goes through a [`crate::Resolver`], the container itself or an [`crate::Index`].
/// Another thread waits until the whole activation chain finishes. Only the thread holding the
/// lock touches the path, so the path is exactly that thread's chain of activations.
pub(crate) struct ActivationLock {
    inner: ReentrantMutex<RefCell<Vec<RegistrationId>>>,
}

impl ActivationLock {
    #[inline]
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            inner: ReentrantMutex::new(RefCell::new(Vec::new())),
        }
    }

    #[inline]
    #[must_use]
    pub(crate) fn lock(&self) -> ActivationGuard<'_> {
        ActivationGuard { path: self.inner.lock() }
    }
}

pub(crate) struct ActivationGuard<'a> {
    path: ReentrantMutexGuard<'a, RefCell<Vec<RegistrationId>>>,
}

impl ActivationGuard<'_> {
    /// Pushes `id` on the activation path until the returned [`Activating`] is dropped.
    ///
    /// # Errors
    /// Returns the registrations from the first activation of `id` to the innermost one if `id`
    /// is already being activated
    pub(crate) fn enter(&self, id: RegistrationId) -> Result<Activating<'_>, Vec<RegistrationId>> {
        let mut path = self.path.borrow_mut();
        if let Some(start) = path.iter().position(|active| *active == id) {
            return Err(path[start..].to_vec());
        }
        path.push(id);

        Ok(Activating { path: &*self.path })
    }

    #[inline]
    #[must_use]
    pub(crate) fn depth(&self) -> usize {
        self.path.borrow().len()
    }
}

/// Registration on the activation path. Popped on drop, also when the activation panics.
pub(crate) struct Activating<'a> {
    path: &'a RefCell<Vec<RegistrationId>>,
}

impl Drop for Activating<'_> {
    fn drop(&mut self) {
        self.path.borrow_mut().pop();
    }
}
