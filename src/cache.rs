use alloc::collections::{vec_deque::VecDeque, BTreeMap};
use core::mem;

use crate::{any::RcAny, registry::RegistrationId};

/// Singleton instances by registration, plus the activation order of those with a finalizer.
#[derive(Default)]
pub(crate) struct Cache {
    map: BTreeMap<RegistrationId, RcAny>,
    resolved: ResolvedSet,
}

impl Cache {
    #[inline]
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub(crate) fn get(&self, id: RegistrationId) -> Option<RcAny> {
        self.map.get(&id).cloned()
    }

    #[inline]
    pub(crate) fn insert(&mut self, id: RegistrationId, dependency: RcAny) {
        self.map.insert(id, dependency);
    }

    #[inline]
    pub(crate) fn push_resolved(&mut self, resolved: Resolved) {
        self.resolved.push(resolved);
    }

    #[cfg(test)]
    #[inline]
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    /// Empties the cache, returning the resolved set to finalize.
    #[must_use]
    pub(crate) fn take(&mut self) -> ResolvedSet {
        self.map.clear();
        mem::take(&mut self.resolved)
    }
}

pub(crate) struct Resolved {
    pub(crate) id: RegistrationId,
    pub(crate) dependency: RcAny,
}

#[derive(Default)]
pub(crate) struct ResolvedSet(pub(crate) VecDeque<Resolved>);

impl ResolvedSet {
    #[inline]
    pub(crate) fn push(&mut self, resolved: Resolved) {
        self.0.push_back(resolved);
    }

    /// Last activated first.
    #[inline]
    pub(crate) fn pop(&mut self) -> Option<Resolved> {
        self.0.pop_back()
    }
}
