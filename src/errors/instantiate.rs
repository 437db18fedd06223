use alloc::boxed::Box;

use super::ResolveErrorKind;

/// Failure of a production strategy itself.
///
/// The container never wraps or retries it: [`ResolveErrorKind::Activation`] is transparent,
/// and a [`InstantiateErrorKind::Resolve`] coming out of a factory is surfaced as the inner
/// resolve error.
#[derive(thiserror::Error, Debug)]
pub enum InstantiateErrorKind {
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
    #[error(transparent)]
    Resolve(Box<ResolveErrorKind>),
}

impl From<ResolveErrorKind> for InstantiateErrorKind {
    #[inline]
    fn from(err: ResolveErrorKind) -> Self {
        Self::Resolve(Box::new(err))
    }
}
