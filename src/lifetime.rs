/// Lifetime policy of a registration
/// ## Variants
/// - `Singleton`:
///   The instance is created on first resolution, cached and reused until the container is disposed.
/// - `Transient`:
///   A new instance is created on every resolution and never cached.
///   The caller is the only owner of the returned instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifetime {
    #[default]
    Singleton,
    Transient,
}

impl Lifetime {
    #[inline]
    #[must_use]
    pub const fn is_cached(self) -> bool {
        matches!(self, Lifetime::Singleton)
    }

    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Lifetime::Singleton => "singleton",
            Lifetime::Transient => "transient",
        }
    }
}
