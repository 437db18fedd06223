use alloc::boxed::Box;
use core::fmt::{self, Display, Formatter};

use crate::any::TypeInfo;

/// Identifies one registration: the service type plus an optional key.
///
/// The unkeyed form is the default binding of the service. Keyed forms distinguish several
/// implementations of the same contract, for example `"StrategyA"` and `"StrategyB"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ServiceKey {
    pub type_info: TypeInfo,
    pub key: Option<Box<str>>,
}

impl ServiceKey {
    #[inline]
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_info: TypeInfo::of::<T>(),
            key: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn keyed<T: ?Sized + 'static>(key: &str) -> Self {
        Self {
            type_info: TypeInfo::of::<T>(),
            key: Some(key.into()),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.key.is_none()
    }
}

impl Display for ServiceKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "{}[{key:?}]", self.type_info),
            None => write!(f, "{}", self.type_info),
        }
    }
}

/// Compile-time name of a keyed binding, used by [`crate::InjectKeyed`].
///
/// ```rust
/// use wirebox::ServiceName;
///
/// struct StrategyA;
///
/// impl ServiceName for StrategyA {
///     const NAME: &'static str = "StrategyA";
/// }
/// ```
pub trait ServiceName: 'static {
    const NAME: &'static str;
}

#[cfg(test)]
mod tests {
    use super::ServiceKey;

    use alloc::string::ToString as _;

    struct Strategy;

    #[test]
    fn test_display() {
        assert_eq!(ServiceKey::of::<Strategy>().to_string(), "Strategy");
        assert_eq!(ServiceKey::keyed::<Strategy>("StrategyA").to_string(), "Strategy[\"StrategyA\"]");
    }

    #[test]
    fn test_default_and_keyed_differ() {
        assert!(ServiceKey::of::<Strategy>().is_default());
        assert_ne!(ServiceKey::of::<Strategy>(), ServiceKey::keyed::<Strategy>("StrategyA"));
        assert_ne!(ServiceKey::keyed::<Strategy>("StrategyA"), ServiceKey::keyed::<Strategy>("StrategyB"));
    }
}
