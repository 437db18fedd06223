use alloc::sync::Arc;
use core::{
    any::{type_name, Any, TypeId},
    cmp::Ordering,
    fmt::{self, Display, Formatter},
};

pub(crate) type RcAny = Arc<dyn Any + Send + Sync>;
pub(crate) type BoxAny = alloc::boxed::Box<dyn Any + Send + Sync>;

/// Identity of a service type: its `TypeId` plus the type name for diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    pub name: &'static str,
    pub id: TypeId,
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl PartialOrd for TypeInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Display for TypeInfo {
    /// Writes the type name with every module path stripped:
    /// `alloc::boxed::Box<dyn wirebox::demo::Strategy + Send>` is shown as `Box<dyn Strategy + Send>`.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut segment_start = 0;
        for (idx, ch) in self.name.char_indices() {
            if matches!(ch, '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | '&' | ';') {
                f.write_str(strip_path(&self.name[segment_start..idx]))?;
                write!(f, "{ch}")?;
                segment_start = idx + ch.len_utf8();
            }
        }
        f.write_str(strip_path(&self.name[segment_start..]))
    }
}

fn strip_path(segment: &str) -> &str {
    segment.rsplit_once("::").map_or(segment, |(_, name)| name)
}

impl TypeInfo {
    #[inline]
    #[must_use]
    pub fn of<T>() -> Self
    where
        T: ?Sized + 'static,
    {
        Self {
            name: type_name::<T>(),
            id: TypeId::of::<T>(),
        }
    }

    #[inline]
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit_once("::").map_or(self.name, |(_, name)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::TypeInfo;

    use alloc::{boxed::Box, string::ToString as _};

    struct Logger;

    #[test]
    fn test_equality_by_type_id() {
        assert_eq!(TypeInfo::of::<Logger>(), TypeInfo::of::<Logger>());
        assert_ne!(TypeInfo::of::<Logger>(), TypeInfo::of::<Box<Logger>>());
    }

    #[test]
    fn test_short_name() {
        assert_eq!(TypeInfo::of::<Logger>().short_name(), "Logger");
        assert_eq!(TypeInfo::of::<u8>().short_name(), "u8");
    }

    #[test]
    fn test_display_strips_nested_paths() {
        assert_eq!(TypeInfo::of::<Box<Logger>>().to_string(), "Box<Logger>");
        assert_eq!(
            TypeInfo::of::<Box<dyn core::fmt::Debug + Send>>().to_string(),
            "Box<dyn Debug + Send>"
        );
    }
}
