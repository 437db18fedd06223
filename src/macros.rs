/// Invokes `$name!` once per tuple arity, from the empty tuple up to 16 elements.
macro_rules! all_the_tuples {
    ($name:ident) => {
        $name!([]);
        $name!([T1]);
        $name!([T1, T2]);
        $name!([T1, T2, T3]);
        $name!([T1, T2, T3, T4]);
        $name!([T1, T2, T3, T4, T5]);
        $name!([T1, T2, T3, T4, T5, T6]);
        $name!([T1, T2, T3, T4, T5, T6, T7]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8, T9]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8, T9, T10]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13, T14]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13, T14, T15]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13, T14, T15, T16]);
    };
}

/// Creates a `Box<dyn Trait>` from a value, optionally including supertraits.
///
/// Trait contracts are registered and resolved as boxed trait objects, so this is the usual way
/// to turn an implementation into its service type inside an instantiator.
///
/// # Examples
/// ```rust
/// use wirebox::boxed;
///
/// trait Strategy {}
///
/// struct StrategyA;
///
/// impl Strategy for StrategyA {}
///
/// let strategy: Box<dyn Strategy + Send + Sync> = boxed!(StrategyA; Strategy + Send + Sync);
/// ```
#[macro_export]
macro_rules! boxed {
    ($val:expr ; $trait:tt $($super_traits:tt)*) => {{
        Box::new($val) as Box<dyn $r#trait $($super_traits)*>
    }};
}
