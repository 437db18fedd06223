mod instantiate;
mod register;
mod resolve;

pub use instantiate::InstantiateErrorKind;
pub use register::RegisterErrorKind;
pub use resolve::ResolveErrorKind;

/// Result of an instantiator, factory or constructor function.
pub type InstantiatorResult<T, E = InstantiateErrorKind> = Result<T, E>;
