use alloc::boxed::Box;
use core::{future::Future, pin::Pin};

/// Owned, sendable future, as returned by async trait methods in this crate.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
