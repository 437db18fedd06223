#![no_std]

extern crate alloc;

#[macro_use]
pub(crate) mod macros;

pub(crate) mod any;
pub(crate) mod cache;
pub(crate) mod container;
pub(crate) mod dependency_resolver;
pub(crate) mod errors;
pub(crate) mod finalizer;
pub(crate) mod inject;
pub(crate) mod instantiator;
pub(crate) mod key;
pub(crate) mod lifetime;
pub(crate) mod lock;
pub(crate) mod property;
pub(crate) mod registration;
pub(crate) mod registry;
pub(crate) mod resolver;

pub mod demo;
pub mod features;
pub mod utils;

pub use any::TypeInfo;
pub use container::{Container, WeakContainer};
pub use dependency_resolver::DependencyResolver;
pub use errors::{InstantiateErrorKind, InstantiatorResult, RegisterErrorKind, ResolveErrorKind};
pub use finalizer::Finalizer;
pub use inject::{Index, Inject, InjectAll, InjectKeyed};
pub use instantiator::Instantiator;
pub use key::{ServiceKey, ServiceName};
pub use lifetime::Lifetime;
pub use property::PropertyInjector;
pub use registration::{Activated, Prebuilt, Registration};
pub use registry::RegistryBuilder;
pub use resolver::Resolver;
