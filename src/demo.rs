//! Sample object graph wired by the container: a logger, components receiving it by property
//! injection, named strategies and two applications that look strategies up by name.

pub mod application;
pub mod component;
pub mod logger;
pub mod strategy;
pub mod wiring;

pub use application::{Application, BoxApplication, EnumeratingApp, IndexedApp};
pub use component::{Component, ComponentA, ComponentB};
pub use logger::{BoxLogger, ConsoleLogger, Logger, MemoryLogger};
pub use strategy::{BoxStrategy, Strategy, StrategyA, StrategyB};
