use alloc::{boxed::Box, sync::Arc, vec::Vec};
use tracing::{debug, error};

use super::{
    component::{Component, ComponentA, ComponentB},
    strategy::BoxStrategy,
};
use crate::Index;

pub trait Application {
    /// Runs the strategy named `name`. Does nothing if there is none.
    fn run_strategy(&self, name: &str);

    /// Components the application was given.
    fn components(&self) -> Vec<&dyn Component>;
}

/// Service type under which an application is registered.
pub type BoxApplication = Box<dyn Application + Send + Sync>;

impl<A: Application + ?Sized> Application for Arc<A> {
    #[inline]
    fn run_strategy(&self, name: &str) {
        (**self).run_strategy(name);
    }

    #[inline]
    fn components(&self) -> Vec<&dyn Component> {
        (**self).components()
    }
}

/// Receives every strategy up front and scans them by name.
///
/// All strategies are constructed when the application is, whether they run or not.
pub struct EnumeratingApp {
    strategies: Vec<Arc<BoxStrategy>>,
    pub a: Arc<ComponentA>,
    pub b: Arc<ComponentB>,
}

impl EnumeratingApp {
    #[must_use]
    pub fn new(strategies: Vec<Arc<BoxStrategy>>, a: Arc<ComponentA>, b: Arc<ComponentB>) -> Self {
        Self { strategies, a, b }
    }
}

impl Application for EnumeratingApp {
    fn run_strategy(&self, name: &str) {
        match self.strategies.iter().find(|strategy| strategy.name() == name) {
            Some(strategy) => strategy.run(),
            None => debug!(name, "No strategy with the name"),
        }
    }

    fn components(&self) -> Vec<&dyn Component> {
        Vec::from([&*self.a as &dyn Component, &*self.b as &dyn Component])
    }
}

/// Looks strategies up by name through an [`Index`], constructing only the one that runs.
///
/// Components are set by property injection.
pub struct IndexedApp {
    strategies: Index<BoxStrategy>,
    pub a: Option<Arc<ComponentA>>,
    pub b: Option<Arc<ComponentB>>,
}

impl IndexedApp {
    #[must_use]
    pub fn new(strategies: Index<BoxStrategy>) -> Self {
        Self {
            strategies,
            a: None,
            b: None,
        }
    }
}

impl Application for IndexedApp {
    fn run_strategy(&self, name: &str) {
        match self.strategies.try_get(name) {
            Ok(Some(strategy)) => strategy.run(),
            Ok(None) => debug!(name, "No strategy with the name"),
            Err(err) => error!(name, "Strategy can't be resolved: {}", err),
        }
    }

    fn components(&self) -> Vec<&dyn Component> {
        let a = self.a.as_deref().map(|a| a as &dyn Component);
        let b = self.b.as_deref().map(|b| b as &dyn Component);
        a.into_iter().chain(b).collect()
    }
}
