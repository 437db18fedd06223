use alloc::{boxed::Box, format, sync::Arc};

use super::logger::BoxLogger;

/// A named, runnable strategy. Several implementations are registered under their names.
pub trait Strategy {
    fn name(&self) -> &'static str;

    fn run(&self);
}

/// Service type under which strategies are registered.
pub type BoxStrategy = Box<dyn Strategy + Send + Sync>;

pub struct StrategyA {
    logger: Arc<BoxLogger>,
}

impl StrategyA {
    pub const NAME: &'static str = "StrategyA";

    #[must_use]
    pub fn new(logger: Arc<BoxLogger>) -> Self {
        logger.info("The strategy A has been constructed.");
        Self { logger }
    }
}

impl Strategy for StrategyA {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn run(&self) {
        self.logger.info(&format!("{} is running.", self.name()));
    }
}

/// Infrequently used and expensive to construct, so it should only be built when asked for.
pub struct StrategyB {
    logger: Arc<BoxLogger>,
}

impl StrategyB {
    pub const NAME: &'static str = "StrategyB";

    #[must_use]
    pub fn new(logger: Arc<BoxLogger>) -> Self {
        logger.info("The strategy B is infrequently used and expensive to construct");
        logger.info("The strategy B has been constructed.");
        Self { logger }
    }
}

impl Strategy for StrategyB {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn run(&self) {
        self.logger.info(&format!("{} is running.", self.name()));
    }
}

#[cfg(test)]
mod tests {
    use super::{Strategy as _, StrategyA, StrategyB};
    use crate::demo::logger::{BoxLogger, MemoryLogger};

    use alloc::{boxed::Box, sync::Arc};

    #[test]
    fn test_construct_and_run() {
        let memory = MemoryLogger::new();
        let logger = Arc::new(Box::new(memory.clone()) as BoxLogger);

        let a = StrategyA::new(logger.clone());
        a.run();
        let b = StrategyB::new(logger);
        b.run();

        assert_eq!(
            memory.messages(),
            [
                "The strategy A has been constructed.",
                "StrategyA is running.",
                "The strategy B is infrequently used and expensive to construct",
                "The strategy B has been constructed.",
                "StrategyB is running.",
            ]
        );
    }
}
