use tracing::Level;
use wirebox::demo::{
    wiring::{enumerating_container, indexed_container, run_strategy},
    BoxApplication, ConsoleLogger,
};

fn demo(container: &wirebox::Container, name: &str) {
    tracing::info!("Application with {name}");

    // The application is a singleton: both calls run on the same instance
    run_strategy(container, "StrategyA").unwrap();
    run_strategy(container, "StrategyA").unwrap();

    for component in container.resolve::<BoxApplication>().unwrap().components() {
        component.do_something();
        if let Some(logger) = component.logger() {
            logger.info(&format!("{} of the application with {name} is doing something.", component.name()));
        }
    }

    // Cached singletons are released, the next resolution creates them anew
    container.dispose();
}

fn main() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).with_target(false).init();

    // Every strategy is constructed when the application is, StrategyB included
    demo(&enumerating_container(Box::new(ConsoleLogger)).unwrap(), "the strategy list");

    // Only StrategyA is constructed, StrategyB is never asked for
    demo(&indexed_container(Box::new(ConsoleLogger)).unwrap(), "the strategy index");
}
