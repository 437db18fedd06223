use alloc::{
    boxed::Box,
    string::{String, ToString as _},
    sync::Arc,
    vec::Vec,
};
use parking_lot::Mutex;
use tracing::info;

pub trait Logger {
    fn info(&self, message: &str);
}

/// Service type under which a logger is registered.
pub type BoxLogger = Box<dyn Logger + Send + Sync>;

/// Writes `INFO: <message>` through [`tracing`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn info(&self, message: &str) {
        info!("INFO: {message}");
    }
}

/// Records messages in memory. Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct MemoryLogger {
    messages: Arc<Mutex<Vec<String>>>,
}

impl MemoryLogger {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    /// How many times exactly `message` was logged.
    #[must_use]
    pub fn count(&self, message: &str) -> usize {
        self.messages.lock().iter().filter(|logged| *logged == message).count()
    }
}

impl Logger for MemoryLogger {
    fn info(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::{ConsoleLogger, Logger as _, MemoryLogger};

    use alloc::{
        format,
        string::{String, ToString as _},
    };
    use tracing_test::traced_test;

    #[test]
    #[traced_test]
    fn test_console_logger() {
        ConsoleLogger.info("Component is working.");
        assert!(logs_contain("INFO: Component is working."));
    }

    #[test]
    fn test_memory_logger_shared_between_clones() {
        let logger = MemoryLogger::new();
        logger.clone().info("first");
        logger.info("second");
        logger.info("first");

        assert_eq!(logger.messages(), ["first", "second", "first"]);
        assert_eq!(logger.count("first"), 2);
        assert_eq!(logger.count("third"), 0);
    }
}
