use alloc::{format, sync::Arc};
use tracing::info;

use super::logger::BoxLogger;

/// A component with an optional logger, set by property injection after construction.
pub trait Component {
    fn name(&self) -> &'static str;

    fn logger(&self) -> Option<&Arc<BoxLogger>>;

    /// Reports `<name> is working.` through the injected logger, or as a tracing event without one.
    fn do_something(&self) {
        match self.logger() {
            Some(logger) => logger.info(&format!("{} is working.", self.name())),
            None => info!("{} is working.", self.name()),
        }
    }
}

macro_rules! impl_component {
    ($($component:ident),*) => {
        $(
            #[derive(Default)]
            pub struct $component {
                pub logger: Option<Arc<BoxLogger>>,
            }

            impl $component {
                /// Property setter used by the registration.
                #[inline]
                pub fn set_logger(&mut self, logger: Arc<BoxLogger>) {
                    self.logger = Some(logger);
                }
            }

            impl Component for $component {
                #[inline]
                fn name(&self) -> &'static str {
                    stringify!($component)
                }

                #[inline]
                fn logger(&self) -> Option<&Arc<BoxLogger>> {
                    self.logger.as_ref()
                }
            }
        )*
    };
}

impl_component!(ComponentA, ComponentB);

#[cfg(test)]
mod tests {
    extern crate std;

    use super::{Component as _, ComponentA, ComponentB};
    use crate::demo::logger::{BoxLogger, MemoryLogger};

    use alloc::{
        boxed::Box,
        format,
        string::{String, ToString as _},
        sync::Arc,
    };
    use tracing_test::traced_test;

    #[test]
    #[traced_test]
    fn test_do_something_without_logger() {
        ComponentB::default().do_something();

        assert!(logs_contain("ComponentB is working."));
    }

    #[test]
    #[traced_test]
    fn test_do_something_reports_through_logger() {
        let memory = MemoryLogger::new();
        let logger = Arc::new(Box::new(memory.clone()) as BoxLogger);

        let mut a = ComponentA::default();
        let mut b = ComponentB::default();
        a.set_logger(logger.clone());
        b.set_logger(logger);
        a.do_something();
        b.do_something();

        assert_eq!(memory.messages(), ["ComponentA is working.", "ComponentB is working."]);
        assert!(!logs_contain("is working."));
    }
}
