use std::fmt;
use std::sync::Arc;

use crate::logger::{Logger, TracingLogger};

/// Construction options for a [`Driver`](crate::Driver).
#[derive(Clone, Default)]
pub struct Options {
    /// Diagnostic sink. `None` selects a [`TracingLogger`] at `Info`.
    pub logger: Option<Arc<dyn Logger>>,
}

impl Options {
    /// Options with the given logger installed.
    pub fn with_logger(logger: Arc<dyn Logger>) -> Self {
        Self {
            logger: Some(logger),
        }
    }

    pub(crate) fn into_logger(self) -> Arc<dyn Logger> {
        self.logger
            .unwrap_or_else(|| Arc::new(TracingLogger::default()))
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("custom_logger", &self.logger.is_some())
            .finish()
    }
}
