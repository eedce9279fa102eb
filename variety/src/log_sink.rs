//! Process-wide sink every fuzzer announces its seed to.
//!
//! A sink has to be registered once before the first [`Fuzzer`](crate::Fuzzer)
//! is built; construction fails with
//! [`FuzzError::LogSinkNotConfigured`] otherwise.

use std::sync::{Arc, RwLock};

use crate::error::FuzzError;

/// Destination for fuzzer announcements
pub trait LogSink: Send + Sync {
    /// Write one message
    fn log(&self, message: &str);
}

impl<F> LogSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn log(&self, message: &str) {
        self(message)
    }
}

/// Sink forwarding announcements as `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, message: &str) {
        tracing::info!(target: "variety", "{}", message);
    }
}

/// Holder of the currently registered sink
pub struct LogSinkRegistry {
    sink: RwLock<Option<Arc<dyn LogSink>>>,
}

impl LogSinkRegistry {
    /// Create a registry with nothing registered
    pub const fn new() -> Self {
        Self {
            sink: RwLock::new(None),
        }
    }

    /// Install `sink`, replacing any previous one
    pub fn register(&self, sink: impl LogSink + 'static) {
        let mut slot = self.sink.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(Arc::new(sink));
    }

    /// Whether a sink is installed
    pub fn is_configured(&self) -> bool {
        self.current().is_some()
    }

    /// Send `message` to the sink, failing when none is installed
    pub fn log(&self, message: &str) -> Result<(), FuzzError> {
        let sink = self.current().ok_or(FuzzError::LogSinkNotConfigured)?;
        sink.log(message);
        Ok(())
    }

    fn current(&self) -> Option<Arc<dyn LogSink>> {
        self.sink
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Default for LogSinkRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_LOG_SINK: LogSinkRegistry = LogSinkRegistry::new();

/// The registry consulted by fuzzer construction
pub fn global_log_sink() -> &'static LogSinkRegistry {
    &GLOBAL_LOG_SINK
}

/// Register the process-wide sink. Last registration wins.
pub fn register_log_sink(sink: impl LogSink + 'static) {
    GLOBAL_LOG_SINK.register(sink);
}

/// Announcement written when a fuzzer is created
pub(crate) fn announcement(seed: i32, name: &str) -> String {
    format!(
        "----------------------------------------------------------------------\n\
         --> Fuzzer \"{name}\" uses seed {seed}\n\
         --> replay this test with `Fuzzer::with_seed({seed})`\n\
         ----------------------------------------------------------------------"
    )
}
