//! Browser console sink for the tracing subscriber.

use crate::core::telemetry::LogSink;
use tracing::Level;

/// Writes rendered log lines to the developer console.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn emit(&self, level: Level, line: &str) {
        if level == Level::ERROR {
            gloo::console::error!(line);
        } else if level == Level::WARN {
            gloo::console::warn!(line);
        } else if level == Level::INFO {
            gloo::console::info!(line);
        } else {
            gloo::console::debug!(line);
        }
    }
}
