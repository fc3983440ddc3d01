//! Logging setup for the UI.
//!
//! # Design
//! - Core code logs through `tracing`; where the lines end up is decided by a [`LogSink`].
//! - `fmt::layer()` renders each event; [`SinkWriter`] forwards the line with its level.
//! - The browser console sink lives in the app shell; tests capture lines in memory.

use std::io;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{Level, Metadata, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Errors raised by logging setup.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber")]
    SubscriberInstall {
        /// Underlying subscriber error.
        #[source]
        source: TryInitError,
    },
}

/// Destination for rendered log lines.
pub trait LogSink: Send + Sync + 'static {
    /// Emit one rendered line.
    fn emit(&self, level: Level, line: &str);
}

/// Sink that keeps lines in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<(Level, String)>>>,
}

impl MemorySink {
    /// Empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured lines in emission order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.iter().map(|(_, line)| line.clone()).collect())
            .unwrap_or_default()
    }

    /// Captured lines at exactly `level`.
    #[must_use]
    pub fn lines_at(&self, level: Level) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| {
                lines
                    .iter()
                    .filter(|(captured, _)| *captured == level)
                    .map(|(_, line)| line.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl LogSink for MemorySink {
    fn emit(&self, level: Level, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, line.to_string()));
        }
    }
}

/// [`MakeWriter`] that hands each formatted event to a [`LogSink`].
#[derive(Clone, Debug)]
pub struct SinkWriter<S> {
    sink: S,
}

impl<S: LogSink> SinkWriter<S> {
    /// Writer factory emitting into `sink`.
    #[must_use]
    pub const fn new(sink: S) -> Self {
        Self { sink }
    }
}

/// Buffers one formatted event and emits it when dropped.
pub struct EventWriter<'a, S: LogSink> {
    sink: &'a S,
    level: Level,
    buf: Vec<u8>,
}

impl<S: LogSink> io::Write for EventWriter<'_, S> {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: LogSink> Drop for EventWriter<'_, S> {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buf);
        let line = line.trim();
        if !line.is_empty() {
            self.sink.emit(self.level, line);
        }
    }
}

impl<'a, S: LogSink> MakeWriter<'a> for SinkWriter<S> {
    type Writer = EventWriter<'a, S>;

    fn make_writer(&'a self) -> Self::Writer {
        EventWriter {
            sink: &self.sink,
            level: Level::INFO,
            buf: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        EventWriter {
            sink: &self.sink,
            level: *meta.level(),
            buf: Vec::new(),
        }
    }
}

/// Subscriber writing events at or above `level` to `sink`.
pub fn subscriber<S: LogSink>(sink: S, level: Level) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::registry().with(LevelFilter::from_level(level)).with(
        fmt::layer()
            .without_time()
            .with_ansi(false)
            .with_writer(SinkWriter::new(sink)),
    )
}

/// Install the global subscriber.
///
/// # Errors
/// Returns [`TelemetryError::SubscriberInstall`] when a global subscriber already exists.
pub fn init_logging<S: LogSink>(sink: S, level: Level) -> Result<(), TelemetryError> {
    subscriber(sink, level)
        .try_init()
        .map_err(|source| TelemetryError::SubscriberInstall { source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_render_level_target_message_and_fields() {
        let sink = MemorySink::new();
        tracing::subscriber::with_default(subscriber(sink.clone(), Level::DEBUG), || {
            tracing::warn!(target: "terracasa::i18n", locale = "de", "bundle fallback");
            tracing::trace!("hidden");
        });
        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert!(line.starts_with("WARN terracasa::i18n: bundle fallback"), "{line}");
        assert!(line.contains("locale=\"de\""), "{line}");
        assert!(!line.contains('\n'));
        assert_eq!(sink.lines_at(Level::WARN).len(), 1);
    }

    #[test]
    fn level_filter_drops_verbose_events() {
        let sink = MemorySink::new();
        tracing::subscriber::with_default(subscriber(sink.clone(), Level::INFO), || {
            tracing::debug!("request started");
            tracing::error!(status = 500_u16, "request failed");
        });
        let lines = sink.lines_at(Level::ERROR);
        assert_eq!(sink.lines().len(), 1);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("request failed status=500"), "{}", lines[0]);
    }
}
