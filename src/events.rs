//! Generation event port
//!
//! The library never prints. Progress and failures are reported as
//! [`GenerateEvent`]s to an [`EventSink`]; the CLI decides how to show them.

use std::path::PathBuf;
use std::sync::Mutex;

use serde::Serialize;

/// Event emitted while generating or watching
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GenerateEvent {
    /// Output directory was created
    DirectoryCreated { path: PathBuf },

    /// Rendered artifact matches the file on disk; nothing written
    UpToDate { output: PathBuf },

    /// Artifact was written
    Generated {
        entries: usize,
        source: PathBuf,
        output: PathBuf,
    },

    /// Generation failed (always reported, regardless of verbosity)
    Failed { message: String },

    /// A line the external generator wrote to stdout
    GeneratorOutput { line: String },

    /// Standalone watcher started
    WatchStarted { paths: Vec<PathBuf> },

    /// Tracked files changed since the last build
    FilesChanged { paths: Vec<PathBuf> },

    /// Standalone watcher stopped
    Shutdown,
}

impl GenerateEvent {
    /// Informational events are suppressed when verbosity is off
    pub fn is_informational(&self) -> bool {
        !matches!(self, GenerateEvent::Failed { .. })
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Trait for receiving generation events
///
/// Implementations:
/// - `ConsoleSink` (binary): human-readable lines
/// - `JsonSink` (binary): NDJSON event stream for CI
/// - `NoopSink`: silent operation
/// - `CollectingSink`: keeps events for inspection in tests
pub trait EventSink: Send + Sync {
    /// Handle an event
    fn on_event(&self, event: GenerateEvent);
}

/// Deliver `event` unless it is informational and `verbose` is off.
pub fn emit(sink: &dyn EventSink, verbose: bool, event: GenerateEvent) {
    if verbose || !event.is_informational() {
        sink.on_event(event);
    }
}

/// No-op event sink for silent operation
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn on_event(&self, _event: GenerateEvent) {}
}

/// Sink that records every event it receives
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<GenerateEvent>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far
    pub fn events(&self) -> Vec<GenerateEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl EventSink for CollectingSink {
    fn on_event(&self, event: GenerateEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl<T: EventSink + ?Sized> EventSink for std::sync::Arc<T> {
    fn on_event(&self, event: GenerateEvent) {
        (**self).on_event(event)
    }
}
