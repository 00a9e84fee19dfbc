use std::io::{self, Write};
use std::sync::Mutex;

use envtypes::{EventSink, GenerateEvent};

/// Write a single NDJSON event (one JSON object per line).
pub fn write_event(out: &mut impl Write, event: &GenerateEvent) -> io::Result<()> {
    out.write_all(event.to_json().as_bytes())?;
    out.write_all(b"\n")?;
    out.flush()
}

/// Streams every event to stdout as NDJSON, failures included.
#[derive(Debug, Default)]
pub struct JsonSink {
    // Serialises lines from hooks running on other threads
    lock: Mutex<()>,
}

impl JsonSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for JsonSink {
    fn on_event(&self, event: GenerateEvent) {
        let _guard = self.lock.lock();
        let mut out = io::stdout().lock();
        let _ = write_event(&mut out, &event);
    }
}
