//! Console presentation for the binary

pub mod json;
pub mod output;

use std::sync::Arc;

use envtypes::EventSink;

pub use json::JsonSink;
pub use output::{print_config_warnings, ConsoleSink};

/// Pick the sink for the requested output format
pub fn event_sink(json: bool, timestamps: bool) -> Arc<dyn EventSink> {
    if json {
        Arc::new(JsonSink::new())
    } else if timestamps {
        Arc::new(ConsoleSink::new().with_timestamps())
    } else {
        Arc::new(ConsoleSink::new())
    }
}
