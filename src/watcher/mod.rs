//! Standalone watch host
//!
//! Drives the build hooks without an external build tool:
//! - Full build on start, then incremental builds on tracked changes
//! - Watch exclusions honoured, so generated output never retriggers
//! - Debouncing (100ms) and content-hash filtering
//! - Graceful Ctrl+C shutdown

mod event;
mod host;
mod session;

pub use event::DEBOUNCE_MS;
pub use host::BuildHost;
pub use session::watch;
