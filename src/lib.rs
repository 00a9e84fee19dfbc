//! envtypes - TypeScript declarations for environment variables
//!
//! envtypes reads a `.env`-style file, turns each `KEY=value` line (plus its
//! comments) into a member of a global TypeScript interface, and keeps the
//! generated declaration file in sync while a build tool watches the project.

pub mod config;
pub mod error;
pub mod events;
pub mod generator;
pub mod parser;
pub mod plugin;
pub mod render;
pub mod watcher;
pub mod writer;

// Re-exports for convenience
pub use config::{Config, ConfigWarning, PluginOptions};
pub use error::{EnvTypesError, EnvTypesResult};
pub use events::{CollectingSink, EventSink, GenerateEvent, NoopSink};
pub use generator::{select_source, GenerateOutcome, Generator, Plan};
pub use parser::{parse_env, EnvEntry};
pub use plugin::{
    BuildHooks, Compilation, CompilerContext, EnvTypesPlugin, GenerationStrategy, WatchIgnore,
    WatchOptions,
};
pub use render::render;
pub use watcher::{watch, BuildHost};
