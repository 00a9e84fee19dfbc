//! Configuration module for envtypes
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (ENVTYPES_*)
//! 3. Project config (envtypes.toml)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    join_paths, split_paths, ConfigWarning, CONFIG_FILE_NAME, ENV_PATHS_VAR, EXPORT_MARKER_VAR,
    INTERFACE_VAR, LITERAL_VALUES_VAR, NAMESPACE_VAR, OUTPUT_VAR, PARTIAL_VAR, VERBOSE_VAR,
};
pub use types::{
    Config, GeneratorConfig, OutputConfig, PluginOptions, SourceConfig, TypesConfig,
};
