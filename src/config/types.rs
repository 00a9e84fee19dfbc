//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EnvTypesError, EnvTypesResult};
use crate::plugin::GenerationStrategy;

use super::loader::{self, ConfigWarning};

/// Env source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Candidate env files, searched in order; the first existing one wins
    #[serde(default = "default_env_paths")]
    pub paths: Vec<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            paths: default_env_paths(),
        }
    }
}

fn default_env_paths() -> Vec<PathBuf> {
    vec![PathBuf::from(".env"), PathBuf::from(".env.example")]
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Declaration file destination (required)
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default = "default_true")]
    pub verbose: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            verbose: true,
        }
    }
}

/// Shape of the generated declarations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypesConfig {
    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default = "default_interface")]
    pub interface: String,

    /// Emit members as possibly absent (`KEY?: string`)
    #[serde(default = "default_true")]
    pub partial: bool,

    /// Pin each member's type to its literal value
    #[serde(default)]
    pub literal_values: bool,

    /// Append `export {};` so the file is treated as a module
    #[serde(default = "default_true")]
    pub export_marker: bool,
}

impl Default for TypesConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            interface: default_interface(),
            partial: true,
            literal_values: false,
            export_marker: true,
        }
    }
}

fn default_namespace() -> String {
    "NodeJS".to_string()
}

fn default_interface() -> String {
    "ProcessEnv".to_string()
}

fn default_true() -> bool {
    true
}

/// Out-of-process generator configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GeneratorConfig {
    /// Executable to run instead of generating in-process
    #[serde(default)]
    pub program: Option<PathBuf>,

    #[serde(default)]
    pub args: Vec<String>,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub types: TypesConfig,

    #[serde(default)]
    pub generator: GeneratorConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> EnvTypesResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> EnvTypesResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load `envtypes.toml` from the project root if present, then apply
    /// environment overrides.
    pub fn load_or_default(project_root: &Path) -> EnvTypesResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(project_root)
    }

    /// Apply environment variable overrides (ENVTYPES_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Resolve into immutable plugin options.
    ///
    /// Relative paths are kept as written (they name the source in the
    /// generated header and drive changed-file matching) and are joined
    /// onto `cwd` for I/O.
    pub fn resolve(self, cwd: &Path) -> EnvTypesResult<PluginOptions> {
        let output = self
            .output
            .path
            .ok_or_else(|| EnvTypesError::config("output path is required"))?;

        if output.as_os_str().is_empty() {
            return Err(EnvTypesError::config("output path is empty"));
        }

        if self.source.paths.is_empty() {
            return Err(EnvTypesError::config(
                "at least one env file path is required",
            ));
        }

        let strategy = match self.generator.program {
            Some(program) => GenerationStrategy::Subprocess {
                program,
                args: self.generator.args,
            },
            None => GenerationStrategy::InProcess,
        };

        Ok(PluginOptions {
            cwd: cwd.to_path_buf(),
            env_paths: self.source.paths,
            output,
            verbose: self.output.verbose,
            partial: self.types.partial,
            literal_values: self.types.literal_values,
            namespace: self.types.namespace,
            interface: self.types.interface,
            export_marker: self.types.export_marker,
            strategy,
        })
    }
}

/// Options resolved once at construction; never mutated afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginOptions {
    cwd: PathBuf,
    env_paths: Vec<PathBuf>,
    output: PathBuf,
    verbose: bool,
    partial: bool,
    literal_values: bool,
    namespace: String,
    interface: String,
    export_marker: bool,
    strategy: GenerationStrategy,
}

impl PluginOptions {
    /// Working directory relative paths are resolved against
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Candidate env paths as configured
    pub fn env_paths(&self) -> &[PathBuf] {
        &self.env_paths
    }

    /// Output path as configured
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Absolute output path
    pub fn output_path(&self) -> PathBuf {
        self.resolve_path(&self.output)
    }

    /// Join a configured path onto the working directory
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        self.cwd.join(path)
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn partial(&self) -> bool {
        self.partial
    }

    pub fn literal_values(&self) -> bool {
        self.literal_values
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    pub fn export_marker(&self) -> bool {
        self.export_marker
    }

    pub fn strategy(&self) -> &GenerationStrategy {
        &self.strategy
    }
}
