//! Build-tool integration
//!
//! [`EnvTypesPlugin`] regenerates the declaration file at the right points of
//! a host's build lifecycle and keeps that file from triggering the rebuild
//! it was produced by:
//! - `apply` adds the output to the host's watch exclusions
//! - `process_assets` / `after_compile` track the env files as dependencies
//!   and drop the output from the tracked set

mod host;
mod strategy;

use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use host::{normalize, BuildHooks, Compilation, CompilerContext, WatchIgnore, WatchOptions};
pub use strategy::GenerationStrategy;

use crate::config::{Config, PluginOptions};
use crate::error::EnvTypesResult;
use crate::events::{EventSink, GenerateEvent};
use crate::generator::Generator;
use crate::writer::ensure_dir;

/// Prefix for generation failures reported from `before_compile`
pub const FAILURE_PREFIX: &str = "failed to generate env types:";

/// Plugin instance, one per host configuration
pub struct EnvTypesPlugin {
    generator: Generator,
    sink: Arc<dyn EventSink>,
}

impl std::fmt::Debug for EnvTypesPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvTypesPlugin")
            .field("options", self.generator.options())
            .finish_non_exhaustive()
    }
}

impl EnvTypesPlugin {
    /// Create the plugin and pre-create the output directory.
    ///
    /// Errors here are never downgraded: a misconfigured plugin must not
    /// reach the build lifecycle.
    pub fn new(options: PluginOptions, sink: Arc<dyn EventSink>) -> EnvTypesResult<Self> {
        if let Some(parent) = options.output_path().parent() {
            if ensure_dir(parent)? && options.verbose() {
                sink.on_event(GenerateEvent::DirectoryCreated {
                    path: parent.to_path_buf(),
                });
            }
        }

        Ok(Self {
            generator: Generator::new(options),
            sink,
        })
    }

    /// Resolve `config` against `cwd` and create the plugin
    pub fn from_config(
        config: Config,
        cwd: &Path,
        sink: Arc<dyn EventSink>,
    ) -> EnvTypesResult<Self> {
        Self::new(config.resolve(cwd)?, sink)
    }

    pub fn options(&self) -> &PluginOptions {
        self.generator.options()
    }

    /// Run one generation pass with the configured strategy
    pub fn generate(&self) -> EnvTypesResult<()> {
        self.options()
            .strategy()
            .run(&self.generator, self.sink.as_ref())
    }

    /// Whether a changed file is one of the candidate env files.
    ///
    /// A suffix match on the configured (usually project-relative) paths,
    /// not a canonical path comparison. Leading `./` is ignored.
    pub fn is_env_source(&self, changed: &Path) -> bool {
        self.options()
            .env_paths()
            .iter()
            .map(|candidate| strip_cur_dir(candidate))
            .any(|candidate| !candidate.as_os_str().is_empty() && changed.ends_with(candidate))
    }

    /// Every candidate becomes a dependency: existing ones as files, the rest
    /// as missing files, so creating any of them re-runs source selection.
    fn track_sources(&self, compilation: &mut Compilation) {
        for candidate in self.options().env_paths() {
            let source = self.options().resolve_path(candidate);
            if source.is_file() {
                compilation.add_dependency(source);
            } else {
                compilation.add_missing_dependency(source);
            }
        }

        let output = self.options().output_path();
        compilation.remove_dependency(&output);
        let canonical = normalize(&output);
        if canonical != output {
            compilation.remove_dependency(&canonical);
        }
    }
}

/// `./.env` and `.env` name the same candidate
fn strip_cur_dir(path: &Path) -> &Path {
    path.strip_prefix(".").unwrap_or(path)
}

impl BuildHooks for EnvTypesPlugin {
    fn apply(&self, compiler: &mut CompilerContext) {
        let output = compiler.cwd().join(self.options().output());
        let output = output.display().to_string();
        let watch_options = compiler.watch_options_mut();
        watch_options.ignored = Some(WatchIgnore::append(watch_options.ignored.take(), output));
    }

    fn before_compile(&self, _compiler: &CompilerContext) {
        // Stale types must not block the build
        if let Err(e) = self.generate() {
            self.sink.on_event(GenerateEvent::Failed {
                message: format!("{FAILURE_PREFIX} {e}"),
            });
        }
    }

    fn watch_run(&self, changed_files: &[PathBuf]) -> EnvTypesResult<()> {
        if changed_files.iter().any(|path| self.is_env_source(path)) {
            self.generate()?;
        }
        Ok(())
    }

    fn process_assets(&self, compilation: &mut Compilation) {
        self.track_sources(compilation);
    }

    fn after_compile(&self, compilation: &mut Compilation) {
        self.track_sources(compilation);
    }
}
