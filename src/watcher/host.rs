//! Minimal build host driving [`BuildHooks`]

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::events::{EventSink, GenerateEvent};
use crate::plugin::{normalize, BuildHooks, Compilation, CompilerContext};

/// Runs the hook lifecycle the way a watching build tool would.
///
/// There is no compile step of its own; a "build" is the hook sequence plus
/// the dependency set it leaves behind.
pub struct BuildHost<H: BuildHooks> {
    hooks: H,
    compiler: CompilerContext,
    compilation: Compilation,
    sink: Arc<dyn EventSink>,
}

impl<H: BuildHooks> BuildHost<H> {
    pub fn new(hooks: H, compiler: CompilerContext, sink: Arc<dyn EventSink>) -> Self {
        Self {
            hooks,
            compiler,
            compilation: Compilation::new(),
            sink,
        }
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn compiler(&self) -> &CompilerContext {
        &self.compiler
    }

    /// Dependencies tracked by the last build
    pub fn compilation(&self) -> &Compilation {
        &self.compilation
    }

    /// One-time registration
    pub fn setup(&mut self) {
        self.hooks.apply(&mut self.compiler);
    }

    /// Full build: before_compile, process_assets, after_compile
    pub fn build(&mut self) {
        self.hooks.before_compile(&self.compiler);

        let mut compilation = Compilation::new();
        self.hooks.process_assets(&mut compilation);
        self.hooks.after_compile(&mut compilation);
        self.compilation = compilation;
    }

    /// Incremental build after `changed` files were modified.
    ///
    /// A failing `watch_run` fails this iteration only; the build still runs
    /// so the watcher keeps tracking dependencies.
    pub fn rebuild(&mut self, changed: &[PathBuf]) {
        if let Err(e) = self.hooks.watch_run(changed) {
            self.sink.on_event(GenerateEvent::Failed {
                message: e.to_string(),
            });
        }
        self.build();
    }

    /// Whether a change to `path` should start a rebuild.
    ///
    /// Missing dependencies count too, so creating a file that was absent at
    /// the last build is picked up.
    pub fn is_trigger(&self, path: &Path) -> bool {
        if self.compiler.is_excluded(path) {
            return false;
        }
        let canonical = normalize(path);
        self.compilation
            .watched_paths()
            .any(|dep| dep == path || normalize(dep) == canonical)
    }

    /// Directories to watch so every tracked dependency is observed,
    /// including the parents of files that do not exist yet
    pub fn watch_roots(&self) -> BTreeSet<PathBuf> {
        self.compilation
            .watched_paths()
            .filter_map(|dep| dep.parent())
            .map(|parent| {
                if parent.as_os_str().is_empty() {
                    self.compiler.cwd().to_path_buf()
                } else {
                    parent.to_path_buf()
                }
            })
            .collect()
    }
}
