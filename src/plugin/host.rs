//! Host build-tool surface
//!
//! The pieces of a host build tool that the plugin reads and writes: the
//! compiler context (working directory and watch exclusions) and the
//! per-build compilation (tracked file dependencies). Hosts call the
//! [`BuildHooks`] methods at fixed lifecycle points.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::EnvTypesResult;

/// Watch exclusion setting; hosts accept a single entry or a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WatchIgnore {
    One(String),
    Many(Vec<String>),
}

impl WatchIgnore {
    /// Add `entry` to an existing setting, keeping whatever was there.
    pub fn append(existing: Option<WatchIgnore>, entry: String) -> WatchIgnore {
        match existing {
            None => WatchIgnore::Many(vec![entry]),
            Some(WatchIgnore::One(one)) if one == entry => WatchIgnore::One(one),
            Some(WatchIgnore::One(one)) => WatchIgnore::Many(vec![one, entry]),
            Some(WatchIgnore::Many(mut many)) => {
                if !many.contains(&entry) {
                    many.push(entry);
                }
                WatchIgnore::Many(many)
            }
        }
    }

    pub fn entries(&self) -> Vec<&str> {
        match self {
            WatchIgnore::One(one) => vec![one.as_str()],
            WatchIgnore::Many(many) => many.iter().map(String::as_str).collect(),
        }
    }

    /// Whether `path` is covered by any entry.
    ///
    /// Entries are absolute paths (matching the path itself or anything
    /// beneath it) or `**/name` patterns matching any path component.
    pub fn matches(&self, path: &Path) -> bool {
        self.entries().into_iter().any(|entry| entry_matches(entry, path))
    }
}

fn entry_matches(entry: &str, path: &Path) -> bool {
    if let Some(name) = entry.strip_prefix("**/") {
        let name = name.trim_end_matches('/');
        return path
            .components()
            .any(|c| matches!(c, Component::Normal(n) if n == name));
    }

    let entry = Path::new(entry);
    path.starts_with(entry) || normalize(path).starts_with(normalize(entry))
}

/// Canonical form when the path exists, the path itself otherwise
pub fn normalize(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Host watch configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchOptions {
    #[serde(default)]
    pub ignored: Option<WatchIgnore>,
}

/// Compiler-wide context handed to hooks
#[derive(Debug, Clone)]
pub struct CompilerContext {
    cwd: PathBuf,
    watch_options: WatchOptions,
}

impl CompilerContext {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            watch_options: WatchOptions::default(),
        }
    }

    pub fn with_watch_options(mut self, watch_options: WatchOptions) -> Self {
        self.watch_options = watch_options;
        self
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn watch_options(&self) -> &WatchOptions {
        &self.watch_options
    }

    pub fn watch_options_mut(&mut self) -> &mut WatchOptions {
        &mut self.watch_options
    }

    /// Whether the host must not treat `path` as a rebuild trigger
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.watch_options
            .ignored
            .as_ref()
            .is_some_and(|ignored| ignored.matches(path))
    }
}

/// One build's tracked dependencies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compilation {
    file_dependencies: BTreeSet<PathBuf>,
    /// Files that do not exist yet but trigger a rebuild once created
    missing_dependencies: BTreeSet<PathBuf>,
}

impl Compilation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_dependency(&mut self, path: impl Into<PathBuf>) {
        self.file_dependencies.insert(path.into());
    }

    pub fn add_missing_dependency(&mut self, path: impl Into<PathBuf>) {
        self.missing_dependencies.insert(path.into());
    }

    /// Stop tracking `path` in either set; returns true if it was tracked
    pub fn remove_dependency(&mut self, path: &Path) -> bool {
        let existing = self.file_dependencies.remove(path);
        let missing = self.missing_dependencies.remove(path);
        existing || missing
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.file_dependencies.contains(path)
    }

    pub fn dependencies(&self) -> impl Iterator<Item = &Path> {
        self.file_dependencies.iter().map(PathBuf::as_path)
    }

    pub fn missing_dependencies(&self) -> impl Iterator<Item = &Path> {
        self.missing_dependencies.iter().map(PathBuf::as_path)
    }

    /// Existing and missing dependencies together
    pub fn watched_paths(&self) -> impl Iterator<Item = &Path> {
        self.dependencies().chain(self.missing_dependencies())
    }

    pub fn len(&self) -> usize {
        self.file_dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file_dependencies.is_empty()
    }
}

/// Lifecycle hooks a host invokes, in this order per build:
/// `watch_run` (incremental builds only), `before_compile`,
/// `process_assets`, `after_compile`. `apply` runs once at setup.
pub trait BuildHooks {
    /// Setup: adjust compiler-wide configuration
    fn apply(&self, compiler: &mut CompilerContext);

    /// Runs before every build; returns once the build may proceed
    fn before_compile(&self, compiler: &CompilerContext);

    /// Runs at the start of each watch iteration with the changed files
    fn watch_run(&self, changed_files: &[PathBuf]) -> EnvTypesResult<()>;

    /// Asset processing stage of a build
    fn process_assets(&self, compilation: &mut Compilation);

    /// Runs after a build has compiled
    fn after_compile(&self, compilation: &mut Compilation);
}
