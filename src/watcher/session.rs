//! Watch loop

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::{EnvTypesError, EnvTypesResult};
use crate::events::{emit, EventSink, GenerateEvent};
use crate::plugin::{normalize, BuildHooks};
use crate::writer::hash_content;

use super::event::WatcherState;
use super::host::BuildHost;

/// Set up the host, run a full build, then rebuild on tracked changes until
/// `running` is cleared.
pub fn watch<H: BuildHooks>(
    host: &mut BuildHost<H>,
    running: Arc<AtomicBool>,
    sink: &dyn EventSink,
    verbose: bool,
) -> EnvTypesResult<()> {
    host.setup();
    host.build();

    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                for path in event.paths {
                    let _ = tx.send(path);
                }
            }
        },
        Config::default(),
    )
    .map_err(watch_error)?;

    let mut roots = BTreeSet::new();
    register_roots(&mut watcher, &mut roots, host.watch_roots())?;

    emit(
        sink,
        verbose,
        GenerateEvent::WatchStarted {
            paths: host.compilation().dependencies().map(Path::to_path_buf).collect(),
        },
    );

    // Content hashes filter out editor saves that change nothing
    let mut content_hashes: HashMap<PathBuf, Option<String>> = host
        .compilation()
        .watched_paths()
        .map(|dep| (normalize(dep), read_hash(dep)))
        .collect();

    // notify may replay events for existing files right after registration
    let cooldown_end = Instant::now() + Duration::from_millis(500);
    while Instant::now() < cooldown_end && running.load(Ordering::SeqCst) {
        let _ = rx.recv_timeout(Duration::from_millis(50));
    }

    let mut state = WatcherState::new();

    while running.load(Ordering::SeqCst) {
        if let Ok(path) = rx.recv_timeout(Duration::from_millis(50)) {
            if host.is_trigger(&path) {
                let new_hash = read_hash(&path);
                let key = normalize(&path);
                if content_hashes.get(&key) != Some(&new_hash) {
                    content_hashes.insert(key, new_hash);
                    state.add_change(path);
                }
            }
        }

        if state.should_rebuild() {
            let changes = state.take_changes();
            emit(
                sink,
                verbose,
                GenerateEvent::FilesChanged {
                    paths: changes.clone(),
                },
            );
            host.rebuild(&changes);

            for dep in host.compilation().watched_paths() {
                content_hashes
                    .entry(normalize(dep))
                    .or_insert_with(|| read_hash(dep));
            }
            register_roots(&mut watcher, &mut roots, host.watch_roots())?;
        }
    }

    emit(sink, verbose, GenerateEvent::Shutdown);
    Ok(())
}

/// Start watching any root not watched yet.
///
/// Roots that are not directories yet are skipped and retried after the next
/// rebuild.
fn register_roots(
    watcher: &mut RecommendedWatcher,
    roots: &mut BTreeSet<PathBuf>,
    wanted: BTreeSet<PathBuf>,
) -> EnvTypesResult<()> {
    for root in wanted {
        if roots.contains(&root) || !root.is_dir() {
            continue;
        }
        watcher
            .watch(&root, RecursiveMode::NonRecursive)
            .map_err(watch_error)?;
        roots.insert(root);
    }
    Ok(())
}

fn read_hash(path: &Path) -> Option<String> {
    std::fs::read(path).ok().map(|bytes| hash_content(&bytes))
}

fn watch_error(e: notify::Error) -> EnvTypesError {
    EnvTypesError::Watch {
        message: e.to_string(),
    }
}
