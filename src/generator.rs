//! Declaration file generator
//!
//! Picks the env source, parses it, renders the declaration file and writes
//! it only when the content (timestamp aside) actually changed. Skipping
//! identical writes keeps the output's mtime stable, so watchers downstream
//! are not woken up for nothing.

use std::path::{Path, PathBuf};

use crate::config::PluginOptions;
use crate::error::{EnvTypesError, EnvTypesResult};
use crate::events::{emit, EventSink, GenerateEvent};
use crate::parser::{parse_env, EnvEntry};
use crate::render::{render, strip_timestamp, timestamp_now};
use crate::writer::{atomic_write, ensure_dir, read_optional};

/// Result of a generation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// Existing file already matched; nothing written
    UpToDate { output: PathBuf },
    /// File was (re)written
    Written {
        entries: usize,
        source: PathBuf,
        output: PathBuf,
    },
}

impl GenerateOutcome {
    pub fn was_written(&self) -> bool {
        matches!(self, GenerateOutcome::Written { .. })
    }
}

/// A rendered artifact and how it compares to the file on disk
#[derive(Debug, Clone)]
pub struct Plan {
    /// Source path as configured
    pub source: PathBuf,
    pub entries: Vec<EnvEntry>,
    /// Full rendered artifact, timestamp included
    pub content: String,
    /// Absolute output path
    pub output: PathBuf,
    /// Output is missing or differs from `content`
    pub stale: bool,
}

/// Return the first candidate that exists under `cwd`, as configured.
pub fn select_source(candidates: &[PathBuf], cwd: &Path) -> EnvTypesResult<PathBuf> {
    candidates
        .iter()
        .find(|candidate| cwd.join(candidate).is_file())
        .cloned()
        .ok_or_else(|| EnvTypesError::NoSourceFound {
            candidates: candidates.to_vec(),
        })
}

/// Generator bound to one set of resolved options
#[derive(Debug, Clone)]
pub struct Generator {
    options: PluginOptions,
}

impl Generator {
    pub fn new(options: PluginOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PluginOptions {
        &self.options
    }

    /// Render the artifact and compare it with the existing output, without
    /// writing anything.
    pub fn plan(&self) -> EnvTypesResult<Plan> {
        let source = select_source(self.options.env_paths(), self.options.cwd())?;
        let source_path = self.options.resolve_path(&source);
        let text = std::fs::read_to_string(&source_path)
            .map_err(|e| EnvTypesError::io(&source_path, e))?;

        let entries = parse_env(&text);
        let content = render(&entries, &source, &timestamp_now(), &self.options);

        let output = self.options.output_path();
        let stale = match read_optional(&output)? {
            Some(existing) => strip_timestamp(&existing) != strip_timestamp(&content),
            None => true,
        };

        Ok(Plan {
            source,
            entries,
            content,
            output,
            stale,
        })
    }

    /// Generate the declaration file, writing it only if it changed.
    pub fn generate(&self, sink: &dyn EventSink) -> EnvTypesResult<GenerateOutcome> {
        let verbose = self.options.verbose();
        let plan = self.plan()?;

        if !plan.stale {
            emit(
                sink,
                verbose,
                GenerateEvent::UpToDate {
                    output: plan.output.clone(),
                },
            );
            return Ok(GenerateOutcome::UpToDate {
                output: plan.output,
            });
        }

        if let Some(parent) = plan.output.parent() {
            if ensure_dir(parent)? {
                emit(
                    sink,
                    verbose,
                    GenerateEvent::DirectoryCreated {
                        path: parent.to_path_buf(),
                    },
                );
            }
        }

        atomic_write(&plan.output, &plan.content)?;

        emit(
            sink,
            verbose,
            GenerateEvent::Generated {
                entries: plan.entries.len(),
                source: plan.source.clone(),
                output: plan.output.clone(),
            },
        );

        Ok(GenerateOutcome::Written {
            entries: plan.entries.len(),
            source: plan.source,
            output: plan.output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::events::{CollectingSink, NoopSink};
    use crate::render::{SOURCE_PREFIX, TIMESTAMP_PREFIX};
    use std::fs;
    use tempfile::tempdir;

    fn generator(cwd: &Path, configure: impl FnOnce(&mut Config)) -> Generator {
        let mut config = Config::default();
        config.output.path = Some(PathBuf::from("types/env.d.ts"));
        configure(&mut config);
        Generator::new(config.resolve(cwd).unwrap())
    }

    #[test]
    fn generate_writes_declarations() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".env"), "# Port\nPORT=3000\n").unwrap();
        let sink = CollectingSink::new();

        let outcome = generator(dir.path(), |_| {}).generate(&sink).unwrap();

        let output = dir.path().join("types/env.d.ts");
        assert_eq!(
            outcome,
            GenerateOutcome::Written {
                entries: 1,
                source: PathBuf::from(".env"),
                output: output.clone(),
            }
        );
        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("    PORT?: string;\n"));
        assert!(written.contains("     * Port\n"));

        let events = sink.events();
        assert!(matches!(events[0], GenerateEvent::DirectoryCreated { .. }));
        assert!(matches!(events[1], GenerateEvent::Generated { entries: 1, .. }));
    }

    #[test]
    fn generate_twice_is_idempotent() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".env"), "A=1\nB=2\n").unwrap();
        let generator = generator(dir.path(), |_| {});
        let output = dir.path().join("types/env.d.ts");

        assert!(generator.generate(&NoopSink).unwrap().was_written());
        let first = fs::read_to_string(&output).unwrap();
        let first_mtime = fs::metadata(&output).unwrap().modified().unwrap();

        // Make a rewrite observable through the timestamp line
        let stamped = first
            .lines()
            .map(|l| {
                if l.starts_with(TIMESTAMP_PREFIX) {
                    format!("{TIMESTAMP_PREFIX}2000-01-01T00:00:00")
                } else {
                    l.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        fs::write(&output, &stamped).unwrap();
        let stamped_mtime = fs::metadata(&output).unwrap().modified().unwrap();
        assert!(stamped_mtime >= first_mtime);

        let sink = CollectingSink::new();
        let outcome = generator.generate(&sink).unwrap();

        assert!(!outcome.was_written());
        assert_eq!(fs::read_to_string(&output).unwrap(), stamped);
        assert_eq!(
            fs::metadata(&output).unwrap().modified().unwrap(),
            stamped_mtime
        );
        assert!(matches!(sink.events()[0], GenerateEvent::UpToDate { .. }));
    }

    #[test]
    fn generate_rewrites_when_source_changes() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".env"), "A=1\n").unwrap();
        let generator = generator(dir.path(), |_| {});

        generator.generate(&NoopSink).unwrap();
        fs::write(dir.path().join(".env"), "A=1\nB=2\n").unwrap();
        let outcome = generator.generate(&NoopSink).unwrap();

        assert!(outcome.was_written());
        let written = fs::read_to_string(dir.path().join("types/env.d.ts")).unwrap();
        assert!(written.contains("B?: string;"));
    }

    #[test]
    fn first_existing_candidate_wins() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.env"), "ONLY_B=1\n").unwrap();

        let generator = generator(dir.path(), |c| {
            c.source.paths = vec![PathBuf::from("a.env"), PathBuf::from("b.env")];
        });
        generator.generate(&NoopSink).unwrap();

        let written = fs::read_to_string(dir.path().join("types/env.d.ts")).unwrap();
        assert!(written.contains(&format!("{SOURCE_PREFIX}b.env\n")));
        assert!(written.contains("ONLY_B?: string;"));
        assert!(!written.contains("a.env"));
    }

    #[test]
    fn earlier_candidate_shadows_later_one() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.env"), "FROM_A=1\n").unwrap();
        fs::write(dir.path().join("b.env"), "FROM_B=1\n").unwrap();

        let source = select_source(
            &[PathBuf::from("a.env"), PathBuf::from("b.env")],
            dir.path(),
        )
        .unwrap();
        assert_eq!(source, PathBuf::from("a.env"));
    }

    #[test]
    fn missing_source_fails_and_writes_nothing() {
        let dir = tempdir().unwrap();
        let generator = generator(dir.path(), |c| {
            c.source.paths = vec![PathBuf::from("nope.env"), PathBuf::from("nada.env")];
        });

        let err = generator.generate(&NoopSink).unwrap_err();

        match err {
            EnvTypesError::NoSourceFound { candidates } => assert_eq!(candidates.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!dir.path().join("types").exists());
    }

    #[test]
    fn directory_candidate_is_not_a_source() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".env")).unwrap();

        let err = select_source(&[PathBuf::from(".env")], dir.path()).unwrap_err();
        assert!(matches!(err, EnvTypesError::NoSourceFound { .. }));
    }

    #[test]
    fn quiet_generation_emits_no_events() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".env"), "A=1\n").unwrap();
        let sink = CollectingSink::new();

        generator(dir.path(), |c| c.output.verbose = false)
            .generate(&sink)
            .unwrap();

        assert!(sink.events().is_empty());
    }

    #[test]
    fn plan_reports_staleness_without_writing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".env"), "A=1\n").unwrap();
        let generator = generator(dir.path(), |_| {});

        let plan = generator.plan().unwrap();
        assert!(plan.stale);
        assert!(!plan.output.exists());

        generator.generate(&NoopSink).unwrap();
        assert!(!generator.plan().unwrap().stale);
    }
}
