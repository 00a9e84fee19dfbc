//! How a generation pass is executed

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::{
    join_paths, PluginOptions, ENV_PATHS_VAR, EXPORT_MARKER_VAR, INTERFACE_VAR,
    LITERAL_VALUES_VAR, NAMESPACE_VAR, OUTPUT_VAR, PARTIAL_VAR, VERBOSE_VAR,
};
use crate::error::{EnvTypesError, EnvTypesResult};
use crate::events::{emit, EventSink, GenerateEvent};
use crate::generator::Generator;

/// Where generation runs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GenerationStrategy {
    /// Call the generator directly
    #[default]
    InProcess,
    /// Run an external entry point and wait for it to exit.
    ///
    /// Options are passed through `ENVTYPES_*` variables; a non-zero exit
    /// is a failure.
    Subprocess { program: PathBuf, args: Vec<String> },
}

impl GenerationStrategy {
    /// Run one generation pass to completion
    pub fn run(&self, generator: &Generator, sink: &dyn EventSink) -> EnvTypesResult<()> {
        match self {
            GenerationStrategy::InProcess => generator.generate(sink).map(|_| ()),
            GenerationStrategy::Subprocess { program, args } => {
                run_subprocess(program, args, generator.options(), sink)
            }
        }
    }
}

/// Run the external generator. Its stdout is captured and re-emitted line by
/// line so it never interleaves with the host's own output stream.
fn run_subprocess(
    program: &Path,
    args: &[String],
    options: &PluginOptions,
    sink: &dyn EventSink,
) -> EnvTypesResult<()> {
    // Bare names go through PATH; anything with a directory is project-relative
    let resolved = if program.components().count() > 1 {
        options.resolve_path(program)
    } else {
        program.to_path_buf()
    };

    let output = Command::new(&resolved)
        .args(args)
        .current_dir(options.cwd())
        .env(ENV_PATHS_VAR, join_paths(options.env_paths()))
        .env(OUTPUT_VAR, options.output())
        .env(VERBOSE_VAR, options.verbose().to_string())
        .env(PARTIAL_VAR, options.partial().to_string())
        .env(LITERAL_VALUES_VAR, options.literal_values().to_string())
        .env(EXPORT_MARKER_VAR, options.export_marker().to_string())
        .env(NAMESPACE_VAR, options.namespace())
        .env(INTERFACE_VAR, options.interface())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| EnvTypesError::GeneratorProcess {
            program: resolved.clone(),
            status: "failed to start".to_string(),
            stderr: e.to_string(),
        })?;

    for line in String::from_utf8_lossy(&output.stdout).lines() {
        if !line.trim().is_empty() {
            emit(
                sink,
                options.verbose(),
                GenerateEvent::GeneratorOutput {
                    line: line.to_string(),
                },
            );
        }
    }

    if output.status.success() {
        return Ok(());
    }

    Err(EnvTypesError::GeneratorProcess {
        program: resolved,
        status: output.status.to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
}
