//! Error types for envtypes
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for envtypes operations
pub type EnvTypesResult<T> = Result<T, EnvTypesError>;

/// Main error type for envtypes operations
#[derive(Error, Debug)]
pub enum EnvTypesError {
    /// Options could not be resolved (e.g. no output destination)
    #[error("invalid configuration: {message}")]
    Config { message: String },

    /// Config file could not be parsed
    #[error("invalid config file {file}: {message}")]
    ConfigFile { file: PathBuf, message: String },

    /// None of the candidate env files exist
    #[error("no env file found (looked for: {})", format_candidates(.candidates))]
    NoSourceFound { candidates: Vec<PathBuf> },

    /// Output directory could not be created
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Read or write failure on a source or destination file
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File watcher could not be set up
    #[error("watch error: {message}")]
    Watch { message: String },

    /// Out-of-process generator failed
    #[error("generator '{program}' failed ({status}): {stderr}")]
    GeneratorProcess {
        program: PathBuf,
        status: String,
        stderr: String,
    },
}

impl EnvTypesError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EnvTypesError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        EnvTypesError::Config {
            message: message.into(),
        }
    }
}

fn format_candidates(candidates: &[PathBuf]) -> String {
    candidates
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
