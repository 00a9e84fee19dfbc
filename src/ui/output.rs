use std::path::{Path, PathBuf};

use envtypes::config::ConfigWarning;
use envtypes::{EventSink, GenerateEvent};

/// Prefix on every console line, so messages stand out in build logs
pub const LOG_PREFIX: &str = "[envtypes]";

/// Human-readable event lines.
///
/// Verbosity filtering happens where events are emitted; this sink prints
/// whatever reaches it. Failures go to stderr, everything else to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink {
    /// Prefix lines with the local time (watch mode)
    timestamps: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timestamps(mut self) -> Self {
        self.timestamps = true;
        self
    }

    fn line(&self, message: &str) -> String {
        if self.timestamps {
            let now = chrono::Local::now().format("%H:%M:%S");
            format!("{LOG_PREFIX} {now} {message}")
        } else {
            format!("{LOG_PREFIX} {message}")
        }
    }
}

impl EventSink for ConsoleSink {
    fn on_event(&self, event: GenerateEvent) {
        let message = render_event(&event);
        match event {
            // Already formatted by the child process
            GenerateEvent::GeneratorOutput { .. } => println!("{message}"),
            GenerateEvent::Failed { .. } => eprintln!("{}", self.line(&message)),
            _ => println!("{}", self.line(&message)),
        }
    }
}

/// Message text for an event, without prefix
pub fn render_event(event: &GenerateEvent) -> String {
    match event {
        GenerateEvent::DirectoryCreated { path } => {
            format!("created directory {}", path.display())
        }
        GenerateEvent::UpToDate { output } => {
            format!("{} is up to date", output.display())
        }
        GenerateEvent::Generated {
            entries,
            source,
            output,
        } => format!(
            "generated {} ({} {} from {})",
            output.display(),
            entries,
            if *entries == 1 { "variable" } else { "variables" },
            source.display()
        ),
        GenerateEvent::Failed { message } => message.clone(),
        GenerateEvent::GeneratorOutput { line } => line.clone(),
        GenerateEvent::WatchStarted { paths } => {
            format!("watching {} (Ctrl+C to stop)", join_paths(paths))
        }
        GenerateEvent::FilesChanged { paths } => {
            format!("changed: {}", join_paths(paths))
        }
        GenerateEvent::Shutdown => "stopped".to_string(),
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "nothing".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn print_config_warnings(path: &Path, warnings: &[ConfigWarning]) {
    for w in warnings {
        if let Some(line) = w.line {
            eprintln!(
                "{LOG_PREFIX} unknown config key '{}' in {}:{}",
                w.key,
                path.display(),
                line
            );
        } else {
            eprintln!(
                "{LOG_PREFIX} unknown config key '{}' in {}",
                w.key,
                path.display()
            );
        }

        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{}'?", suggestion);
        }
    }
}
