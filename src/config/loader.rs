//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EnvTypesError, EnvTypesResult};

use super::types::Config;

/// Project config file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "envtypes.toml";

/// Comma-joined candidate env paths
pub const ENV_PATHS_VAR: &str = "ENVTYPES_ENV_PATHS";
/// Declaration file destination
pub const OUTPUT_VAR: &str = "ENVTYPES_OUTPUT";
pub const VERBOSE_VAR: &str = "ENVTYPES_VERBOSE";
pub const PARTIAL_VAR: &str = "ENVTYPES_PARTIAL";
pub const LITERAL_VALUES_VAR: &str = "ENVTYPES_LITERAL_VALUES";
pub const NAMESPACE_VAR: &str = "ENVTYPES_NAMESPACE";
pub const INTERFACE_VAR: &str = "ENVTYPES_INTERFACE";
pub const EXPORT_MARKER_VAR: &str = "ENVTYPES_EXPORT_MARKER";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> EnvTypesResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| EnvTypesError::io(path, e))?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| EnvTypesError::ConfigFile {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let (section, key) = match path_str.rsplit_once('.') {
                Some((section, key)) => (Some(section), key),
                None => (None, path_str.as_str()),
            };
            ConfigWarning {
                key: key.to_string(),
                file: path.to_path_buf(),
                line: find_line_number(&content, section, key),
                suggestion: suggest_key(section, key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load the project config if it exists, otherwise defaults; environment
/// overrides are applied either way.
///
/// A malformed project config is an error rather than a silent fallback.
pub fn load_or_default(project_root: &Path) -> EnvTypesResult<(Config, Vec<ConfigWarning>)> {
    let project_config = project_root.join(CONFIG_FILE_NAME);
    let (config, warnings) = if project_config.exists() {
        load_with_warnings(&project_config)?
    } else {
        (Config::default(), Vec::new())
    };

    Ok((with_env_overrides(config), warnings))
}

/// Apply environment variable overrides (ENVTYPES_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_overrides_from(config, |name| std::env::var(name).ok())
}

/// Apply overrides from an arbitrary variable lookup
pub(crate) fn with_overrides_from(
    mut config: Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> Config {
    if let Some(paths) = lookup(ENV_PATHS_VAR) {
        let parsed: Vec<PathBuf> = split_paths(&paths);
        if !parsed.is_empty() {
            config.source.paths = parsed;
        }
    }

    if let Some(output) = lookup(OUTPUT_VAR) {
        let output = output.trim();
        if !output.is_empty() {
            config.output.path = Some(PathBuf::from(output));
        }
    }

    if let Some(val) = lookup(VERBOSE_VAR) {
        config.output.verbose = parse_flag(&val);
    }

    if let Some(val) = lookup(PARTIAL_VAR) {
        config.types.partial = parse_flag(&val);
    }

    if let Some(val) = lookup(LITERAL_VALUES_VAR) {
        config.types.literal_values = parse_flag(&val);
    }

    if let Some(val) = lookup(EXPORT_MARKER_VAR) {
        config.types.export_marker = parse_flag(&val);
    }

    if let Some(val) = lookup(NAMESPACE_VAR).filter(|v| !v.trim().is_empty()) {
        config.types.namespace = val.trim().to_string();
    }

    if let Some(val) = lookup(INTERFACE_VAR).filter(|v| !v.trim().is_empty()) {
        config.types.interface = val.trim().to_string();
    }

    config
}

/// Split a comma-joined path list, dropping empty items
pub fn split_paths(joined: &str) -> Vec<PathBuf> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Join paths for the comma-joined environment contract
pub fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn parse_flag(val: &str) -> bool {
    let val = val.trim().to_lowercase();
    val != "false" && val != "0" && val != "no"
}

/// Keys accepted in each section; `None` is the document root
const KNOWN_KEYS: &[(Option<&str>, &[&str])] = &[
    (None, &["source", "output", "types", "generator"]),
    (Some("source"), &["paths"]),
    (Some("output"), &["path", "verbose"]),
    (
        Some("types"),
        &["namespace", "interface", "partial", "literal_values", "export_marker"],
    ),
    (Some("generator"), &["program", "args"]),
];

/// 1-based line where `key` is defined inside `section`.
///
/// An unknown root key may also be a table header (`[key]`).
fn find_line_number(content: &str, section: Option<&str>, key: &str) -> Option<usize> {
    let mut current: Option<&str> = None;

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let header = header.trim();
            if section.is_none() && header == key {
                return Some(index + 1);
            }
            current = Some(header);
            continue;
        }

        let defines_key = line
            .strip_prefix(key)
            .is_some_and(|rest| rest.trim_start().starts_with('='));
        if current == section && defines_key {
            return Some(index + 1);
        }
    }

    None
}

/// Closest key valid in `section`, if it is within two edits
fn suggest_key(section: Option<&str>, unknown: &str) -> Option<String> {
    let (_, keys) = KNOWN_KEYS.iter().find(|(name, _)| *name == section)?;

    keys.iter()
        .map(|key| (edit_distance(unknown, key), *key))
        .filter(|(distance, _)| *distance <= 2)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, key)| key.to_string())
}

/// Levenshtein distance over chars, single-row
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != *cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }

    row[b.len()]
}
