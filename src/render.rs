//! Declaration file rendering

use std::fmt::Write as _;
use std::path::Path;

use crate::config::PluginOptions;
use crate::parser::EnvEntry;

/// First header line, warns readers off hand edits
pub const HEADER_NOTICE: &str = "// This file is auto-generated by envtypes. Do not edit.";
/// Prefix of the provenance line naming the source file
pub const SOURCE_PREFIX: &str = "// Source: ";
/// Prefix of the timestamp line, ignored by change detection
pub const TIMESTAMP_PREFIX: &str = "// Generated: ";

const MEMBER_INDENT: &str = "    ";

/// Local time truncated to seconds, as written into the header
pub fn timestamp_now() -> String {
    chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Render the full declaration file.
pub fn render(
    entries: &[EnvEntry],
    source: &Path,
    timestamp: &str,
    options: &PluginOptions,
) -> String {
    let mut out = String::new();

    out.push_str(HEADER_NOTICE);
    out.push('\n');
    let _ = writeln!(out, "{SOURCE_PREFIX}{}", source.display());
    let _ = writeln!(out, "{TIMESTAMP_PREFIX}{timestamp}");
    out.push('\n');

    let _ = writeln!(out, "declare namespace {} {{", options.namespace());
    let _ = writeln!(out, "  interface {} {{", options.interface());
    for entry in entries {
        render_entry(&mut out, entry, options);
    }
    out.push_str("  }\n");
    out.push_str("}\n");

    if options.export_marker() {
        out.push_str("\nexport {};\n");
    }

    out
}

fn render_entry(out: &mut String, entry: &EnvEntry, options: &PluginOptions) {
    if entry.comment.is_some() {
        let _ = writeln!(out, "{MEMBER_INDENT}/**");
        for line in entry.comment_lines() {
            let line = line.replace("*/", "*\\/");
            if line.is_empty() {
                let _ = writeln!(out, "{MEMBER_INDENT} *");
            } else {
                let _ = writeln!(out, "{MEMBER_INDENT} * {line}");
            }
        }
        let _ = writeln!(out, "{MEMBER_INDENT} */");
    }

    let marker = if options.partial() { "?" } else { "" };
    let _ = writeln!(
        out,
        "{MEMBER_INDENT}{}{marker}: {};",
        member_name(&entry.key),
        member_type(entry, options)
    );
}

fn member_type(entry: &EnvEntry, options: &PluginOptions) -> String {
    if options.literal_values() {
        string_literal(entry.value.trim())
    } else {
        "string".to_string()
    }
}

/// Keys that are not identifiers are emitted as quoted property names
fn member_name(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        string_literal(key)
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn string_literal(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text.escape_default()))
}

/// Drop the timestamp line so two renders of the same input compare equal.
pub fn strip_timestamp(text: &str) -> String {
    text.lines()
        .filter(|line| !line.starts_with(TIMESTAMP_PREFIX))
        .collect::<Vec<_>>()
        .join("\n")
}
