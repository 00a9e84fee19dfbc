//! Env file parser
//!
//! Turns `.env`-style text into an ordered list of [`EnvEntry`] values.
//! The format is deliberately small: `[export ]KEY=VALUE[ #comment]`,
//! comment-only lines starting with `#`, and blank lines that end a
//! comment block. There is no quoting, escaping, or interpolation, so a
//! `#` inside a value always starts an inline comment.

const COMMENT_MARKER: char = '#';
const ASSIGNMENT: char = '=';
const EXPORT_PREFIX: &str = "export ";

/// A single `KEY=VALUE` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvEntry {
    /// Trimmed variable name, never empty
    pub key: String,
    /// Preceding comment lines and inline comment, newline-joined
    pub comment: Option<String>,
    /// Raw text after the first `=`, up to any inline comment
    pub value: String,
    /// 1-based line number in the source file
    pub line: usize,
}

impl EnvEntry {
    /// Comment split into its individual lines
    pub fn comment_lines(&self) -> impl Iterator<Item = &str> {
        self.comment.as_deref().into_iter().flat_map(str::lines)
    }
}

/// Parse env file content into entries, in file order.
///
/// Duplicate keys are kept as separate entries.
pub fn parse_env(content: &str) -> Vec<EnvEntry> {
    let mut entries = Vec::new();
    let mut pending: Vec<String> = Vec::new();

    for (index, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();

        if line.is_empty() {
            pending.clear();
            continue;
        }

        if let Some(comment) = line.strip_prefix(COMMENT_MARKER) {
            let comment = comment.strip_prefix(' ').unwrap_or(comment);
            pending.push(comment.to_string());
            continue;
        }

        let declaration = line.strip_prefix(EXPORT_PREFIX).unwrap_or(line);
        let Some((key, raw_value)) = declaration.split_once(ASSIGNMENT) else {
            pending.clear();
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            pending.clear();
            continue;
        }

        let (value, inline) = split_inline_comment(raw_value);

        let mut comment_lines = std::mem::take(&mut pending);
        if let Some(inline) = inline {
            comment_lines.push(inline.to_string());
        }

        entries.push(EnvEntry {
            key: key.to_string(),
            comment: if comment_lines.is_empty() {
                None
            } else {
                Some(comment_lines.join("\n"))
            },
            value: value.to_string(),
            line: index + 1,
        });
    }

    entries
}

/// Split a raw value at the first comment marker.
///
/// An empty inline comment (`KEY=value #`) counts as no comment.
fn split_inline_comment(raw_value: &str) -> (&str, Option<&str>) {
    match raw_value.split_once(COMMENT_MARKER) {
        Some((value, comment)) => {
            let comment = comment.trim();
            (value, (!comment.is_empty()).then_some(comment))
        }
        None => (raw_value, None),
    }
}
