//! Property tests for env file parsing.

use proptest::prelude::*;

use envtypes::parse_env;

fn key() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Z_][A-Z0-9_]{0,20}").unwrap()
}

fn value() -> impl Strategy<Value = String> {
    // No comment marker and no surrounding whitespace, so the value is kept verbatim
    proptest::string::string_regex("[a-z0-9=:/.]{0,24}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: `parse_env` never panics on arbitrary input.
    #[test]
    fn property_parse_env_never_panics(content in "(?s).{0,512}") {
        let _ = parse_env(&content);
    }

    /// PROPERTY: every declared key comes back, in order, with its value intact
    /// (including values that themselves contain `=`).
    #[test]
    fn property_keys_and_values_round_trip(
        pairs in proptest::collection::vec((key(), value()), 0..=16),
    ) {
        let content = pairs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("\n");

        let entries = parse_env(&content);

        prop_assert_eq!(entries.len(), pairs.len());
        for (entry, (k, v)) in entries.iter().zip(&pairs) {
            prop_assert_eq!(&entry.key, k);
            prop_assert_eq!(&entry.value, v);
            prop_assert!(entry.comment.is_none());
        }
    }

    /// PROPERTY: keys are never empty and never carry surrounding whitespace.
    #[test]
    fn property_keys_are_trimmed_and_non_empty(
        lines in proptest::collection::vec("[ a-zA-Z0-9_=#\t]{0,30}", 0..=20),
    ) {
        let content = lines.join("\n");
        let entries = parse_env(&content);

        prop_assert!(entries.len() <= lines.len());
        for entry in &entries {
            prop_assert!(!entry.key.is_empty());
            prop_assert_eq!(entry.key.trim(), entry.key.as_str());
            prop_assert!(!entry.key.contains('='));
            prop_assert!(entry.line >= 1 && entry.line <= lines.len());
        }
    }

    /// PROPERTY: a blank line always detaches the comment block above it.
    #[test]
    fn property_blank_line_clears_comments(
        comment in "[a-z ]{1,20}",
        k in key(),
        v in value(),
    ) {
        let content = format!("# {comment}\n\n{k}={v}");
        let entries = parse_env(&content);

        prop_assert_eq!(entries.len(), 1);
        prop_assert!(entries[0].comment.is_none());
    }
}
