//! Property tests for declaration rendering.

use std::path::{Path, PathBuf};

use proptest::prelude::*;

use envtypes::render::{render, strip_timestamp};
use envtypes::{parse_env, Config, PluginOptions};

fn options(literal_values: bool) -> PluginOptions {
    let mut config = Config::default();
    config.output.path = Some(PathBuf::from("env.d.ts"));
    config.types.literal_values = literal_values;
    config.resolve(Path::new("/project")).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: one member line per parsed entry, whatever the input.
    #[test]
    fn property_one_member_per_entry(
        content in "(?s).{0,256}",
        literal_values in any::<bool>(),
    ) {
        let entries = parse_env(&content);
        let rendered = render(&entries, Path::new(".env"), "2026-01-01T00:00:00", &options(literal_values));

        let members = rendered
            .lines()
            .filter(|line| line.starts_with("    ") && !line.starts_with("    /**") && !line.starts_with("     *"))
            .count();
        prop_assert_eq!(members, entries.len());
    }

    /// PROPERTY: comment text can never close its doc block early.
    #[test]
    fn property_comments_stay_inside_doc_block(
        comment in "[a-z*/ ]{0,30}",
    ) {
        let entries = parse_env(&format!("# {comment}\nKEY=value"));
        let rendered = render(&entries, Path::new(".env"), "2026-01-01T00:00:00", &options(false));

        let closers = rendered.matches("*/").count();
        prop_assert_eq!(closers, 1);
    }

    /// PROPERTY: renders differing only in timestamp compare equal once stripped.
    #[test]
    fn property_timestamp_is_ignored(
        content in "(?s).{0,128}",
        hour in 0u32..24,
    ) {
        let entries = parse_env(&content);
        let opts = options(false);
        let a = render(&entries, Path::new(".env"), "2026-01-01T00:00:00", &opts);
        let b = render(&entries, Path::new(".env"), &format!("2026-01-01T{hour:02}:30:00"), &opts);

        prop_assert_eq!(strip_timestamp(&a), strip_timestamp(&b));
    }
}
