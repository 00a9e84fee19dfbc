use anyhow::Result;
use envtypes::Generator;

use super::{load_options, GlobalArgs};
use crate::cli::TypeArgs;
use crate::ui::output::LOG_PREFIX;

/// Render without writing; exit 1 when the declaration file is stale
pub fn cmd_check(global: &GlobalArgs, args: &TypeArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let options = load_options(global, args, &cwd)?;
    let verbose = options.verbose();

    let plan = Generator::new(options).plan()?;

    if global.json {
        println!(
            "{}",
            serde_json::json!({
                "event": "check",
                "source": plan.source,
                "output": plan.output,
                "entries": plan.entries.len(),
                "stale": plan.stale,
            })
        );
    } else if plan.stale {
        eprintln!(
            "{LOG_PREFIX} {} is out of date with {} (run `envtypes generate`)",
            plan.output.display(),
            plan.source.display()
        );
    } else if verbose {
        println!("{LOG_PREFIX} {} is up to date", plan.output.display());
    }

    if plan.stale {
        std::process::exit(1);
    }

    Ok(())
}
