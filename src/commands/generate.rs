use anyhow::Result;
use envtypes::events::emit;
use envtypes::{GenerateEvent, Generator};

use super::{load_options, GlobalArgs};
use crate::cli::TypeArgs;
use crate::ui;

/// One in-process generation pass.
///
/// This is also the entry point the subprocess strategy launches, so it
/// never goes through a configured generator program itself.
pub fn cmd_generate(global: &GlobalArgs, args: &TypeArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let options = load_options(global, args, &cwd)?;
    let verbose = options.verbose();
    let sink = ui::event_sink(global.json, false);

    let generator = Generator::new(options);
    if let Err(e) = generator.generate(sink.as_ref()) {
        if global.json {
            emit(
                sink.as_ref(),
                verbose,
                GenerateEvent::Failed {
                    message: e.to_string(),
                },
            );
        }
        return Err(e.into());
    }

    Ok(())
}
