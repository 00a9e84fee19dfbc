use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use envtypes::{watch, BuildHost, CompilerContext, EnvTypesPlugin};

use super::{load_options, GlobalArgs};
use crate::cli::TypeArgs;
use crate::ui;

pub fn cmd_watch(global: &GlobalArgs, args: &TypeArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let options = load_options(global, args, &cwd)?;
    let verbose = options.verbose();
    let sink = ui::event_sink(global.json, true);

    let plugin = EnvTypesPlugin::new(options, sink.clone())?;
    let mut host = BuildHost::new(plugin, CompilerContext::new(&cwd), sink.clone());

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();

    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("failed to set Ctrl+C handler")?;

    watch(&mut host, running, sink.as_ref(), verbose)?;

    Ok(())
}
