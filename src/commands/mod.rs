//! Subcommand implementations

mod check;
mod generate;
mod watch;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use envtypes::config::CONFIG_FILE_NAME;
use envtypes::{Config, PluginOptions};

use crate::cli::{Cli, TypeArgs};
use crate::ui::print_config_warnings;

pub use check::cmd_check;
pub use generate::cmd_generate;
pub use watch::cmd_watch;

/// Options shared by every subcommand
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub json: bool,
    pub verbose: u8,
    pub quiet: bool,
    pub config: Option<PathBuf>,
}

impl From<&Cli> for GlobalArgs {
    fn from(cli: &Cli) -> Self {
        Self {
            json: cli.json,
            verbose: cli.verbose,
            quiet: cli.quiet,
            config: cli.config.clone(),
        }
    }
}

/// Build plugin options: defaults < config file < ENVTYPES_* < flags
pub fn load_options(global: &GlobalArgs, args: &TypeArgs, cwd: &Path) -> Result<PluginOptions> {
    let (config, warnings, config_path) = match &global.config {
        Some(path) => {
            let path = cwd.join(path);
            let (config, warnings) = Config::load_with_warnings(&path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            (config.with_env_overrides(), warnings, path)
        }
        None => {
            let (config, warnings) = Config::load_or_default(cwd)?;
            (config, warnings, cwd.join(CONFIG_FILE_NAME))
        }
    };

    if !global.json {
        print_config_warnings(&config_path, &warnings);
    }

    let config = apply_flags(config, global, args);
    Ok(config.resolve(cwd)?)
}

fn apply_flags(mut config: Config, global: &GlobalArgs, args: &TypeArgs) -> Config {
    if !args.env_paths.is_empty() {
        config.source.paths = args.env_paths.clone();
    }
    if let Some(output) = &args.output {
        config.output.path = Some(output.clone());
    }
    if args.no_partial {
        config.types.partial = false;
    }
    if args.literal_values {
        config.types.literal_values = true;
    }
    if let Some(namespace) = &args.namespace {
        config.types.namespace = namespace.clone();
    }
    if let Some(interface) = &args.interface {
        config.types.interface = interface.clone();
    }
    if args.no_export_marker {
        config.types.export_marker = false;
    }

    if global.quiet {
        config.output.verbose = false;
    } else if global.verbose > 0 {
        config.output.verbose = true;
    }

    config
}
