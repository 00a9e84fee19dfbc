//! envtypes CLI - TypeScript declarations for environment variables
//!
//! Usage: envtypes <COMMAND>
//!
//! Commands:
//!   generate  Generate the declaration file once
//!   check     Fail if the declaration file is out of date
//!   watch     Regenerate whenever the env file changes

mod cli;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use commands::GlobalArgs;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global = GlobalArgs::from(&cli);
    let args = cli.command.type_args();

    match &cli.command {
        Commands::Generate(_) => commands::cmd_generate(&global, args),
        Commands::Check(_) => commands::cmd_check(&global, args),
        Commands::Watch(_) => commands::cmd_watch(&global, args),
    }
}
