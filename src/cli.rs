use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// envtypes - TypeScript declarations for environment variables
#[derive(Parser, Debug)]
#[command(name = "envtypes")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI (NDJSON events)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only report failures
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Config file to use instead of ./envtypes.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the declaration file once
    Generate(TypeArgs),

    /// Exit non-zero if the declaration file is missing or out of date
    Check(TypeArgs),

    /// Regenerate whenever the env file changes
    Watch(TypeArgs),
}

/// Flags shared by every subcommand; each overrides config and environment
#[derive(Args, Debug, Default, Clone)]
pub struct TypeArgs {
    /// Candidate env file, searched in order (repeatable)
    #[arg(short = 'e', long = "env-path", value_name = "PATH")]
    pub env_paths: Vec<PathBuf>,

    /// Declaration file destination
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit required members (`KEY: string`) instead of optional ones
    #[arg(long)]
    pub no_partial: bool,

    /// Pin each member's type to its literal value
    #[arg(long)]
    pub literal_values: bool,

    /// Namespace wrapping the interface
    #[arg(long)]
    pub namespace: Option<String>,

    /// Interface holding the members
    #[arg(long)]
    pub interface: Option<String>,

    /// Omit the trailing `export {};`
    #[arg(long)]
    pub no_export_marker: bool,
}

impl Commands {
    pub fn type_args(&self) -> &TypeArgs {
        match self {
            Commands::Generate(args) | Commands::Check(args) | Commands::Watch(args) => args,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_generate() {
        let cli = Cli::try_parse_from(["envtypes", "generate"]).unwrap();
        if let Commands::Generate(args) = cli.command {
            assert!(args.env_paths.is_empty());
            assert_eq!(args.output, None);
            assert!(!args.no_partial);
            assert!(!args.literal_values);
            assert!(!args.no_export_marker);
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn test_cli_parse_generate_with_args() {
        let cli = Cli::try_parse_from([
            "envtypes",
            "generate",
            "--env-path",
            ".env.local",
            "-e",
            ".env",
            "--output",
            "types/env.d.ts",
            "--no-partial",
            "--literal-values",
            "--namespace",
            "App",
            "--interface",
            "Env",
            "--no-export-marker",
        ])
        .unwrap();

        let args = cli.command.type_args();
        assert_eq!(
            args.env_paths,
            vec![PathBuf::from(".env.local"), PathBuf::from(".env")]
        );
        assert_eq!(args.output, Some(PathBuf::from("types/env.d.ts")));
        assert!(args.no_partial);
        assert!(args.literal_values);
        assert_eq!(args.namespace.as_deref(), Some("App"));
        assert_eq!(args.interface.as_deref(), Some("Env"));
        assert!(args.no_export_marker);
    }

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::try_parse_from(["envtypes", "check", "-o", "env.d.ts"]).unwrap();
        if let Commands::Check(args) = cli.command {
            assert_eq!(args.output, Some(PathBuf::from("env.d.ts")));
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_cli_parse_watch() {
        let cli = Cli::try_parse_from(["envtypes", "watch"]).unwrap();
        assert!(matches!(cli.command, Commands::Watch(_)));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["envtypes"]).is_err());
    }

    #[test]
    fn test_cli_json_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["envtypes", "generate", "--json"]).unwrap();
        assert!(cli.json);
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::try_parse_from(["envtypes", "-vv", "watch"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_cli_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["envtypes", "-q", "-v", "generate"]).is_err());
    }

    #[test]
    fn test_cli_config_flag() {
        let cli =
            Cli::try_parse_from(["envtypes", "check", "--config", "ci/envtypes.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("ci/envtypes.toml")));
    }
}
