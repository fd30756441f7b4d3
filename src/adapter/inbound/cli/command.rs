//! Command-line interface definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Currency exchange market scanner
#[derive(Parser, Debug)]
#[command(name = "cxscan")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyse the current hour from the export directory, then the trend window
    Run(RunArgs),

    /// Analyse explicit export files, oldest first
    Analyze(AnalyzeArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `cxscan config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
    /// Validate a configuration file for correctness.
    Validate(ConfigPathArg),
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Analyse this export file instead of the export directory (no trend analysis)
    #[arg(long, value_name = "FILE")]
    pub sample: Option<PathBuf>,

    /// Skip multi-hour trend analysis
    #[arg(long)]
    pub no_trend: bool,

    /// Historical hours to load before the current one (overrides config)
    #[arg(long, value_name = "N")]
    pub hours: Option<u32>,

    /// Unix timestamp of the current hour (defaults to now minus data.hours_back)
    #[arg(long, value_name = "TS")]
    pub at: Option<i64>,
}

/// Arguments for the `analyze` subcommand.
#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Export files, oldest first. The last one is the current hour.
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_run_flags() {
        let cli = Cli::parse_from(["cxscan", "--json", "run", "--no-trend", "--hours", "6"]);
        assert!(cli.json);
        match cli.command {
            Commands::Run(args) => {
                assert!(args.no_trend);
                assert_eq!(args.hours, Some(6));
                assert_eq!(args.config, PathBuf::from("config.toml"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn analyze_requires_files() {
        assert!(Cli::try_parse_from(["cxscan", "analyze"]).is_err());
        let cli = Cli::try_parse_from(["cxscan", "analyze", "a.json", "b.json"]).unwrap();
        match cli.command {
            Commands::Analyze(args) => assert_eq!(args.files.len(), 2),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
