//! CLI module graph.

pub mod command;
pub mod config;
pub mod output;
pub mod render;
pub mod run;

use self::command::{Cli, Commands, ConfigCommand};
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Dispatch a parsed command line.
pub fn execute(cli: &Cli) -> Result<()> {
    output::configure(output::OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    match &cli.command {
        Commands::Run(args) => run::execute(args),
        Commands::Analyze(args) => run::execute_analyze(args),
        Commands::Config(ConfigCommand::Validate(arg)) => config::execute_validate(&arg.config),
        Commands::Config(ConfigCommand::Show(arg)) => config::execute_show(&arg.config),
    }
}

/// Start logging at the configured level, adjusted by `-v` and `--quiet`.
pub(crate) fn init_logging(config: &Config) {
    let level = match (output::verbosity(), output::is_quiet()) {
        (0, true) => "error",
        (0, false) => config.logging.level.as_str(),
        (1, _) => "debug",
        _ => "trace",
    };
    config.logging.with_level(level).init();
}
