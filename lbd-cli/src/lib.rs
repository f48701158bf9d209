//! `ifc2lbd` command line interface.
//!
//! The binary parses arguments, installs logging and hands the parsed
//! [`Cli`] to [`run`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

use cli::{Cli, Commands};

/// Dispatch a parsed [`Cli`] to its command
pub fn run(cli: Cli) -> error::CliResult<()> {
    let config = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Convert(args) => commands::convert::run(&args, config, cli.quiet),
        Commands::Schema { input } => commands::schema::run(&input),
    }
}
