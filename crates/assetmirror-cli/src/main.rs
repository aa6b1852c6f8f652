//! Assetmirror CLI - Command-line utility for mirroring bundled assets into
//! writable directories.

mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    logging::enable_tracing(cli.verbose, cli.quiet)?;

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    match &cli.command {
        cli::Commands::Extract(args) => {
            commands::extract::execute(args, &*formatter, cli.quiet || cli.json)
        }
        cli::Commands::List(args) => commands::list::execute(args, &*formatter),
        cli::Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            Ok(())
        }
    }
}
