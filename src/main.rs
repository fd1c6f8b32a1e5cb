// Main entry point for tapconsole

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use tapconsole::cli::Cli;
use tapconsole::commands;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tapconsole::logging::init(cli.verbose_log);
    info!("Starting tapconsole v{}", env!("CARGO_PKG_VERSION"));

    match commands::run_replays(&cli) {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("{:#}", e);
            Err(e)
        }
    }
}
