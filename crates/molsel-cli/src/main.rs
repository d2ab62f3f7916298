mod cli;
mod commands;
mod error;
mod logging;

use crate::cli::{Cli, Commands};
use crate::error::Result;
use clap::Parser;
use std::io;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!("molsel CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let mut stdout = io::stdout().lock();
    let result = match cli.command {
        Commands::Tokens(args) => {
            info!("Dispatching to 'tokens' command.");
            commands::tokens::run(&args, &mut stdout)
        }
        Commands::Check(args) => {
            info!("Dispatching to 'check' command.");
            commands::check::run(&args, &mut stdout)
        }
    };

    if let Err(e) = &result {
        error!("Command failed: {}", e);
    }
    result
}
