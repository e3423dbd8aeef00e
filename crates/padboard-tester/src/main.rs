#![warn(missing_docs)]

//! Entry point for the `padboard-tester` binary.

mod cli;
mod diagnostics;
mod error;
mod replay;

use std::process;

use clap::Parser;
use tracing::error;

use crate::{
    cli::{Cli, Commands},
    error::Result,
};

fn main() {
    if let Err(err) = run() {
        error!("{err}");
        eprintln!("error: {}", err.pretty());
        process::exit(1);
    }
}

/// Parse CLI arguments, install logging, and dispatch to the chosen subcommand.
fn run() -> Result<()> {
    let Cli { log, command } = Cli::parse();
    logging::init(&log);

    match command {
        Commands::Replay(args) => replay::run(&args),
        Commands::Show(args) => replay::show(&args),
    }
}
