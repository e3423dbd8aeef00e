//! Command-line interface definitions for padboard-tester.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use logging::LogArgs;

/// Command-line interface for the `padboard-tester` binary.
#[derive(Parser, Debug)]
#[command(
    name = "padboard-tester",
    about = "Scripted gesture replay for padboard grids",
    version
)]
pub struct Cli {
    /// Logging controls shared across padboard binaries.
    #[command(flatten)]
    pub log: LogArgs,

    /// What to do with the board.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level tester commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay gesture directives against a board and log every transition.
    Replay(ReplayArgs),
    /// Log the board's frames and free cells without changing anything.
    Show(BoardArgs),
}

/// Where the board comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct BoardArgs {
    /// Board configuration (RON). Defaults to `~/.padboard/config.ron`, then
    /// built-in defaults.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Saved layout (RON) that replaces the configured seed cards when present.
    #[arg(long, value_name = "PATH")]
    pub layout: Option<PathBuf>,
}

/// Arguments for the `replay` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    /// Board source.
    #[command(flatten)]
    pub board: BoardArgs,

    /// One or more directives in RON syntax, e.g.
    /// `drag("light.kitchen", [(266.0, 266.0)])` or
    /// `resize("climate.hall", bottom_right, (100.0, 100.0), [(210.0, 215.0)])`.
    #[arg(value_name = "DIRECTIVE", num_args = 1..)]
    pub specs: Vec<String>,

    /// Write the final layout back to `--layout`.
    #[arg(long, requires = "layout")]
    pub save: bool,

    /// Stop at the first directive that fails instead of logging and
    /// continuing.
    #[arg(long)]
    pub strict: bool,
}
