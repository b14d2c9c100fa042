//! # Torquilla CLI
//!
//! This is the binary entry point for the `tq` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Running the assembly and writing the result to stdout.
//! - Handling top-level errors: they are printed to stderr and the process
//!   exits with status 1.
//!
//! The pipeline itself lives in the `torquilla` library crate; the binary is a
//! thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
