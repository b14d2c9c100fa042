//! # CLI Command Implementations
//!
//! `tq` has a single command, so there is no subcommand layer: the top-level
//! [`Cli`](crate::cli::Cli) flattens [`assemble::AssembleArgs`] into itself.
//!
//! The command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and runs the
//!   `torquilla` pipeline.

pub mod assemble;
