//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{ArgAction, Parser};

use crate::commands;
use torquilla::defaults::DEFAULT_LOG_LEVEL;
use torquilla::output::{ColorChoice, OutputConfig};

/// Torquilla - assemble the schema migrations changed in a commit range
#[derive(Parser, Debug)]
#[command(name = "tq")]
#[command(version, about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    #[command(flatten)]
    assemble: commands::assemble::AssembleArgs,

    /// Print version number and exit
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,

    /// When to colorize warnings
    #[arg(long, value_name = "WHEN", value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Set log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, value_name = "LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        let output = OutputConfig::from_env_and_flag(self.color);

        commands::assemble::execute(self.assemble, &output)
    }
}

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A logger may already be installed when running under tests
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
