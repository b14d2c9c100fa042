//! Assemble command implementation
//!
//! Resolves the effective configuration (defaults, then the configuration
//! file, then command-line flags), opens the repository and runs the
//! assembly pipeline. Warnings go to stderr unless `--silent` is set; the
//! assembled output goes to stdout only once the whole pipeline succeeded.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use log::debug;

use torquilla::config::{self, Config};
use torquilla::output::OutputConfig;
use torquilla::phases::{orchestrator, phase1};
use torquilla::repository::DefaultGitOperations;

/// Arguments for assembling a commit range
#[derive(Args, Debug, Default)]
pub struct AssembleArgs {
    /// Start revision, and optionally the end revision (defaults to HEAD)
    #[arg(value_name = "REVISION")]
    pub revisions: Vec<String>,

    /// Repository working directory
    #[arg(short, long, value_name = "DIR", env = "TORQUILLA_DIR")]
    pub dir: Option<PathBuf>,

    /// Manifest file defining the run order
    #[arg(short, long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Don't display warnings
    #[arg(short, long)]
    pub silent: bool,

    /// Only print file names
    #[arg(short, long)]
    pub name_only: bool,

    /// Paths scanned for added files
    #[arg(long, value_name = "PATH", value_delimiter = ',')]
    pub migrations: Vec<String>,

    /// Paths scanned for added or modified files
    #[arg(long, value_name = "PATH", value_delimiter = ',')]
    pub definitions: Vec<String>,

    /// File extensions to keep, including the dot (e.g. ".sql")
    #[arg(long, value_name = "EXT", value_delimiter = ',', allow_hyphen_values = true)]
    pub extensions: Vec<String>,

    /// Version statement appended last; `%s` is replaced by the end commit
    #[arg(long, value_name = "FORMAT", allow_hyphen_values = true)]
    pub version_tmpl: Option<String>,

    /// Output template receiving {{ .Script }} and {{ .Sha }}
    #[arg(long, value_name = "TEMPLATE", allow_hyphen_values = true)]
    pub template: Option<String>,

    /// Path to the configuration file (defaults to ./torquilla.yaml)
    #[arg(short, long, value_name = "FILE", env = "TORQUILLA_CONFIG")]
    pub config: Option<PathBuf>,
}

impl AssembleArgs {
    /// Load the configuration file, if any, and apply flag overrides.
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => config::from_file(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?,
            None => match config::discover(&std::env::current_dir()?) {
                Some(path) => {
                    debug!("using configuration {}", path.display());
                    config::from_file(&path).with_context(|| {
                        format!("Failed to load configuration {}", path.display())
                    })?
                }
                None => Config::default(),
            },
        };

        if let Some(dir) = &self.dir {
            config.dir = Some(dir.clone());
        }
        if let Some(manifest) = &self.manifest {
            config.manifest = Some(manifest.clone());
        }
        config.silent |= self.silent;
        config.name_only |= self.name_only;
        if !self.migrations.is_empty() {
            config.migrations = self.migrations.clone();
        }
        if !self.definitions.is_empty() {
            config.definitions = self.definitions.clone();
        }
        if !self.extensions.is_empty() {
            config.extensions = self.extensions.clone();
        }
        if let Some(version_tmpl) = &self.version_tmpl {
            config.version_tmpl = Some(version_tmpl.clone());
        }
        if let Some(template) = &self.template {
            config.template = Some(template.clone());
        }

        Ok(config)
    }
}

/// Execute the assembly and write the result to stdout
pub fn execute(args: AssembleArgs, output: &OutputConfig) -> Result<()> {
    // Argument count is checked before the repository is opened
    phase1::check_arity(&args.revisions)?;

    let config = args.resolve_config()?;
    let dir = config.repository_dir()?;
    let git = DefaultGitOperations::open(&dir)?;

    let assembly = orchestrator::execute(&config, &git, &args.revisions)?;

    if !config.silent {
        for warning in &assembly.warnings {
            eprintln!("{}", output.format_warning(warning));
        }
    }

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&assembly.output)?;
    stdout.flush()?;

    Ok(())
}
