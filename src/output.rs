//! # Diagnostic Styling
//!
//! Decides whether warnings printed to stderr get ANSI styling. The
//! assembled scripts on stdout are never styled; they usually end up in a
//! database client or a file.
//!
//! In `auto` mode the usual conventions apply, checked in this order:
//! `NO_COLOR` (any value) disables, `CLICOLOR=0` disables,
//! `CLICOLOR_FORCE` (non-zero) enables, `TERM=dumb` disables. Otherwise the
//! answer comes from whether stderr is a color-capable terminal.

use console::style;

use crate::phases::reconcile::Warning;

/// Value of the `--color` flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    Always,
    Never,
    #[default]
    Auto,
}

/// Whether diagnostics on stderr are styled
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// Resolve the `--color` flag against the process environment.
    pub fn from_env_and_flag(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Always => Self::with_color(),
            ColorChoice::Never => Self::without_color(),
            ColorChoice::Auto => Self {
                use_color: env_color_preference(|key| std::env::var(key).ok())
                    .unwrap_or_else(|| console::Term::stderr().features().colors_supported()),
            },
        }
    }

    /// Format a reconciliation warning as one stderr line.
    pub fn format_warning(&self, warning: &Warning) -> String {
        let label = if self.use_color {
            style("warning:").yellow().bold().force_styling(true).to_string()
        } else {
            "warning:".to_string()
        };
        format!("{} {}", label, warning)
    }

    /// Style diagnostics regardless of the environment.
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Never style diagnostics.
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

/// What the environment says about color, if anything.
///
/// `None` means no variable decided and the terminal should be asked.
fn env_color_preference(lookup: impl Fn(&str) -> Option<String>) -> Option<bool> {
    if lookup("NO_COLOR").is_some() {
        return Some(false);
    }
    if lookup("CLICOLOR").as_deref() == Some("0") {
        return Some(false);
    }
    if lookup("CLICOLOR_FORCE").is_some_and(|v| !v.is_empty() && v != "0") {
        return Some(true);
    }
    if lookup("TERM").as_deref() == Some("dumb") {
        return Some(false);
    }
    None
}
