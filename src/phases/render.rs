//! Phase 6: Rendering
//!
//! Turns the ordered scripts into the final output.
//!
//! ## Layout
//!
//! Each script becomes one entry: a `-- <end sha>:<path>` header, a blank
//! line, then the file content. Entries are joined with a blank line:
//!
//! ```text
//! -- 3f2a...:migrations/001_users.sql
//!
//! CREATE TABLE users (...);
//!
//! -- 3f2a...:migrations/002_orders.sql
//!
//! CREATE TABLE orders (...);
//! ```
//!
//! With a version template, one more entry headed `-- update version number`
//! carries the formatted version statement. With an output template, the
//! joined body and the end sha are handed to the [`Template`] and its result
//! is the output instead.

use std::borrow::Cow;

use crate::defaults::{ENTRY_SEPARATOR, VERSION_ENTRY_HEADER};
use crate::error::Result;
use crate::script::Script;
use crate::template::Template;

/// Values exposed to the output template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    /// The assembled body, available as `.Script`
    pub script: Vec<u8>,
    /// The end commit id, available as `.Sha`
    pub sha: String,
}

impl RenderContext {
    /// Named fields in template order.
    pub fn fields(&self) -> [(&str, &[u8]); 2] {
        [("Script", self.script.as_slice()), ("Sha", self.sha.as_bytes())]
    }
}

/// Substitute `sha` into a printf-style version format.
///
/// The first `%s` receives the sha and `%%` becomes a literal `%`. Any other
/// `%` sequence, including further `%s`, is copied as written.
pub fn format_version(format: &str, sha: &str) -> String {
    let mut result = String::with_capacity(format.len() + sha.len());
    let mut substituted = false;
    let mut chars = format.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '%' {
            match chars.peek() {
                Some('%') => {
                    chars.next();
                    result.push('%');
                    continue;
                }
                Some('s') if !substituted => {
                    chars.next();
                    result.push_str(sha);
                    substituted = true;
                    continue;
                }
                _ => {}
            }
        }
        result.push(ch);
    }

    result
}

/// Join the ordered scripts into one body.
///
/// Script contents are copied byte for byte; they need not be UTF-8.
pub fn assemble(scripts: &[Script], sha: &str, version_tmpl: Option<&str>) -> Vec<u8> {
    let mut entries: Vec<Cow<'_, [u8]>> = Vec::with_capacity(scripts.len() * 2 + 2);

    for script in scripts {
        entries.push(Cow::Owned(format!("-- {}:{}", sha, script.name).into_bytes()));
        entries.push(Cow::Borrowed(script.data.as_slice()));
    }

    if let Some(format) = version_tmpl.filter(|f| !f.is_empty()) {
        entries.push(Cow::Borrowed(VERSION_ENTRY_HEADER.as_bytes()));
        entries.push(Cow::Owned(format_version(format, sha).into_bytes()));
    }

    entries.join(ENTRY_SEPARATOR.as_bytes())
}

/// One script name per line, in order.
pub fn name_list(scripts: &[Script]) -> String {
    let mut output = String::new();
    for script in scripts {
        output.push_str(&script.name);
        output.push('\n');
    }
    output
}

/// Execute Phase 6: produce the final output bytes
///
/// Without a template the body is returned with a trailing newline; with a
/// template its rendered result is returned exactly.
pub fn execute(
    scripts: &[Script],
    sha: &str,
    version_tmpl: Option<&str>,
    template: Option<&Template>,
) -> Result<Vec<u8>> {
    let context = RenderContext {
        script: assemble(scripts, sha, version_tmpl),
        sha: sha.to_string(),
    };

    match template {
        Some(template) => template.execute(&context.fields()),
        None => {
            let mut output = context.script;
            output.push(b'\n');
            Ok(output)
        }
    }
}
