//! # Output Templates
//!
//! A small text-template language for wrapping the assembled output, e.g. in
//! a transaction or a deployment header. Syntax follows Go's `text/template`
//! for the subset that makes sense with two string fields:
//!
//! - `{{ .Script }}` inserts the assembled scripts;
//! - `{{ .Sha }}` inserts the end commit id;
//! - `{{- ` trims whitespace before the action, ` -}}` trims it after;
//! - `{{/* ... */}}` is a comment.
//!
//! Field values are byte strings and are spliced in unchanged, so a body
//! that is not valid UTF-8 passes through intact.
//!
//! Parsing happens up front so that a malformed template fails before any
//! repository work is done. Field names are checked when the template is
//! executed, mirroring `text/template`.
//!
//! ```
//! use torquilla::template::Template;
//!
//! let template = Template::parse("BEGIN;\n{{ .Script }}\nCOMMIT; -- {{ .Sha }}").unwrap();
//! let fields: [(&str, &[u8]); 2] = [("Script", b"select 1;"), ("Sha", b"deadbeef")];
//! let output = template.execute(&fields).unwrap();
//! assert_eq!(output, b"BEGIN;\nselect 1;\nCOMMIT; -- deadbeef");
//! ```

use regex::Regex;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    Field(String),
}

/// A parsed output template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    nodes: Vec<Node>,
}

fn parse_error(message: String) -> Error {
    Error::Template {
        message,
        variable: None,
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Template {
    /// Parse template text.
    pub fn parse(source: &str) -> Result<Self> {
        let action = Regex::new(r"(?s)\{\{(-[ \t\r\n])?(.*?)([ \t\r\n]-)?\}\}")?;

        let mut nodes: Vec<Node> = Vec::new();
        let mut cursor = 0;
        let mut trim_next = false;

        for caps in action.captures_iter(source) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let mut text = &source[cursor..whole.start()];
            if text.contains("{{") {
                return Err(parse_error("unclosed action".to_string()));
            }
            if trim_next {
                text = text.trim_start();
            }
            if caps.get(1).is_some() {
                text = text.trim_end();
            }
            if !text.is_empty() {
                nodes.push(Node::Text(text.to_string()));
            }

            let body = caps.get(2).map(|m| m.as_str()).unwrap_or("").trim();
            if body.starts_with("/*") && body.ends_with("*/") && body.len() >= 4 {
                // comment
            } else if body.is_empty() {
                return Err(parse_error("missing value for command".to_string()));
            } else if let Some(field) = body.strip_prefix('.').filter(|f| is_identifier(f)) {
                nodes.push(Node::Field(field.to_string()));
            } else {
                return Err(parse_error(format!("unsupported action \"{}\"", body)));
            }

            trim_next = caps.get(3).is_some();
            cursor = whole.end();
        }

        let mut tail = &source[cursor..];
        if tail.contains("{{") {
            return Err(parse_error("unclosed action".to_string()));
        }
        if trim_next {
            tail = tail.trim_start();
        }
        if !tail.is_empty() {
            nodes.push(Node::Text(tail.to_string()));
        }

        Ok(Self { nodes })
    }

    /// Render the template with the given named fields.
    pub fn execute(&self, fields: &[(&str, &[u8])]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        for node in &self.nodes {
            match node {
                Node::Text(text) => output.extend_from_slice(text.as_bytes()),
                Node::Field(name) => {
                    let value = fields
                        .iter()
                        .find(|(key, _)| key == name)
                        .map(|(_, value)| *value)
                        .ok_or_else(|| Error::Template {
                            message: format!("can't evaluate field {}", name),
                            variable: Some(name.clone()),
                        })?;
                    output.extend_from_slice(value);
                }
            }
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[(&str, &[u8])] = &[("Script", b"select 1;"), ("Sha", b"abc123")];

    fn render(source: &str) -> Result<String> {
        let output = Template::parse(source)?.execute(FIELDS)?;
        Ok(String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(render("no actions here").unwrap(), "no actions here");
        assert_eq!(render("").unwrap(), "");
    }

    #[test]
    fn test_fields_are_substituted() {
        assert_eq!(
            render("-- {{.Sha}}\n{{ .Script }}").unwrap(),
            "-- abc123\nselect 1;"
        );
    }

    #[test]
    fn test_field_used_twice() {
        assert_eq!(render("{{.Sha}}/{{.Sha}}").unwrap(), "abc123/abc123");
    }

    #[test]
    fn test_trim_markers() {
        assert_eq!(
            render("BEGIN;\n\n   {{- .Script -}}   \n\nCOMMIT;").unwrap(),
            "BEGIN;select 1;COMMIT;"
        );
        assert_eq!(render("a  {{- .Sha }}  b").unwrap(), "aabc123  b");
    }

    #[test]
    fn test_comment_renders_nothing() {
        assert_eq!(render("x{{/* note */}}y").unwrap(), "xy");
        assert_eq!(render("x {{- /* note */ -}} y").unwrap(), "xy");
    }

    #[test]
    fn test_unclosed_action_is_parse_error() {
        let err = render("BEGIN; {{ .Script").unwrap_err();
        assert!(err.to_string().contains("unclosed action"));
        let err = render("{{ {{ .Sha }}").unwrap_err();
        assert!(err.to_string().contains("Template processing error"));
    }

    #[test]
    fn test_empty_action_is_parse_error() {
        let err = render("{{ }}").unwrap_err();
        assert!(err.to_string().contains("missing value for command"));
    }

    #[test]
    fn test_unsupported_action_is_parse_error() {
        let err = Template::parse("{{ range .Script }}").unwrap_err();
        assert!(err.to_string().contains("unsupported action"));
        let err = Template::parse("{{ . }}").unwrap_err();
        assert!(err.to_string().contains("unsupported action"));
    }

    #[test]
    fn test_unknown_field_fails_at_execution() {
        let template = Template::parse("{{ .Branch }}").unwrap();
        match template.execute(FIELDS).unwrap_err() {
            Error::Template { variable, .. } => assert_eq!(variable.as_deref(), Some("Branch")),
            other => panic!("Expected Template error, got {:?}", other),
        }
    }

    #[test]
    fn test_lone_closing_braces_are_text() {
        assert_eq!(render("}} {{.Sha}}").unwrap(), "}} abc123");
    }
}
