//! # Torquilla Library
//!
//! This library assembles the schema-migration scripts changed in a git
//! commit range into one ordered script. It is used by the `tq` command-line
//! tool but can be embedded in other release tooling.
//!
//! ## Quick Example
//!
//! ```
//! use torquilla::phases::render;
//! use torquilla::script::Script;
//!
//! let scripts = vec![
//!     Script::new("migrations/001.sql", 100, b"CREATE TABLE a ();".to_vec()),
//!     Script::new("migrations/002.sql", 200, b"CREATE TABLE b ();".to_vec()),
//! ];
//! let body = render::assemble(&scripts, "deadbeef", Some("-- v%s"));
//! assert!(body.starts_with(b"-- deadbeef:migrations/001.sql\n\nCREATE TABLE a ();"));
//! assert!(body.ends_with(b"-- update version number\n\n-- vdeadbeef"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: The `Config` struct and its YAML/TOML file
//!   format, including the "migrations" and "definitions" categories.
//! - **Repository access (`repository`, `git`)**: The `GitOperations` trait
//!   and its implementation on top of the system `git` binary.
//! - **Scripts (`script`)**: Loaded files and the ordering manifest.
//! - **Phases (`phases`)**: The six pipeline stages.
//! - **Templates (`template`)**: The output template language.
//!
//! ## Execution Flow
//!
//! [`phases::orchestrator::execute`] runs:
//!
//! 1.  **Resolve**: Turn the revision arguments into commit ids.
//! 2.  **Detect**: List added (migrations) and added-or-modified
//!     (definitions) files in the range.
//! 3.  **Load**: Read each file at the end commit with its last commit time.
//! 4.  **Reconcile**: Keep only manifest-listed files, if a manifest is set.
//! 5.  **Order**: Sort by manifest position or by commit time.
//! 6.  **Render**: Concatenate, append the version entry, apply the template.

pub mod config;
pub mod defaults;
pub mod error;
pub mod git;
pub mod output;
pub mod phases;
pub mod repository;
pub mod script;
pub mod template;
