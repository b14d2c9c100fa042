//! Orchestrator for the complete assembly
//!
//! This module coordinates all phases to provide a clean API for one run.
//! Everything that can fail without touching the repository (argument count,
//! manifest file, output template) is checked before the first git query.

use log::debug;

use super::reconcile::Warning;
use super::{phase1, phase2, phase3, phase4, phase5, phase6, RevisionRange};
use crate::config::Config;
use crate::error::Result;
use crate::repository::GitOperations;
use crate::script::{Manifest, Script};
use crate::template::Template;

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct Assembly {
    /// The resolved commit range
    pub range: RevisionRange,
    /// Scripts in final order
    pub scripts: Vec<Script>,
    /// Bytes to write to stdout
    pub output: Vec<u8>,
    /// Non-fatal findings; the caller decides whether to show them
    pub warnings: Vec<Warning>,
}

/// Execute the complete assembly (Phases 1-6)
///
/// 1. Resolve the commit range
/// 2. Detect changed files per category
/// 3. Load content and timestamps
/// 4. Reconcile against the manifest, if configured
/// 5. Sort by manifest position or by timestamp
/// 6. Render the output, or list names in name-only mode
pub fn execute(
    config: &Config,
    git: &dyn GitOperations,
    revisions: &[String],
) -> Result<Assembly> {
    phase1::check_arity(revisions)?;

    let manifest = config
        .manifest
        .as_deref()
        .map(Manifest::from_file)
        .transpose()?;
    let template = config
        .template
        .as_deref()
        .map(Template::parse)
        .transpose()?;

    // Phase 1: Reference Resolution
    let range = phase1::execute(git, revisions)?;

    // Phase 2: Change Detection
    let changed = phase2::execute(git, &range, &config.categories(), &config.extensions)?;

    // Phase 3: Script Loading
    let scripts = phase3::execute(git, &changed, &range)?;

    // Phase 4: Manifest Reconciliation
    let reconciled = phase4::execute(scripts, manifest.as_ref());
    let mut scripts = reconciled.scripts;

    // Phase 5: Ordering
    let strategy = phase5::SortStrategy::select(manifest.is_some());
    phase5::execute(&mut scripts, strategy);

    // Phase 6: Rendering
    let output = if config.name_only {
        phase6::name_list(&scripts).into_bytes()
    } else {
        phase6::execute(
            &scripts,
            &range.end,
            config.version_tmpl.as_deref(),
            template.as_ref(),
        )?
    };

    debug!(
        "assembled {} script(s) with {} warning(s)",
        scripts.len(),
        reconciled.warnings.len()
    );

    Ok(Assembly {
        range,
        scripts,
        output,
        warnings: reconciled.warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiffFilter;
    use crate::error::Error;
    use crate::repository::mock::MockGitOperations;
    use std::fs;
    use tempfile::TempDir;

    fn revisions(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn two_scripts() -> MockGitOperations {
        MockGitOperations::new()
            .with_ref("v1", "1111")
            .with_ref("v2", "deadbeef")
            .with_added("b.sql", "create b;", 200)
            .with_added("a.sql", "create a;", 100)
    }

    fn sql_config() -> Config {
        Config {
            migrations: vec!["".to_string()],
            extensions: vec![".sql".to_string()],
            ..Config::default()
        }
    }

    fn output_text(assembly: &Assembly) -> String {
        String::from_utf8(assembly.output.clone()).unwrap()
    }

    fn write_manifest(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("manifest.txt");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_chronological_run() {
        let git = two_scripts();
        let assembly = execute(&sql_config(), &git, &revisions(&["v1", "v2"])).unwrap();
        assert_eq!(
            output_text(&assembly),
            "-- deadbeef:a.sql\n\ncreate a;\n\n-- deadbeef:b.sql\n\ncreate b;\n"
        );
        assert!(assembly.warnings.is_empty());
    }

    #[test]
    fn test_manifest_run_ignores_timestamps() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            manifest: Some(write_manifest(&temp, "b.sql\na.sql\n")),
            ..sql_config()
        };
        let assembly = execute(&config, &two_scripts(), &revisions(&["v1", "v2"])).unwrap();
        let names: Vec<&str> = assembly.scripts.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["b.sql", "a.sql"]);
    }

    #[test]
    fn test_manifest_run_reports_unlisted_file() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            manifest: Some(write_manifest(&temp, "a.sql\n")),
            ..sql_config()
        };
        let git = two_scripts().with_added("c.sql", "create c;", 50);
        let assembly = execute(&config, &git, &revisions(&["v1", "v2"])).unwrap();
        assert!(!output_text(&assembly).contains("c.sql"));
        assert!(!output_text(&assembly).contains("b.sql"));
        let unmatched: Vec<&str> = assembly.warnings.iter().map(|w| w.name()).collect();
        assert_eq!(unmatched, vec!["b.sql", "c.sql"]);
    }

    #[test]
    fn test_version_entry_is_last() {
        let config = Config {
            version_tmpl: Some("-- v%s".to_string()),
            ..sql_config()
        };
        let assembly = execute(&config, &two_scripts(), &revisions(&["v1", "v2"])).unwrap();
        assert!(output_text(&assembly).ends_with("-- update version number\n\n-- vdeadbeef\n"));
    }

    #[test]
    fn test_name_only_lists_sorted_names() {
        let config = Config {
            name_only: true,
            template: Some("{{ .Script }}".to_string()),
            ..sql_config()
        };
        let assembly = execute(&config, &two_scripts(), &revisions(&["v1", "v2"])).unwrap();
        assert_eq!(output_text(&assembly), "a.sql\nb.sql\n");
    }

    #[test]
    fn test_template_wraps_output() {
        let config = Config {
            template: Some("BEGIN; -- {{ .Sha }}\n{{ .Script }}\nCOMMIT;\n".to_string()),
            ..sql_config()
        };
        let assembly = execute(&config, &two_scripts(), &revisions(&["v1", "v2"])).unwrap();
        assert!(output_text(&assembly).starts_with("BEGIN; -- deadbeef\n-- deadbeef:a.sql"));
        assert!(output_text(&assembly).ends_with("create b;\nCOMMIT;\n"));
    }

    #[test]
    fn test_bad_template_fails_before_git() {
        let git = two_scripts();
        let config = Config {
            template: Some("{{ .Script".to_string()),
            ..sql_config()
        };
        let err = execute(&config, &git, &revisions(&["v1", "v2"])).unwrap_err();
        assert!(matches!(err, Error::Template { .. }));
        assert!(git.calls().is_empty());
    }

    #[test]
    fn test_missing_manifest_fails_before_git() {
        let temp = TempDir::new().unwrap();
        let git = two_scripts();
        let config = Config {
            manifest: Some(temp.path().join("missing.txt")),
            ..sql_config()
        };
        let err = execute(&config, &git, &revisions(&["v1", "v2"])).unwrap_err();
        assert!(matches!(err, Error::Manifest { .. }));
        assert!(git.calls().is_empty());
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            manifest: Some(write_manifest(&temp, "a.sql\nb.sql\n")),
            version_tmpl: Some("-- v%s".to_string()),
            ..sql_config()
        };
        let git = two_scripts();
        let first = execute(&config, &git, &revisions(&["v1", "v2"])).unwrap();
        let second = execute(&config, &git, &revisions(&["v1", "v2"])).unwrap();
        assert_eq!(first.output, second.output);
    }

    #[test]
    fn test_definitions_pick_up_modified_files() {
        let git = MockGitOperations::new()
            .with_ref("v1", "1111")
            .with_head("2222")
            .with_change(DiffFilter::AddedOrModified, "views/v.sql")
            .with_file("views/v.sql", "create view v;", Some(10))
            .with_added("migrations/001.sql", "create t;", 20);
        let config = Config {
            migrations: vec!["migrations".to_string()],
            definitions: vec!["views".to_string()],
            ..Config::default()
        };
        let assembly = execute(&config, &git, &revisions(&["v1"])).unwrap();
        let names: Vec<&str> = assembly.scripts.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["views/v.sql", "migrations/001.sql"]);
        assert_eq!(assembly.range.end, "2222");
    }
}
