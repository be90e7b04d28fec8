//! Environment discovery and reverse lookups over a project tree

use super::support::Project;
use jsonnet_deps::core::{find_environments, find_importers};
use jsonnet_deps::{DepsError, Settings};

fn monorepo() -> Project {
    Project::new(&[
        ("jsonnetfile.json", "{}"),
        ("lib/base.libsonnet", "{ base: true }"),
        ("lib/monitoring.libsonnet", "(import 'base.libsonnet') + { alerts: [] }"),
        ("lib/templates/dashboard.json", "{\"title\": \"x\"}"),
        ("environments/prod/main.jsonnet", "import 'monitoring.libsonnet'"),
        (
            "environments/staging/main.jsonnet",
            "(import 'base.libsonnet') + { dash: importstr 'templates/dashboard.json' }",
        ),
        ("environments/dev/main.jsonnet", "{}"),
        ("vendor/github.com/x/y/main.jsonnet", "{}"),
        ("node_modules/pkg/main.jsonnet", "{}"),
    ])
}

#[test]
fn test_find_environments() {
    let project = monorepo();
    let envs = find_environments(&project.root, &Settings::default()).unwrap();
    assert_eq!(
        envs,
        vec![
            project.path("environments/dev"),
            project.path("environments/prod"),
            project.path("environments/staging"),
        ]
    );
}

#[test]
fn test_custom_exclude_patterns() {
    let project = monorepo();
    let settings = Settings {
        exclude_patterns: vec!["vendor".to_string(), "node_modules".to_string(), "st*".to_string()],
        ..Settings::default()
    };
    let envs = find_environments(&project.root, &settings).unwrap();
    assert_eq!(
        envs,
        vec![project.path("environments/dev"), project.path("environments/prod")]
    );
}

#[test]
fn test_transitive_importers() {
    let project = monorepo();
    let importers = find_importers(
        &project.root,
        &[project.path("lib/base.libsonnet")],
        &Settings::default(),
    )
    .unwrap();
    assert_eq!(importers, vec!["environments/prod", "environments/staging"]);
}

#[test]
fn test_text_import_importers() {
    let project = monorepo();
    let importers = find_importers(
        &project.root,
        &[project.path("lib/templates/dashboard.json")],
        &Settings::default(),
    )
    .unwrap();
    assert_eq!(importers, vec!["environments/staging"]);
}

#[test]
fn test_search_root_narrows_results() {
    let project = monorepo();
    let importers = find_importers(
        &project.path("environments/prod"),
        &[project.path("lib/base.libsonnet")],
        &Settings::default(),
    )
    .unwrap();
    assert_eq!(importers, vec!["."]);
}

#[test]
fn test_several_files_union() {
    let project = monorepo();
    let importers = find_importers(
        &project.root,
        &[
            project.path("lib/monitoring.libsonnet"),
            project.path("environments/dev/main.jsonnet"),
        ],
        &Settings {
            parallel: false,
            ..Settings::default()
        },
    )
    .unwrap();
    assert_eq!(importers, vec!["environments/dev", "environments/prod"]);
}

#[test]
fn test_broken_environment_fails_lookup() {
    let project = monorepo();
    project.write("environments/broken/main.jsonnet", "import 'nowhere.libsonnet'");
    let err = find_importers(
        &project.root,
        &[project.path("lib/base.libsonnet")],
        &Settings::default(),
    )
    .unwrap_err();
    assert!(matches!(err, DepsError::Resolution { .. }));
}
