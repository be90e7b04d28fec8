//! Content fingerprints over real files

use super::support::{chain, Project};
use jsonnet_deps::{DepsError, FileHashCache, Fingerprinter, ProjectLocator, EnvironmentLocator};
use std::sync::Arc;

fn fingerprinter(project: &Project) -> Fingerprinter {
    let environment = ProjectLocator::new("main.t", vec!["jsonnetfile.json".to_string()])
        .locate(&project.root)
        .unwrap();
    Fingerprinter::for_environment(&environment, Arc::new(FileHashCache::new()))
}

#[test]
fn test_deterministic() {
    let project = chain();
    let main = project.path("main.t");

    let a = fingerprinter(&project).fingerprint(&main, b"import 'lib/a.t'").unwrap();
    let b = fingerprinter(&project).fingerprint(&main, b"import 'lib/a.t'").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.as_str().len(), 64);
    assert!(a.as_str().bytes().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_change_inside_closure_changes_token() {
    let project = chain();
    let main = project.path("main.t");
    let before = fingerprinter(&project).fingerprint(&main, b"import 'lib/a.t'").unwrap();

    // Fresh cache so the edit is observed
    project.write("lib/b.t", "{ changed: true }");
    let after = fingerprinter(&project).fingerprint(&main, b"import 'lib/a.t'").unwrap();

    assert_ne!(before, after);
}

#[test]
fn test_change_outside_closure_keeps_token() {
    let project = chain();
    project.write("lib/unrelated.t", "{}");
    let main = project.path("main.t");
    let before = fingerprinter(&project).fingerprint(&main, b"import 'lib/a.t'").unwrap();

    project.write("lib/unrelated.t", "{ changed: true }");
    let after = fingerprinter(&project).fingerprint(&main, b"import 'lib/a.t'").unwrap();

    assert_eq!(before, after);
}

#[test]
fn test_text_import_content_counts() {
    let project = Project::new(&[("main.t", "{}"), ("banner.txt", "v1")]);
    let main = project.path("main.t");
    let snippet = b"{ banner: importstr 'banner.txt' }";

    let before = fingerprinter(&project).fingerprint(&main, snippet).unwrap();
    project.write("banner.txt", "v2");
    let after = fingerprinter(&project).fingerprint(&main, snippet).unwrap();

    assert_ne!(before, after);
}

#[test]
fn test_shared_cache_serves_repeat_lookups() {
    let project = chain();
    let fingerprinter = fingerprinter(&project);
    let main = project.path("main.t");

    fingerprinter.fingerprint(&main, b"import 'lib/a.t'").unwrap();
    fingerprinter.fingerprint(&main, b"import 'lib/b.t'").unwrap();

    let stats = fingerprinter.cache().stats();
    assert_eq!(stats.entries, 2);
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.hits, 1);

    // The cache does not notice edits until it is cleared
    let stale = fingerprinter.fingerprint(&main, b"import 'lib/a.t'").unwrap();
    project.write("lib/b.t", "{ changed: true }");
    assert_eq!(fingerprinter.fingerprint(&main, b"import 'lib/a.t'").unwrap(), stale);

    fingerprinter.cache().clear();
    assert_ne!(fingerprinter.fingerprint(&main, b"import 'lib/a.t'").unwrap(), stale);
}

#[test]
fn test_fingerprint_file_matches_inline_content() {
    let project = chain();
    let fingerprinter = fingerprinter(&project);
    let main = project.path("main.t");

    let from_disk = fingerprinter.fingerprint_file(&main).unwrap();
    let inline = fingerprinter.fingerprint(&main, b"import 'lib/a.t'").unwrap();
    assert_eq!(from_disk, inline);
}

#[test]
fn test_unresolvable_import_fails() {
    let project = chain();
    let err = fingerprinter(&project)
        .fingerprint(&project.path("main.t"), b"import 'lib/missing.t'")
        .unwrap_err();
    assert!(matches!(err, DepsError::Resolution { .. }));
}

#[test]
fn test_batch_in_parallel() {
    let project = chain();
    let fingerprinter = fingerprinter(&project);
    let paths = vec![project.path("lib/a.t"), project.path("main.t"), project.path("lib/b.t")];

    let results = fingerprinter.fingerprint_files(&paths, true).unwrap();
    let expected: Vec<_> = paths
        .iter()
        .map(|p| fingerprinter.fingerprint_file(p).unwrap())
        .collect();

    assert_eq!(
        results.into_iter().map(|(_, fp)| fp).collect::<Vec<_>>(),
        expected
    );
}
