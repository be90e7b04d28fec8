//! Dependency list materialization against real directory trees

use super::support::{chain, materializer, Project};
use jsonnet_deps::{transitive_imports, DepsError};

#[test]
fn test_chain_gives_sorted_relative_list() {
    let project = chain();
    let imports = materializer().transitive_imports(&project.root).unwrap();
    assert_eq!(imports, vec!["lib/a.t", "lib/b.t", "main.t"]);
}

#[test]
fn test_each_reachable_file_listed_once() {
    let project = Project::new(&[
        ("main.t", "[import 'a.t', import 'b.t', import 'a.t']"),
        ("a.t", "import 'shared.t'"),
        ("b.t", "import 'shared.t'"),
        ("shared.t", "{}"),
        ("unrelated.t", "{}"),
    ]);
    let imports = materializer().transitive_imports(&project.root).unwrap();
    assert_eq!(imports, vec!["a.t", "b.t", "main.t", "shared.t"]);
}

#[test]
fn test_cycles_terminate() {
    let project = Project::new(&[
        ("main.t", "import 'a.t'"),
        ("a.t", "import 'b.t'"),
        ("b.t", "import 'a.t'"),
    ]);
    let imports = materializer().transitive_imports(&project.root).unwrap();
    assert_eq!(imports, vec!["a.t", "b.t", "main.t"]);
}

#[test]
fn test_text_imports_are_never_parsed() {
    // The template would fail to parse, and its import would fail to resolve
    let project = Project::new(&[
        ("main.t", "{ tpl: importstr 'tpl.t', bin: importbin 'blob.bin' }"),
        ("tpl.t", "{ broken: import 'missing.t'"),
        ("blob.bin", "\u{0}\u{1}"),
    ]);
    let imports = materializer().transitive_imports(&project.root).unwrap();
    assert_eq!(imports, vec!["blob.bin", "main.t", "tpl.t"]);
}

#[test]
fn test_imports_inside_strings_and_comments_are_ignored() {
    let project = Project::new(&[(
        "main.t",
        "// import 'nope.t'\n{ s: \"import 'nope.t'\", /* import 'nope.t' */ }",
    )]);
    let imports = materializer().transitive_imports(&project.root).unwrap();
    assert_eq!(imports, vec!["main.t"]);
}

#[test]
fn test_missing_import_names_both_files() {
    let project = Project::new(&[
        ("main.t", "import 'lib/a.t'"),
        ("lib/a.t", "import 'missing.t'"),
    ]);
    let err = materializer().transitive_imports(&project.root).unwrap_err();
    match err {
        DepsError::Resolution {
            specifier, importer, ..
        } => {
            assert_eq!(specifier, "missing.t");
            assert_eq!(importer, project.path("lib/a.t"));
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_file_imported_as_text_and_module_is_followed() {
    let project = Project::new(&[
        ("main.t", "{ raw: importstr 'x.t', code: import 'x.t' }"),
        ("x.t", "import 'y.t'"),
        ("y.t", "{}"),
    ]);
    let imports = materializer().transitive_imports(&project.root).unwrap();
    assert_eq!(imports, vec!["main.t", "x.t", "y.t"]);
}

#[test]
fn test_parse_error_anywhere_fails_the_call() {
    let project = Project::new(&[
        ("main.t", "import 'lib/a.t'"),
        ("lib/a.t", "import 'b.t'"),
        ("lib/b.t", "{ a: [1, 2 }"),
    ]);
    let err = materializer().transitive_imports(&project.root).unwrap_err();
    match err {
        DepsError::Import {
            specifier,
            importer,
            source,
        } => {
            assert_eq!(specifier, "b.t");
            assert_eq!(importer, project.path("lib/a.t"));
            assert!(matches!(*source, DepsError::Parse { .. }));
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_project_layout_search_paths() {
    let project = Project::new(&[
        ("jsonnetfile.json", "{}"),
        ("lib/k.libsonnet", "import 'ksonnet-util/util.libsonnet'"),
        ("vendor/ksonnet-util/util.libsonnet", "{}"),
        ("environments/prod/main.jsonnet", "import 'k.libsonnet'"),
    ]);
    let imports = transitive_imports(project.path("environments/prod")).unwrap();
    assert_eq!(
        imports,
        vec![
            "environments/prod/main.jsonnet",
            "lib/k.libsonnet",
            "vendor/ksonnet-util/util.libsonnet",
        ]
    );
}

#[test]
fn test_environment_vendor_shadows_project_vendor() {
    let project = Project::new(&[
        ("jsonnetfile.json", "{}"),
        ("vendor/pkg.libsonnet", "{ project: true }"),
        ("environments/dev/vendor/pkg.libsonnet", "{ env: true }"),
        ("environments/dev/main.jsonnet", "import 'pkg.libsonnet'"),
    ]);
    let imports = transitive_imports(project.path("environments/dev")).unwrap();
    assert_eq!(
        imports,
        vec![
            "environments/dev/main.jsonnet",
            "environments/dev/vendor/pkg.libsonnet",
        ]
    );
}

#[test]
fn test_missing_entrypoint() {
    let project = Project::new(&[("jsonnetfile.json", "{}"), ("lib/a.libsonnet", "{}")]);
    let err = transitive_imports(project.path("lib")).unwrap_err();
    assert!(matches!(err, DepsError::EntrypointNotFound { .. }));
}
