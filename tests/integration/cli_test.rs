//! End-to-end runs of the jsonnet-deps binary

use super::support::Project;
use std::path::Path;
use std::process::{Command, Output};

/// Run the binary inside `cwd`, isolated from the user's config files and environment
fn run(cwd: &Path, args: &[&str]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_jsonnet-deps"));
    command
        .args(args)
        .current_dir(cwd)
        .env("HOME", cwd)
        .env("XDG_CONFIG_HOME", cwd.join(".config"))
        .env_remove("RUST_LOG");
    for (key, _) in std::env::vars() {
        if key.starts_with("JSONNET_DEPS_") {
            command.env_remove(key);
        }
    }
    command.output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn project() -> Project {
    Project::new(&[
        ("jsonnetfile.json", "{}"),
        ("lib/k.libsonnet", "{ k: true }"),
        ("environments/prod/main.jsonnet", "import 'k.libsonnet'"),
        ("environments/dev/main.jsonnet", "{}"),
    ])
}

#[test]
fn test_imports_quiet_text() {
    let project = project();
    let output = run(&project.root, &["--quiet", "imports", "environments/prod"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "environments/prod/main.jsonnet\nlib/k.libsonnet\n");
}

#[test]
fn test_imports_json() {
    let project = project();
    let output = run(&project.root, &["imports", "environments/prod", "--output", "json"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(
        value["files"],
        serde_json::json!(["environments/prod/main.jsonnet", "lib/k.libsonnet"])
    );
}

#[test]
fn test_fingerprint_is_stable_across_runs() {
    let project = project();
    let args = ["-q", "fingerprint", "environments/prod/main.jsonnet"];

    let first = run(&project.root, &args);
    let second = run(&project.root, &args);
    assert!(first.status.success());
    assert_eq!(stdout(&first), stdout(&second));
    assert!(stdout(&first).ends_with("  environments/prod/main.jsonnet\n"));
}

#[test]
fn test_importers_and_environments() {
    let project = project();

    let importers = run(&project.root, &["-q", "importers", "lib/k.libsonnet"]);
    assert!(importers.status.success());
    assert_eq!(stdout(&importers), "environments/prod\n");

    let environments = run(&project.root, &["-q", "--no-parallel", "environments"]);
    assert!(environments.status.success());
    assert_eq!(stdout(&environments), "environments/dev\nenvironments/prod\n");
}

#[test]
fn test_config_file_in_cwd_is_used() {
    let project = project();
    project.write(".jsonnet-deps.toml", "output_format = \"json\"\n");

    let output = run(&project.root, &["environments"]);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(
        value["environments"],
        serde_json::json!(["environments/dev", "environments/prod"])
    );
}

#[test]
fn test_resolution_failure_exit_code() {
    let project = project();
    project.write("environments/prod/main.jsonnet", "import 'missing.libsonnet'");

    let output = run(&project.root, &["imports", "environments/prod"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing.libsonnet"));
}

#[test]
fn test_bad_config_exit_code() {
    let project = project();
    project.write(".jsonnet-deps.toml", "no_such_setting = 1\n");

    let output = run(&project.root, &["environments"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_init_writes_config() {
    let project = project();
    let output = run(&project.root, &["init"]);

    assert!(output.status.success());
    assert!(project.path(".jsonnet-deps.toml").is_file());

    // The written template loads cleanly
    let again = run(&project.root, &["-q", "environments"]);
    assert!(again.status.success());
}
