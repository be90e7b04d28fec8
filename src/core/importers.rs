//! Environment discovery and reverse dependency lookup

use crate::core::materializer::DependencyMaterializer;
use crate::core::parallel::process_with_errors;
use crate::error::{DepsError, Result};
use crate::models::config::Settings;
use crate::utils::fs;
use crate::utils::path_resolver::ProjectLocator;
use glob::Pattern;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Compile exclude patterns into glob patterns
pub fn compile_exclude_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| Pattern::new(p).map_err(DepsError::from))
        .collect()
}

fn is_excluded(entry: &DirEntry, patterns: &[Pattern]) -> bool {
    // The walk root itself is never skipped
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    patterns.iter().any(|pattern| pattern.matches(&name))
}

/// Every directory under `dir` (inclusive) that directly contains an entrypoint, sorted
pub fn find_environments(dir: &Path, settings: &Settings) -> Result<Vec<PathBuf>> {
    let root = std::fs::canonicalize(dir).map_err(|source| DepsError::RootUnresolvable {
        path: dir.to_path_buf(),
        source,
    })?;
    if !root.is_dir() {
        return Err(DepsError::InvalidPath { path: root });
    }

    let excludes = compile_exclude_patterns(&settings.exclude_patterns)?;
    let locator = ProjectLocator::from_settings(settings);

    let mut environments = Vec::new();
    let walker = WalkDir::new(&root)
        .follow_links(settings.follow_links)
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry, &excludes));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_dir() && locator.is_environment(entry.path()) {
            environments.push(entry.into_path());
        }
    }
    environments.sort();

    debug!(root = %root.display(), found = environments.len(), "discovered environments");
    Ok(environments)
}

/// Environments under `search_root` whose closure contains any of `files`.
///
/// Results are relative to `search_root`, `/`-separated and sorted. A file that
/// does not exist is an error, as is any environment whose closure cannot be
/// computed.
pub fn find_importers(search_root: &Path, files: &[PathBuf], settings: &Settings) -> Result<Vec<String>> {
    let root = std::fs::canonicalize(search_root).map_err(|source| DepsError::RootUnresolvable {
        path: search_root.to_path_buf(),
        source,
    })?;

    let mut targets = HashSet::with_capacity(files.len());
    for file in files {
        let canonical = std::fs::canonicalize(file).map_err(|source| DepsError::Canonicalize {
            path: file.clone(),
            source,
        })?;
        targets.insert(canonical);
    }

    let environments = find_environments(&root, settings)?;
    let materializer = DependencyMaterializer::new(ProjectLocator::from_settings(settings));

    let matched = process_with_errors(environments, settings.parallel, |env: PathBuf| {
        let closure = materializer.closure(&env)?;
        let imports = closure.files.iter().any(|file| targets.contains(file));
        Ok(imports.then_some(env))
    })?;

    let mut importers: Vec<String> = matched
        .into_iter()
        .flatten()
        .map(|env| fs::to_slash(&fs::relative_to(&env, &root)))
        .collect();
    importers.sort();

    info!(files = files.len(), importers = importers.len(), "resolved importers");
    Ok(importers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as stdfs;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        stdfs::create_dir_all(path.parent().unwrap()).unwrap();
        stdfs::write(path, content).unwrap();
    }

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "jsonnetfile.json", "{}");
        write(root, "lib/shared.libsonnet", "{ shared: true }");
        write(root, "lib/other.libsonnet", "{}");
        write(root, "environments/prod/main.jsonnet", "import 'shared.libsonnet'");
        write(root, "environments/dev/main.jsonnet", "(import 'other.libsonnet') + { dev: true }");
        write(root, "vendor/pkg/main.jsonnet", "{}");
        dir
    }

    #[test]
    fn test_find_environments_skips_excluded_dirs() {
        let dir = project();
        let root = stdfs::canonicalize(dir.path()).unwrap();
        let envs = find_environments(&root, &Settings::default()).unwrap();
        assert_eq!(
            envs,
            vec![root.join("environments/dev"), root.join("environments/prod")]
        );
    }

    #[test]
    fn test_find_environments_without_excludes() {
        let dir = project();
        let root = stdfs::canonicalize(dir.path()).unwrap();
        let settings = Settings {
            exclude_patterns: Vec::new(),
            ..Settings::default()
        };
        let envs = find_environments(&root, &settings).unwrap();
        assert_eq!(envs.len(), 3);
        assert!(envs.contains(&root.join("vendor/pkg")));
    }

    #[test]
    fn test_invalid_exclude_pattern() {
        let dir = project();
        let settings = Settings {
            exclude_patterns: vec!["[".to_string()],
            ..Settings::default()
        };
        let err = find_environments(dir.path(), &settings).unwrap_err();
        assert!(matches!(err, DepsError::GlobPattern { .. }));
    }

    #[test]
    fn test_find_importers() {
        let dir = project();
        let shared = dir.path().join("lib/shared.libsonnet");

        for parallel in [true, false] {
            let settings = Settings {
                parallel,
                ..Settings::default()
            };
            let importers = find_importers(dir.path(), &[shared.clone()], &settings).unwrap();
            assert_eq!(importers, vec!["environments/prod"]);
        }
    }

    #[test]
    fn test_entrypoint_imports_itself() {
        let dir = project();
        let entry = dir.path().join("environments/dev/main.jsonnet");
        let importers = find_importers(dir.path(), &[entry], &Settings::default()).unwrap();
        assert_eq!(importers, vec!["environments/dev"]);
    }

    #[test]
    fn test_unused_file_has_no_importers() {
        let dir = project();
        write(dir.path(), "lib/unused.libsonnet", "{}");
        let importers = find_importers(
            dir.path(),
            &[dir.path().join("lib/unused.libsonnet")],
            &Settings::default(),
        )
        .unwrap();
        assert!(importers.is_empty());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = project();
        let err = find_importers(
            dir.path(),
            &[dir.path().join("lib/missing.libsonnet")],
            &Settings::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DepsError::Canonicalize { .. }));
    }
}
