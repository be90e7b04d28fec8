//! Shared fixtures for the integration tests

use jsonnet_deps::{DependencyMaterializer, ProjectLocator};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A throwaway project directory. `root` is canonical so it compares equal to
/// the paths the library reports.
pub struct Project {
    _dir: TempDir,
    pub root: PathBuf,
}

impl Project {
    pub fn new(files: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().unwrap();
        let root = fs::canonicalize(dir.path()).unwrap();
        let project = Self { _dir: dir, root };
        for (rel, content) in files {
            project.write(rel, content);
        }
        project
    }

    pub fn write(&self, rel: &str, content: &str) {
        let path = self.root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }
}

/// `main.t` importing `lib/a.t`, which imports `lib/b.t`
pub fn chain() -> Project {
    Project::new(&[
        ("main.t", "import 'lib/a.t'"),
        ("lib/a.t", "import 'b.t'"),
        ("lib/b.t", "{}"),
    ])
}

/// Materializer for projects whose entrypoint is `main.t`
pub fn materializer() -> DependencyMaterializer {
    DependencyMaterializer::new(ProjectLocator::new(
        "main.t",
        vec!["jsonnetfile.json".to_string()],
    ))
}
