//! Dependency list materialization
//!
//! Turns an environment directory into the sorted list of every file its
//! entrypoint depends on, relative to the project root. The list is a pure
//! function of what is on disk, so it can be fed straight into a file watcher
//! or an external build cache.

use crate::core::import_walker::ImportWalker;
use crate::error::{DepsError, Result};
use crate::models::environment::Environment;
use crate::parsers::{JsonnetParser, SourceParser};
use crate::utils::fs::{self, FileSystem, OsFileSystem};
use crate::utils::path_resolver::{EnvironmentLocator, ProjectLocator, SearchPathResolver};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// An environment together with the canonical paths of everything it depends on
#[derive(Debug, Clone)]
pub struct EnvironmentClosure {
    pub environment: Environment,
    /// Canonical absolute paths, entrypoint included
    pub files: BTreeSet<PathBuf>,
}

impl EnvironmentClosure {
    /// Files relative to the project root with `/` separators, sorted and deduplicated
    pub fn relative_paths(&self) -> Vec<String> {
        self.files
            .iter()
            .map(|path| fs::to_slash(&fs::relative_to(path, &self.environment.root_dir)))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Computes the transitive imports of environments
pub struct DependencyMaterializer<L = ProjectLocator, P = JsonnetParser, F = OsFileSystem> {
    locator: L,
    parser: P,
    fs: F,
}

impl DependencyMaterializer {
    pub fn new(locator: ProjectLocator) -> Self {
        Self::with_parts(locator, JsonnetParser::new(), OsFileSystem)
    }
}

impl Default for DependencyMaterializer {
    fn default() -> Self {
        Self::new(ProjectLocator::default())
    }
}

impl<L, P, F> DependencyMaterializer<L, P, F>
where
    L: EnvironmentLocator,
    P: SourceParser + Clone,
    F: FileSystem + Clone,
{
    pub fn with_parts(locator: L, parser: P, fs: F) -> Self {
        Self { locator, parser, fs }
    }

    /// Every file the environment at `root` depends on, entrypoint included,
    /// relative to the project root
    pub fn transitive_imports(&self, root: &Path) -> Result<Vec<String>> {
        Ok(self.closure(root)?.relative_paths())
    }

    /// Locate the environment at `root` and collect the canonical paths of its closure
    pub fn closure(&self, root: &Path) -> Result<EnvironmentClosure> {
        let root_unresolvable = |source| DepsError::RootUnresolvable {
            path: root.to_path_buf(),
            source,
        };
        let absolute = fs::absolute(root).map_err(root_unresolvable)?;
        let canonical = self.fs.canonicalize(&absolute).map_err(root_unresolvable)?;

        let environment = self.locator.locate(&canonical)?;
        let entrypoint = &environment.entrypoint;

        let source = self
            .fs
            .read_file(entrypoint)
            .map_err(|e| DepsError::read_error(entrypoint, e))?;
        let tree = self.parser.parse(entrypoint, &source)?;

        let resolver = SearchPathResolver::with_parts(
            environment.search_paths.clone(),
            self.parser.clone(),
            self.fs.clone(),
        );
        let imports = ImportWalker::new(&resolver).collect(&tree, entrypoint)?;

        let mut files = BTreeSet::new();
        for path in imports.iter().chain(std::iter::once(entrypoint)) {
            let resolved = self
                .fs
                .canonicalize(path)
                .map_err(|source| DepsError::Canonicalize {
                    path: path.clone(),
                    source,
                })?;
            files.insert(resolved);
        }

        debug!(
            entrypoint = %entrypoint.display(),
            files = files.len(),
            "materialized transitive imports"
        );

        Ok(EnvironmentClosure { environment, files })
    }
}
