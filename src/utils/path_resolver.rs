//! Import path resolution and environment location
//!
//! Resolution follows the conventional Jsonnet project layout: a specifier is
//! looked up next to the importing file first, then along the environment's
//! search paths. The environment itself is found by walking up from a directory
//! to the nearest entrypoint, and from there to the nearest project root marker.

use crate::core::import_walker::ImportResolver;
use crate::error::{DepsError, Result};
use crate::models::ast::SyntaxNode;
use crate::models::config::Settings;
use crate::models::environment::Environment;
use crate::parsers::{JsonnetParser, SourceParser};
use crate::utils::fs::{self, FileSystem, OsFileSystem};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolves specifiers against the importing file's directory and a list of search paths
pub struct SearchPathResolver<P = JsonnetParser, F = OsFileSystem> {
    search_paths: Vec<PathBuf>,
    parser: P,
    fs: F,
}

impl SearchPathResolver {
    /// Resolver over the real filesystem using the Jsonnet parser
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self::with_parts(search_paths, JsonnetParser::new(), OsFileSystem)
    }

    /// Resolver for a located environment
    pub fn for_environment(env: &Environment) -> Self {
        Self::new(env.search_paths.clone())
    }
}

impl<P: SourceParser, F: FileSystem> SearchPathResolver<P, F> {
    pub fn with_parts(search_paths: Vec<PathBuf>, parser: P, fs: F) -> Self {
        Self {
            search_paths,
            parser,
            fs,
        }
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Candidate locations for `specifier`, in lookup order
    fn candidates(&self, current: &Path, specifier: &str) -> Vec<PathBuf> {
        let spec = Path::new(specifier);
        if spec.is_absolute() {
            return vec![fs::normalize(spec)];
        }

        let mut candidates = Vec::with_capacity(self.search_paths.len() + 1);
        if let Some(dir) = current.parent() {
            candidates.push(fs::normalize(&dir.join(spec)));
        }
        for search_path in &self.search_paths {
            let candidate = fs::normalize(&search_path.join(spec));
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
        candidates
    }

    /// Locate the file a specifier refers to
    pub fn find(&self, current: &Path, specifier: &str) -> Result<PathBuf> {
        if specifier.is_empty() {
            return Err(DepsError::resolution_error(specifier, current, "empty import path"));
        }

        let candidates = self.candidates(current, specifier);
        if let Some(found) = candidates.iter().find(|c| self.fs.is_file(c)) {
            return Ok(found.clone());
        }

        let tried = candidates
            .iter()
            .map(|c| c.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(DepsError::resolution_error(
            specifier,
            current,
            format!("file not found (tried {})", tried),
        ))
    }
}

impl<P: SourceParser, F: FileSystem> ImportResolver for SearchPathResolver<P, F> {
    fn resolve_module(&self, current: &Path, specifier: &str) -> Result<PathBuf> {
        self.find(current, specifier)
    }

    fn load_module(&self, path: &Path) -> Result<SyntaxNode> {
        let source = self.fs.read_file(path).map_err(|e| DepsError::read_error(path, e))?;
        self.parser.parse(path, &source)
    }
}

/// Finds the entrypoint, project root and search paths of an environment
pub trait EnvironmentLocator: Send + Sync {
    /// Locate the environment that `path` (a directory or an entrypoint file) belongs to
    fn locate(&self, path: &Path) -> Result<Environment>;
}

/// Locator for the conventional layout: `main.jsonnet` per environment,
/// `jsonnetfile.json` at the project root, `lib/` and `vendor/` beside it
#[derive(Debug, Clone)]
pub struct ProjectLocator<F = OsFileSystem> {
    entrypoint: String,
    root_markers: Vec<String>,
    extra_search_paths: Vec<PathBuf>,
    fs: F,
}

impl ProjectLocator {
    pub fn new(entrypoint: impl Into<String>, root_markers: Vec<String>) -> Self {
        Self::with_fs(entrypoint, root_markers, OsFileSystem)
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.entrypoint.clone(), settings.root_markers.clone())
            .with_search_paths(settings.search_paths.clone())
    }
}

impl<F: FileSystem> ProjectLocator<F> {
    /// Locator that checks for entrypoints and markers through `fs`
    pub fn with_fs(entrypoint: impl Into<String>, root_markers: Vec<String>, fs: F) -> Self {
        Self {
            entrypoint: entrypoint.into(),
            root_markers,
            extra_search_paths: Vec::new(),
            fs,
        }
    }

    /// Append search paths consulted after the project's own
    pub fn with_search_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.extra_search_paths = paths;
        self
    }

    pub fn entrypoint(&self) -> &str {
        &self.entrypoint
    }

    /// Whether `dir` directly contains an entrypoint
    pub fn is_environment(&self, dir: &Path) -> bool {
        self.fs.is_file(&dir.join(&self.entrypoint))
    }

    fn find_upwards(start: &Path, found: impl Fn(&Path) -> bool) -> Option<PathBuf> {
        start.ancestors().find(|dir| found(*dir)).map(Path::to_path_buf)
    }
}

impl Default for ProjectLocator {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl<F: FileSystem> EnvironmentLocator for ProjectLocator<F> {
    fn locate(&self, path: &Path) -> Result<Environment> {
        let path = fs::absolute(path).map_err(|e| DepsError::RootUnresolvable {
            path: path.to_path_buf(),
            source: e,
        })?;

        let (start, entry_name) = if self.fs.is_file(&path) {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.entrypoint.clone());
            (path.parent().unwrap_or(&path).to_path_buf(), name)
        } else {
            (path.clone(), self.entrypoint.clone())
        };

        let base_dir = Self::find_upwards(&start, |dir| self.fs.is_file(&dir.join(&entry_name))).ok_or_else(|| {
            DepsError::EntrypointNotFound {
                path: path.clone(),
                entrypoint: entry_name.clone(),
            }
        })?;

        let root_dir = Self::find_upwards(&base_dir, |dir| {
            self.root_markers.iter().any(|marker| self.fs.exists(&dir.join(marker)))
        })
        .unwrap_or_else(|| base_dir.clone());

        let mut search_paths = vec![
            base_dir.clone(),
            root_dir.join("lib"),
            base_dir.join("vendor"),
            root_dir.join("vendor"),
        ];
        for extra in &self.extra_search_paths {
            search_paths.push(fs::absolute(extra)?);
        }
        search_paths.dedup();

        debug!(
            base = %base_dir.display(),
            root = %root_dir.display(),
            "located environment"
        );

        Ok(Environment {
            entrypoint: base_dir.join(&entry_name),
            base_dir,
            root_dir,
            search_paths,
        })
    }
}
