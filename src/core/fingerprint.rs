//! Content fingerprints over a snippet and its transitive imports
//!
//! A fingerprint changes whenever the snippet or any file it transitively
//! imports changes, and stays put otherwise. It is meant as a cache key for
//! evaluation results. Per-file digests come from a shared [`FileHashCache`];
//! see its docs for the staleness caveat that comes with that.

use crate::core::cache::FileHashCache;
use crate::core::import_walker::{ImportResolver, ImportWalker};
use crate::core::parallel::process_with_errors;
use crate::error::{DepsError, Result};
use crate::models::environment::Environment;
use crate::parsers::{JsonnetParser, SourceParser};
use crate::utils::fs::{self, FileSystem, OsFileSystem};
use crate::utils::path_resolver::SearchPathResolver;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// URL-safe token identifying a snippet and the content of its whole closure
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Computes fingerprints, sharing a digest cache across calls and threads
pub struct Fingerprinter<R = SearchPathResolver, P = JsonnetParser, F = OsFileSystem> {
    resolver: R,
    parser: P,
    fs: F,
    cache: Arc<FileHashCache>,
}

impl Fingerprinter {
    /// Fingerprinter resolving imports along an environment's search paths
    pub fn for_environment(env: &Environment, cache: Arc<FileHashCache>) -> Self {
        Self::with_parts(
            SearchPathResolver::for_environment(env),
            JsonnetParser::new(),
            OsFileSystem,
            cache,
        )
    }
}

impl<R, P, F> Fingerprinter<R, P, F>
where
    R: ImportResolver,
    P: SourceParser,
    F: FileSystem,
{
    pub fn with_parts(resolver: R, parser: P, fs: F, cache: Arc<FileHashCache>) -> Self {
        Self {
            resolver,
            parser,
            fs,
            cache,
        }
    }

    pub fn cache(&self) -> &Arc<FileHashCache> {
        &self.cache
    }

    /// Fingerprint `content`, which is treated as the source of `snippet_path`.
    ///
    /// Imports in `content` resolve relative to `snippet_path`; the file at that
    /// path is not read.
    pub fn fingerprint(&self, snippet_path: &Path, content: &[u8]) -> Result<Fingerprint> {
        let current = fs::absolute(snippet_path).map_err(DepsError::io_error)?;
        let tree = self.parser.parse(&current, content)?;

        let mut deps: Vec<PathBuf> = ImportWalker::new(&self.resolver)
            .collect(&tree, &current)?
            .into_iter()
            .collect();
        deps.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));

        let mut hasher = Sha256::new();
        hasher.update(content);
        for dep in &deps {
            hasher.update(self.cache.digest(&self.fs, dep)?);
        }

        let fingerprint = Fingerprint(hex::encode(hasher.finalize()));
        debug!(
            snippet = %current.display(),
            dependencies = deps.len(),
            %fingerprint,
            "computed fingerprint"
        );
        Ok(fingerprint)
    }

    /// Read `path` and fingerprint its content
    pub fn fingerprint_file(&self, path: &Path) -> Result<Fingerprint> {
        let content = self
            .fs
            .read_file(path)
            .map_err(|e| DepsError::read_error(path, e))?;
        self.fingerprint(path, &content)
    }

    /// Fingerprint several files, optionally on the rayon pool.
    ///
    /// Results come back in input order. Any failure fails the whole batch.
    pub fn fingerprint_files(&self, paths: &[PathBuf], parallel: bool) -> Result<Vec<(PathBuf, Fingerprint)>> {
        process_with_errors(paths.iter().collect(), parallel, |path: &PathBuf| {
            Ok((path.clone(), self.fingerprint_file(path)?))
        })
    }
}
