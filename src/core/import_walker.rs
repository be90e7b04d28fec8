//! Transitive import traversal
//!
//! The walker follows `import` edges into the imported file's tree and records
//! `importstr`/`importbin` targets without ever reading them. Every other node is
//! handled by recursing into its children, so the walker does not need to know
//! the full grammar.

use crate::error::{DepsError, Result};
use crate::models::ast::SyntaxNode;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Maps import specifiers to files
pub trait ImportResolver: Send + Sync {
    /// Locate the file a module import relative to `current` refers to
    fn resolve_module(&self, current: &Path, specifier: &str) -> Result<PathBuf>;

    /// Locate the file a text import relative to `current` refers to
    fn resolve_text(&self, current: &Path, specifier: &str) -> Result<PathBuf> {
        self.resolve_module(current, specifier)
    }

    /// Read and parse a file returned by [`resolve_module`](Self::resolve_module)
    fn load_module(&self, path: &Path) -> Result<SyntaxNode>;
}

/// Walks a syntax tree and collects every file it transitively imports
pub struct ImportWalker<'r, R: ImportResolver + ?Sized> {
    resolver: &'r R,
}

impl<'r, R: ImportResolver + ?Sized> ImportWalker<'r, R> {
    pub fn new(resolver: &'r R) -> Self {
        Self { resolver }
    }

    /// Collect the absolute paths reachable from `root` into `visited`.
    ///
    /// `current` is the file `root` was parsed from; relative specifiers are
    /// resolved against it. `visited` must belong to this call alone: any path
    /// already in it when the call starts is treated as done and not descended
    /// into, which is also what stops import cycles.
    ///
    /// Each module is loaded at most once per call. A file first reached as a
    /// text import is still walked when a module import reaches it later.
    ///
    /// On error the contents of `visited` are unspecified.
    pub fn walk(&self, root: &SyntaxNode, current: &Path, visited: &mut HashSet<PathBuf>) -> Result<()> {
        let mut loaded = visited.clone();
        self.walk_tree(root, current, visited, &mut loaded)
    }

    /// Walk from a fresh visited set and return it
    pub fn collect(&self, root: &SyntaxNode, current: &Path) -> Result<HashSet<PathBuf>> {
        let mut visited = HashSet::new();
        self.walk(root, current, &mut visited)?;
        Ok(visited)
    }

    fn walk_tree(
        &self,
        node: &SyntaxNode,
        current: &Path,
        visited: &mut HashSet<PathBuf>,
        loaded: &mut HashSet<PathBuf>,
    ) -> Result<()> {
        match node {
            SyntaxNode::ModuleImport { specifier, .. } => {
                let found_at = self.resolver.resolve_module(current, specifier)?;
                visited.insert(found_at.clone());
                if !loaded.insert(found_at.clone()) {
                    return Ok(());
                }
                let tree = self
                    .resolver
                    .load_module(&found_at)
                    .map_err(|e| DepsError::import_error(specifier.as_str(), current, e))?;
                trace!(
                    importer = %current.display(),
                    specifier = %specifier,
                    "following import to {}",
                    found_at.display()
                );
                self.walk_tree(&tree, &found_at, visited, loaded)
            }
            SyntaxNode::TextImport { specifier, .. } => {
                let found_at = self.resolver.resolve_text(current, specifier)?;
                trace!(
                    importer = %current.display(),
                    specifier = %specifier,
                    "recording text import {}",
                    found_at.display()
                );
                visited.insert(found_at);
                Ok(())
            }
            _ => {
                for child in node.children() {
                    self.walk_tree(child, current, visited, loaded)?;
                }
                Ok(())
            }
        }
    }
}
