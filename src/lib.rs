//! jsonnet-deps - static dependency analysis for Jsonnet projects
//!
//! This library follows `import`, `importstr` and `importbin` expressions
//! without evaluating anything. It lists every file an environment depends on
//! and computes content fingerprints that change whenever a snippet or any file
//! it transitively imports changes.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{
    DependencyMaterializer, EnvironmentClosure, FileHashCache, Fingerprint, Fingerprinter, ImportResolver,
    ImportWalker,
};
pub use error::{DepsError, Result, ResultExt};
pub use models::{config::Settings, environment::Environment, SyntaxNode};
pub use parsers::{JsonnetParser, SourceParser};
pub use utils::{EnvironmentLocator, FileSystem, OsFileSystem, ProjectLocator, SearchPathResolver};

use std::path::Path;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Every file the environment at `root_dir` depends on, entrypoint included,
/// relative to the project root, `/`-separated and sorted.
///
/// Uses the conventional project layout with default settings. Build a
/// [`DependencyMaterializer`] directly for anything else.
pub fn transitive_imports(root_dir: impl AsRef<Path>) -> Result<Vec<String>> {
    DependencyMaterializer::default().transitive_imports(root_dir.as_ref())
}
