//! Core functionality for import walking, dependency lists and fingerprints

pub mod cache;
pub mod fingerprint;
pub mod import_walker;
pub mod importers;
pub mod materializer;
pub mod parallel;

pub use cache::{CacheStats, FileHashCache};
pub use fingerprint::{Fingerprint, Fingerprinter};
pub use import_walker::{ImportResolver, ImportWalker};
pub use importers::{find_environments, find_importers};
pub use materializer::{DependencyMaterializer, EnvironmentClosure};
