//! Filesystem and path resolution utilities

pub mod fs;
pub mod path_resolver;

pub use fs::{FileSystem, OsFileSystem};
pub use path_resolver::{EnvironmentLocator, ProjectLocator, SearchPathResolver};
