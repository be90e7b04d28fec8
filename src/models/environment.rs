//! A located environment: its entrypoint, project root and search paths

use serde::Serialize;
use std::path::PathBuf;

/// Everything needed to walk an environment's imports
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Environment {
    /// Directory holding the entrypoint
    pub base_dir: PathBuf,
    /// Project root; dependency lists are expressed relative to it
    pub root_dir: PathBuf,
    /// Absolute path of the entrypoint file
    pub entrypoint: PathBuf,
    /// Import search paths, highest priority first
    pub search_paths: Vec<PathBuf>,
}
