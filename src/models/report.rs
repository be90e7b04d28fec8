//! Command results, shaped for the output formatters

use serde::Serialize;
use std::path::PathBuf;

/// One fingerprinted file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FingerprintEntry {
    pub path: String,
    pub fingerprint: String,
}

/// Result of a command, serialized as a plain JSON object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Report {
    /// Dependency list of one environment
    Imports {
        root_dir: PathBuf,
        entrypoint: PathBuf,
        files: Vec<String>,
    },
    /// Fingerprints in the order the files were given
    Fingerprints { fingerprints: Vec<FingerprintEntry> },
    /// Environments depending on any of `files`
    Importers {
        files: Vec<String>,
        importers: Vec<String>,
    },
    /// Environments found below `root`
    Environments {
        root: PathBuf,
        environments: Vec<String>,
    },
}

impl Report {
    /// Header line for text output
    pub fn title(&self) -> String {
        match self {
            Report::Imports { entrypoint, files, .. } => {
                format!("{} file(s) in the closure of {}", files.len(), entrypoint.display())
            }
            Report::Fingerprints { fingerprints } => format!("{} fingerprint(s)", fingerprints.len()),
            Report::Importers { importers, .. } => format!("{} importing environment(s)", importers.len()),
            Report::Environments { root, environments } => {
                format!("{} environment(s) below {}", environments.len(), root.display())
            }
        }
    }

    /// Number of result entries
    pub fn len(&self) -> usize {
        match self {
            Report::Imports { files, .. } => files.len(),
            Report::Fingerprints { fingerprints } => fingerprints.len(),
            Report::Importers { importers, .. } => importers.len(),
            Report::Environments { environments, .. } => environments.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
