//! Error types and definitions for jsonnet-deps
//!
//! Every failure in the import walker, the materializer and the fingerprinter is
//! fatal to the enclosing call. The variants below keep enough context (the
//! offending specifier, the importing file, the path that could not be read) to
//! make the failure actionable without a debugger.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for jsonnet-deps operations
#[derive(Debug, Error)]
pub enum DepsError {
    /// An import specifier could not be mapped to a file
    #[error("importing '{specifier}' from '{}': {reason}", importer.display())]
    Resolution {
        specifier: String,
        importer: PathBuf,
        reason: String,
    },

    /// An imported file was found but could not be read or parsed
    #[error("importing '{specifier}' from '{}': {source}", importer.display())]
    Import {
        specifier: String,
        importer: PathBuf,
        #[source]
        source: Box<DepsError>,
    },

    /// Malformed template syntax
    #[error("parse error in {}:{line}:{column}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// A discovered path could not be resolved to its canonical form
    #[error("resolving symlinks of {}: {source}", path.display())]
    Canonicalize {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The environment directory itself could not be made absolute or canonical
    #[error("resolving root directory {}: {source}", path.display())]
    RootUnresolvable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No entrypoint file exists for the environment
    #[error("entrypoint '{entrypoint}' not found for {}", path.display())]
    EntrypointNotFound { path: PathBuf, entrypoint: String },

    /// A file could not be read
    #[error("reading {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// Invalid path errors
    #[error("Invalid path: {}", path.display())]
    InvalidPath { path: PathBuf },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Configuration file not found
    #[error("Configuration file not found at {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// Configuration file read errors
    #[error("Error reading configuration file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Glob pattern errors
    #[error("Glob pattern error: {source}")]
    GlobPattern {
        #[source]
        source: glob::PatternError,
    },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
    },
}

impl DepsError {
    /// Whether this error comes from configuration rather than from the files being analysed
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            DepsError::Config { .. }
                | DepsError::ConfigNotFound { .. }
                | DepsError::ConfigRead { .. }
                | DepsError::ConfigParse { .. }
                | DepsError::GlobPattern { .. }
        )
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            DepsError::Resolution {
                specifier,
                importer,
                reason,
            } => {
                format!(
                    "Cannot resolve import '{}' in '{}': {}",
                    specifier,
                    importer.display(),
                    reason
                )
            }
            DepsError::Import {
                specifier,
                importer,
                source,
            } => {
                format!(
                    "Cannot load import '{}' in '{}': {}",
                    specifier,
                    importer.display(),
                    source
                )
            }
            DepsError::EntrypointNotFound { path, entrypoint } => {
                format!(
                    "No '{}' found in '{}' or any of its parent directories.",
                    entrypoint,
                    path.display()
                )
            }
            DepsError::Canonicalize { path, source } => {
                format!(
                    "Cannot resolve '{}' to a real file: {}. Check for broken symlinks.",
                    path.display(),
                    source
                )
            }
            DepsError::ConfigNotFound { path } => {
                format!(
                    "Configuration file not found at '{}'. Create one with `jsonnet-deps init` or drop the --config flag.",
                    path.display()
                )
            }
            _ => self.to_string(),
        }
    }

    /// Get a suggestion for fixing the error, if there is an obvious one
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            DepsError::Resolution { .. } => {
                Some("Check the import path and the search paths (--jpath) of the environment")
            }
            DepsError::Import { .. } => Some("Fix the syntax of the imported file"),
            DepsError::EntrypointNotFound { .. } => {
                Some("Point at an environment directory or pass --entrypoint")
            }
            DepsError::RootUnresolvable { .. } | DepsError::InvalidPath { .. } => {
                Some("Check that the path exists and is accessible")
            }
            DepsError::ConfigParse { .. } => Some("Fix the TOML syntax of the configuration file"),
            _ => None,
        }
    }

    /// Create an IO error
    pub fn io_error(source: std::io::Error) -> Self {
        DepsError::Io { source }
    }

    /// Create a file read error
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DepsError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a resolution error
    pub fn resolution_error(
        specifier: impl Into<String>,
        importer: impl Into<PathBuf>,
        reason: impl Into<String>,
    ) -> Self {
        DepsError::Resolution {
            specifier: specifier.into(),
            importer: importer.into(),
            reason: reason.into(),
        }
    }

    /// Wrap a failure to load the file `specifier` resolved to
    pub fn import_error(specifier: impl Into<String>, importer: impl Into<PathBuf>, source: DepsError) -> Self {
        DepsError::Import {
            specifier: specifier.into(),
            importer: importer.into(),
            source: Box::new(source),
        }
    }

    /// Create a parse error at a 1-based line and column
    pub fn parse_error(
        path: impl Into<PathBuf>,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        DepsError::Parse {
            path: path.into(),
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        DepsError::Config {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for DepsError {
    fn from(err: std::io::Error) -> Self {
        DepsError::io_error(err)
    }
}

impl From<glob::PatternError> for DepsError {
    fn from(err: glob::PatternError) -> Self {
        DepsError::GlobPattern { source: err }
    }
}

impl From<serde_json::Error> for DepsError {
    fn from(err: serde_json::Error) -> Self {
        DepsError::JsonSerialize { source: err }
    }
}

/// Result type alias for jsonnet-deps operations
pub type Result<T> = std::result::Result<T, DepsError>;
