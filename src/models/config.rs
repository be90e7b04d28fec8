//! Configuration-related data structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default name of an environment's entrypoint file
pub const DEFAULT_ENTRYPOINT: &str = "main.jsonnet";

/// Files whose presence marks the project root
pub const DEFAULT_ROOT_MARKERS: &[&str] = &["jsonnetfile.json", "tkrc.yaml"];

/// Main configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// File name of an environment's entrypoint
    pub entrypoint: String,

    /// Files marking the project root
    pub root_markers: Vec<String>,

    /// Extra import search paths, consulted after the project's own
    pub search_paths: Vec<PathBuf>,

    /// Directory names skipped while discovering environments
    pub exclude_patterns: Vec<String>,

    /// Output format (text, json)
    pub output_format: OutputFormat,

    /// Whether to use parallel processing
    pub parallel: bool,

    /// Whether to follow symbolic links while discovering environments
    pub follow_links: bool,

    /// Whether to use colors in text output
    pub use_colors: bool,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show debug information
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            entrypoint: DEFAULT_ENTRYPOINT.to_string(),
            root_markers: DEFAULT_ROOT_MARKERS.iter().map(|m| m.to_string()).collect(),
            search_paths: Vec::new(),
            exclude_patterns: vec![
                "vendor".to_string(),
                "node_modules".to_string(),
                ".git".to_string(),
            ],
            output_format: OutputFormat::Text,
            parallel: true,
            follow_links: false,
            use_colors: true,
            quiet: false,
            verbose: false,
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Partial settings for configuration merging
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialSettings {
    pub entrypoint: Option<String>,
    pub root_markers: Option<Vec<String>>,
    pub search_paths: Option<Vec<PathBuf>>,
    pub exclude_patterns: Option<Vec<String>>,
    pub output_format: Option<OutputFormat>,
    pub parallel: Option<bool>,
    pub follow_links: Option<bool>,
    pub use_colors: Option<bool>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
}

impl PartialSettings {
    /// Merge another PartialSettings into this one
    /// Fields from `other` take precedence over existing fields
    pub fn merge_from(&mut self, other: PartialSettings) {
        if other.entrypoint.is_some() {
            self.entrypoint = other.entrypoint;
        }
        if other.root_markers.is_some() {
            self.root_markers = other.root_markers;
        }
        if other.search_paths.is_some() {
            self.search_paths = other.search_paths;
        }
        if other.exclude_patterns.is_some() {
            self.exclude_patterns = other.exclude_patterns;
        }
        if other.output_format.is_some() {
            self.output_format = other.output_format;
        }
        if other.parallel.is_some() {
            self.parallel = other.parallel;
        }
        if other.follow_links.is_some() {
            self.follow_links = other.follow_links;
        }
        if other.use_colors.is_some() {
            self.use_colors = other.use_colors;
        }
        if other.quiet.is_some() {
            self.quiet = other.quiet;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
    }

    /// Convert partial settings to full settings
    /// Uses defaults for any fields that are None
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::default();

        if let Some(entrypoint) = &self.entrypoint {
            settings.entrypoint = entrypoint.clone();
        }
        if let Some(root_markers) = &self.root_markers {
            settings.root_markers = root_markers.clone();
        }
        if let Some(search_paths) = &self.search_paths {
            settings.search_paths = search_paths.clone();
        }
        if let Some(exclude_patterns) = &self.exclude_patterns {
            settings.exclude_patterns = exclude_patterns.clone();
        }
        if let Some(output_format) = self.output_format {
            settings.output_format = output_format;
        }
        if let Some(parallel) = self.parallel {
            settings.parallel = parallel;
        }
        if let Some(follow_links) = self.follow_links {
            settings.follow_links = follow_links;
        }
        if let Some(use_colors) = self.use_colors {
            settings.use_colors = use_colors;
        }
        if let Some(quiet) = self.quiet {
            settings.quiet = quiet;
        }
        if let Some(verbose) = self.verbose {
            settings.verbose = verbose;
        }

        settings
    }
}
