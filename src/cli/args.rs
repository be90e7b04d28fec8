//! Command-line argument parsing

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// jsonnet-deps - static dependency analysis for Jsonnet projects
#[derive(Parser, Debug)]
#[command(name = "jsonnet-deps")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "List the files a Jsonnet environment depends on and fingerprint snippets by content")]
#[command(long_about = "jsonnet-deps statically follows import, importstr and importbin expressions \
without evaluating anything. It lists every file an environment depends on, computes content \
fingerprints that change whenever a snippet or anything it imports changes, and finds the \
environments affected by a change to a shared library file.")]
#[command(after_help = "EXAMPLES:

    # Every file environments/prod depends on, relative to the project root
    jsonnet-deps imports environments/prod

    # Content fingerprints of two snippets
    jsonnet-deps fingerprint environments/prod/main.jsonnet lib/k.libsonnet

    # Environments affected by a change to a library file
    jsonnet-deps importers lib/shared.libsonnet --root environments

    # All environments below the current directory, as JSON
    jsonnet-deps --output json environments

    # Extra search path, consulted after the project's own
    jsonnet-deps --jpath /opt/jsonnet/lib imports environments/dev

    # Write a default .jsonnet-deps.toml
    jsonnet-deps init
")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, value_name = "FILE", help = "Path to configuration file (defaults to .jsonnet-deps.toml in the current directory, then the home and config directories)")]
    pub config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, global = true, value_enum, help = "Output format: 'text' for people, 'json' for tools")]
    pub output: Option<OutputFormat>,

    /// Entrypoint file name
    #[arg(long, global = true, value_name = "NAME", help = "File name of an environment's entrypoint (default: main.jsonnet)")]
    pub entrypoint: Option<String>,

    /// Extra import search paths
    #[arg(short = 'J', long, global = true, value_name = "DIR", help = "Additional import search path, consulted after the project's own (can be specified multiple times)")]
    pub jpath: Vec<PathBuf>,

    /// Exclude directories matching these glob patterns
    #[arg(short, long, global = true, value_name = "PATTERN", help = "Directory names skipped while discovering environments (can be specified multiple times)")]
    pub exclude: Vec<String>,

    /// Disable parallel processing
    #[arg(long, global = true, help = "Process environments and files on a single thread")]
    pub no_parallel: bool,

    /// Follow symbolic links during environment discovery
    #[arg(long, global = true, help = "Follow symbolic links while discovering environments")]
    pub follow_links: bool,

    /// Disable colored output
    #[arg(long, global = true, help = "Disable colored output (useful when piping output)")]
    pub no_colors: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, help = "Print results only, without headers")]
    pub quiet: bool,

    /// Show debug information
    #[arg(short, long, global = true, help = "Log debug information to stderr")]
    pub verbose: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List every file an environment depends on, relative to the project root
    Imports {
        /// Environment directory (or its entrypoint file)
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },

    /// Print content fingerprints of snippet files
    Fingerprint {
        /// Files to fingerprint
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// List the environments that import any of the given files
    Importers {
        /// Files to look up
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Directory searched for environments
        #[arg(long, value_name = "DIR", default_value = ".")]
        root: PathBuf,
    },

    /// List the environments below a directory
    Environments {
        /// Directory to search
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,
    },

    /// Create a default configuration file in the current directory
    Init,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}
