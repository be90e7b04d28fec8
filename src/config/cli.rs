//! Command-line argument configuration source

use std::path::PathBuf;

use super::ConfigSource;
use crate::cli::args::{Args, OutputFormat as CliOutputFormat};
use crate::error::Result;
use crate::models::config::{OutputFormat, PartialSettings};

/// Command-line argument configuration source
#[derive(Debug)]
pub struct CliConfig {
    args: CliArgs,
    name: String,
}

/// Settings-related command-line arguments, detached from clap
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub output_format: Option<OutputFormat>,
    pub entrypoint: Option<String>,
    pub jpath: Vec<PathBuf>,
    pub exclude: Vec<String>,
    pub no_parallel: bool,
    pub follow_links: bool,
    pub no_colors: bool,
    pub quiet: bool,
    pub verbose: bool,
}

impl From<&Args> for CliArgs {
    fn from(args: &Args) -> Self {
        Self {
            config: args.config.clone(),
            output_format: args.output.map(|format| match format {
                CliOutputFormat::Text => OutputFormat::Text,
                CliOutputFormat::Json => OutputFormat::Json,
            }),
            entrypoint: args.entrypoint.clone(),
            jpath: args.jpath.clone(),
            exclude: args.exclude.clone(),
            no_parallel: args.no_parallel,
            follow_links: args.follow_links,
            no_colors: args.no_colors,
            quiet: args.quiet,
            verbose: args.verbose,
        }
    }
}

impl CliConfig {
    /// Create a new CLI configuration source
    pub fn new(args: CliArgs) -> Self {
        Self {
            args,
            name: "command-line arguments".to_string(),
        }
    }

    /// Create a CLI configuration source from parsed clap arguments
    pub fn from_args(args: &Args) -> Self {
        Self::new(CliArgs::from(args))
    }

    /// Get the config file path if specified
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.args.config.as_ref()
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings::default();

        if let Some(entrypoint) = &self.args.entrypoint {
            settings.entrypoint = Some(entrypoint.clone());
        }

        // Repeatable flags only override when given at least once
        if !self.args.jpath.is_empty() {
            settings.search_paths = Some(self.args.jpath.clone());
        }

        if !self.args.exclude.is_empty() {
            settings.exclude_patterns = Some(self.args.exclude.clone());
        }

        if let Some(format) = self.args.output_format {
            settings.output_format = Some(format);
        }

        // Boolean flags
        if self.args.no_parallel {
            settings.parallel = Some(false);
        }

        if self.args.follow_links {
            settings.follow_links = Some(true);
        }

        if self.args.no_colors {
            settings.use_colors = Some(false);
        }

        if self.args.quiet {
            settings.quiet = Some(true);
        }

        if self.args.verbose {
            settings.verbose = Some(true);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.name
    }
}
