//! File and environment variable configuration sources

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{parser, ConfigSource};
use crate::error::{DepsError, Result};
use crate::models::config::{OutputFormat, PartialSettings};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".jsonnet-deps.toml";

/// Prefix of the environment variables read by [`EnvConfig`]
pub const ENV_PREFIX: &str = "JSONNET_DEPS";

/// Configuration file source
pub struct FileConfig {
    path: PathBuf,
    name: String,
}

impl FileConfig {
    /// Create a new file configuration source with the default path
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
            name: "default config file".to_string(),
        }
    }

    /// Create a new file configuration source with a custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            name: format!("config file ({})", path.as_ref().display()),
        }
    }

    /// Get the path of this configuration file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a default configuration file at this location
    pub fn create_default(&self) -> Result<()> {
        parser::create_default_config(&self.path)
    }
}

impl ConfigSource for FileConfig {
    fn load(&self) -> Result<PartialSettings> {
        if !self.is_available() {
            return Err(DepsError::ConfigNotFound {
                path: self.path.clone(),
            });
        }

        parser::parse_config_file(&self.path)
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Environment variable configuration source
///
/// Reads `<PREFIX>_ENTRYPOINT`, `<PREFIX>_ROOT_MARKERS`, `<PREFIX>_JPATH`,
/// `<PREFIX>_EXCLUDE`, `<PREFIX>_OUTPUT_FORMAT`, `<PREFIX>_PARALLEL`,
/// `<PREFIX>_FOLLOW_LINKS`, `<PREFIX>_USE_COLORS`, `<PREFIX>_QUIET` and
/// `<PREFIX>_VERBOSE`. Lists are comma separated, except `JPATH` which uses the
/// platform's path list separator.
pub struct EnvConfig {
    prefix: String,
    name: String,
    vars: Option<HashMap<String, String>>,
}

impl EnvConfig {
    /// Create a source reading the process environment
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("{} environment variables", &prefix),
            prefix,
            vars: None,
        }
    }

    /// Create a source reading a fixed set of variables instead of the process environment
    pub fn with_vars<I, K, V>(prefix: impl Into<String>, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut source = Self::new(prefix);
        source.vars = Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        source
    }

    const KEYS: &'static [&'static str] = &[
        "ENTRYPOINT",
        "ROOT_MARKERS",
        "JPATH",
        "EXCLUDE",
        "OUTPUT_FORMAT",
        "PARALLEL",
        "FOLLOW_LINKS",
        "USE_COLORS",
        "QUIET",
        "VERBOSE",
    ];

    fn var_name(&self, key: &str) -> String {
        format!("{}_{}", self.prefix, key)
    }

    fn get(&self, key: &str) -> Option<String> {
        let name = self.var_name(key);
        match &self.vars {
            Some(vars) => vars.get(&name).cloned(),
            None => std::env::var(name).ok(),
        }
    }

    fn get_list(&self, key: &str) -> Option<Vec<String>> {
        self.get(key).map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
    }

    fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            other => Err(DepsError::config_error(format!(
                "{} must be a boolean, got '{}'",
                self.var_name(key),
                other
            ))),
        }
    }
}

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings {
            entrypoint: self.get("ENTRYPOINT"),
            root_markers: self.get_list("ROOT_MARKERS"),
            search_paths: self
                .get("JPATH")
                .map(|value| std::env::split_paths(&value).filter(|p| !p.as_os_str().is_empty()).collect()),
            exclude_patterns: self.get_list("EXCLUDE"),
            ..PartialSettings::default()
        };

        if let Some(format) = self.get("OUTPUT_FORMAT") {
            let parsed: OutputFormat = format.parse().map_err(DepsError::config_error)?;
            settings.output_format = Some(parsed);
        }

        settings.parallel = self.get_bool("PARALLEL")?;
        settings.follow_links = self.get_bool("FOLLOW_LINKS")?;
        settings.use_colors = self.get_bool("USE_COLORS")?;
        settings.quiet = self.get_bool("QUIET")?;
        settings.verbose = self.get_bool("VERBOSE")?;

        parser::validate_partial_settings(&settings, &self.name)?;
        Ok(settings)
    }

    fn is_available(&self) -> bool {
        Self::KEYS.iter().any(|key| self.get(key).is_some())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
