//! Configuration file parsing utilities

use std::fs;
use std::path::{Path, PathBuf};

use super::file::DEFAULT_CONFIG_FILE;
use crate::error::{DepsError, Result};
use crate::models::config::PartialSettings;

/// Parse a TOML configuration file into PartialSettings
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(DepsError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| DepsError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_config_content(&content, path)
}

/// Parse TOML configuration content into PartialSettings
pub fn parse_config_content<P: AsRef<Path>>(content: &str, path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    let settings: PartialSettings = toml::from_str(content).map_err(|e| DepsError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    validate_partial_settings(&settings, path)?;

    Ok(settings)
}

/// Validate partial settings for obvious errors
pub fn validate_partial_settings<P: AsRef<Path>>(settings: &PartialSettings, path: P) -> Result<()> {
    let origin = path.as_ref().display();

    if let Some(entrypoint) = &settings.entrypoint {
        if entrypoint.is_empty() {
            return Err(DepsError::config_error(format!("Empty entrypoint in {}", origin)));
        }
    }

    if let Some(markers) = &settings.root_markers {
        if markers.is_empty() || markers.iter().any(String::is_empty) {
            return Err(DepsError::config_error(format!(
                "root_markers in {} must be a non-empty list of file names",
                origin
            )));
        }
    }

    if let Some(paths) = &settings.search_paths {
        if paths.iter().any(|p| p.as_os_str().is_empty()) {
            return Err(DepsError::config_error(format!("Empty search path in {}", origin)));
        }
    }

    if let Some(patterns) = &settings.exclude_patterns {
        for pattern in patterns {
            if pattern.is_empty() {
                return Err(DepsError::config_error(format!("Empty exclude pattern in {}", origin)));
            }

            glob::Pattern::new(pattern).map_err(|e| {
                DepsError::config_error(format!(
                    "Invalid exclude pattern '{}' in {}: {}",
                    pattern, origin, e
                ))
            })?;
        }
    }

    Ok(())
}

/// Candidate config file locations, in lookup order
pub fn default_config_locations() -> Vec<PathBuf> {
    let mut locations = vec![PathBuf::from(DEFAULT_CONFIG_FILE)];
    if let Some(home_dir) = dirs::home_dir() {
        locations.push(home_dir.join(DEFAULT_CONFIG_FILE));
    }
    if let Some(config_dir) = dirs::config_dir() {
        locations.push(config_dir.join("jsonnet-deps").join("config.toml"));
    }
    locations
}

/// Find and load configuration from the first default location that has a file
pub fn find_default_config() -> Result<Option<PartialSettings>> {
    for location in default_config_locations() {
        if location.is_file() {
            return Ok(Some(parse_config_file(location)?));
        }
    }
    Ok(None)
}

/// Create a default configuration file at the specified path
pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(DepsError::io_error)?;
        }
    }

    let default_config = include_str!("default_config.toml");
    fs::write(path, default_config).map_err(DepsError::io_error)?;

    Ok(())
}
