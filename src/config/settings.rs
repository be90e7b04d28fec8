//! Validation of fully merged settings

use crate::error::{DepsError, Result, ResultExt};
use crate::models::config::Settings;

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return errors if invalid
    pub fn validate(settings: &Settings) -> Result<()> {
        Self::validate_entrypoint(&settings.entrypoint)?;

        if settings.root_markers.is_empty() {
            return Err(DepsError::config_error("At least one root marker is required"));
        }

        for pattern in &settings.exclude_patterns {
            glob::Pattern::new(pattern).with_context(|| format!("Invalid exclude pattern: {}", pattern))?;
        }

        if settings.quiet && settings.verbose {
            return Err(DepsError::config_error("quiet and verbose cannot both be set"));
        }

        Ok(())
    }

    /// The entrypoint is a bare file name, looked up in each environment directory
    fn validate_entrypoint(entrypoint: &str) -> Result<()> {
        if entrypoint.is_empty() {
            return Err(DepsError::config_error("Entrypoint name must not be empty"));
        }
        if entrypoint.contains('/') || entrypoint.contains(std::path::MAIN_SEPARATOR) {
            return Err(DepsError::config_error(format!(
                "Entrypoint must be a file name, not a path: {}",
                entrypoint
            )));
        }
        Ok(())
    }
}
