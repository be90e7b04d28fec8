//! Error context utilities
//!
//! Extension trait for attaching context to foreign errors so that they surface
//! as [`DepsError`] values with a message attached.

use crate::error::{DepsError, Result};

/// Extension trait for Result to add context to errors
pub trait ResultExt<T, E> {
    /// Add context to an error with a custom message
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|err| DepsError::Config {
            message: format!("{}: {}", context(), err),
        })
    }
}
