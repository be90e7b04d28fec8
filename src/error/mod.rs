//! Error handling for jsonnet-deps
//!
//! This module provides the crate-wide error type, the result alias and
//! utilities for attaching context to foreign errors.

pub mod context;
pub mod types;

pub use context::ResultExt;
pub use types::{DepsError, Result};
