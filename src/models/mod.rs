//! Data models and structures for jsonnet-deps

pub mod ast;
pub mod config;
pub mod environment;
pub mod report;

pub use ast::{GroupKind, Span, SyntaxNode, TextImportKind, TokenKind};
pub use config::{OutputFormat, PartialSettings, Settings};
pub use environment::Environment;
pub use report::{FingerprintEntry, Report};
