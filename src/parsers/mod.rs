//! Parsing functionality for template sources
//!
//! A tokenizer and a tree builder for Jsonnet. The tree only carries what the
//! import walker needs: imports, bracket structure and leaf tokens.

pub mod ast_parser;
pub mod lexer;

pub use ast_parser::{JsonnetParser, SourceParser};
