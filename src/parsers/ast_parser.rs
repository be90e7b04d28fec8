//! Source parser producing [`SyntaxNode`] trees

use crate::error::{DepsError, Result};
use crate::models::ast::{GroupKind, Span, SyntaxNode, TextImportKind, TokenKind};
use crate::parsers::lexer::{LexError, Lexed, Lexer, Tok};
use std::path::Path;

/// Turns source bytes into a syntax tree
pub trait SourceParser: Send + Sync {
    /// Parse `source`, attributing errors to `path`
    fn parse(&self, path: &Path, source: &[u8]) -> Result<SyntaxNode>;
}

/// Parser for Jsonnet sources
///
/// The tree keeps bracket structure, imports and leaf tokens; it does not build
/// expressions, since nothing downstream evaluates the program.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonnetParser;

impl JsonnetParser {
    pub fn new() -> Self {
        Self
    }
}

struct OpenGroup {
    kind: GroupKind,
    start: usize,
    children: Vec<SyntaxNode>,
}

impl SourceParser for JsonnetParser {
    fn parse(&self, path: &Path, source: &[u8]) -> Result<SyntaxNode> {
        let src = std::str::from_utf8(source).map_err(|e| {
            let (line, column) = line_column(source, e.valid_up_to());
            DepsError::parse_error(path, line, column, "source is not valid UTF-8")
        })?;

        let fail = |offset: usize, message: String| {
            let (line, column) = line_column(source, offset);
            DepsError::parse_error(path, line, column, message)
        };
        let lex_fail = |e: LexError| fail(e.offset, e.message);

        let mut lexer = Lexer::new(src);
        let mut stack = vec![OpenGroup {
            kind: GroupKind::Document,
            start: 0,
            children: Vec::new(),
        }];

        while let Some(Lexed { tok, span }) = lexer.next_token().map_err(lex_fail)? {
            let node = match tok {
                Tok::Open(kind) => {
                    stack.push(OpenGroup {
                        kind,
                        start: span.start,
                        children: Vec::new(),
                    });
                    continue;
                }
                Tok::Close(closer) => {
                    if stack.len() == 1 {
                        return Err(fail(span.start, format!("unexpected '{}'", closer)));
                    }
                    let Some(group) = stack.pop() else { break };
                    if group.kind.closer() != Some(closer) {
                        let expected = group.kind.closer().unwrap_or(' ');
                        return Err(fail(
                            span.start,
                            format!("expected '{}' but found '{}'", expected, closer),
                        ));
                    }
                    SyntaxNode::Group {
                        kind: group.kind,
                        span: Span::new(group.start, span.end),
                        children: group.children,
                    }
                }
                Tok::Ident(name) if is_import_keyword(&name) => {
                    let target = lexer.next_token().map_err(lex_fail)?;
                    let Some(Lexed {
                        tok: Tok::Str { value, block: false },
                        span: target_span,
                    }) = target
                    else {
                        return Err(fail(span.start, "computed imports are not allowed".to_string()));
                    };
                    let span = Span::new(span.start, target_span.end);
                    match name.as_str() {
                        "import" => SyntaxNode::ModuleImport {
                            specifier: value,
                            span,
                        },
                        "importbin" => SyntaxNode::TextImport {
                            specifier: value,
                            kind: TextImportKind::Binary,
                            span,
                        },
                        _ => SyntaxNode::TextImport {
                            specifier: value,
                            kind: TextImportKind::String,
                            span,
                        },
                    }
                }
                Tok::Ident(text) => token(TokenKind::Identifier, text, span),
                Tok::Number(text) => token(TokenKind::Number, text, span),
                Tok::Str { value, block } => {
                    let kind = if block { TokenKind::TextBlock } else { TokenKind::String };
                    token(kind, value, span)
                }
                Tok::Op(ch) => token(TokenKind::Operator, ch.to_string(), span),
            };

            if let Some(top) = stack.last_mut() {
                top.children.push(node);
            }
        }

        if stack.len() > 1 {
            if let Some(unclosed) = stack.pop() {
                let opener = match unclosed.kind {
                    GroupKind::Object => '{',
                    GroupKind::Array => '[',
                    _ => '(',
                };
                return Err(fail(unclosed.start, format!("unclosed '{}'", opener)));
            }
        }

        let children = stack.pop().map(|doc| doc.children).unwrap_or_default();
        Ok(SyntaxNode::Group {
            kind: GroupKind::Document,
            span: Span::new(0, source.len()),
            children,
        })
    }
}

fn is_import_keyword(name: &str) -> bool {
    matches!(name, "import" | "importstr" | "importbin")
}

fn token(kind: TokenKind, text: String, span: Span) -> SyntaxNode {
    SyntaxNode::Token { kind, text, span }
}

/// 1-based line and column of a byte offset
fn line_column(source: &[u8], offset: usize) -> (usize, usize) {
    let before = &source[..offset.min(source.len())];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = before.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
    let column = String::from_utf8_lossy(&before[line_start..]).chars().count() + 1;
    (line, column)
}
