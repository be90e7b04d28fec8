//! Syntax tree produced by the source parser
//!
//! The tree is deliberately shallow: the import walker only needs to tell the two
//! import forms apart from everything else, and everything else only needs to
//! expose its structural children.

use serde::Serialize;

/// Byte offsets of a node within its source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Flavor of a text import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextImportKind {
    /// `importstr`
    String,
    /// `importbin`
    Binary,
}

/// Kind of a bracketed group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupKind {
    /// The whole file
    Document,
    /// `{ ... }`
    Object,
    /// `[ ... ]`
    Array,
    /// `( ... )`
    Parens,
}

impl GroupKind {
    /// Closing delimiter of the group, if it has one
    pub fn closer(&self) -> Option<char> {
        match self {
            GroupKind::Document => None,
            GroupKind::Object => Some('}'),
            GroupKind::Array => Some(']'),
            GroupKind::Parens => Some(')'),
        }
    }
}

/// Kind of a leaf token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    Identifier,
    Number,
    String,
    TextBlock,
    Operator,
}

/// Node of a parsed template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SyntaxNode {
    /// `import "path"`: the target is parsed and walked
    ModuleImport { specifier: String, span: Span },
    /// `importstr "path"` / `importbin "path"`: the target is opaque content
    TextImport {
        specifier: String,
        kind: TextImportKind,
        span: Span,
    },
    /// A bracketed group, or the document itself
    Group {
        kind: GroupKind,
        span: Span,
        children: Vec<SyntaxNode>,
    },
    /// Any other token
    Token {
        kind: TokenKind,
        text: String,
        span: Span,
    },
}

impl SyntaxNode {
    /// Structural children of this node; imports and tokens are leaves
    pub fn children(&self) -> &[SyntaxNode] {
        match self {
            SyntaxNode::Group { children, .. } => children,
            _ => &[],
        }
    }

    pub fn span(&self) -> Span {
        match self {
            SyntaxNode::ModuleImport { span, .. }
            | SyntaxNode::TextImport { span, .. }
            | SyntaxNode::Group { span, .. }
            | SyntaxNode::Token { span, .. } => *span,
        }
    }

    /// Import specifier carried by this node, if it is an import
    pub fn specifier(&self) -> Option<&str> {
        match self {
            SyntaxNode::ModuleImport { specifier, .. } | SyntaxNode::TextImport { specifier, .. } => {
                Some(specifier)
            }
            _ => None,
        }
    }

    /// Collect every import node in the tree, in source order
    pub fn imports(&self) -> Vec<&SyntaxNode> {
        let mut found = Vec::new();
        self.collect_imports(&mut found);
        found
    }

    fn collect_imports<'a>(&'a self, found: &mut Vec<&'a SyntaxNode>) {
        match self {
            SyntaxNode::ModuleImport { .. } | SyntaxNode::TextImport { .. } => found.push(self),
            _ => {
                for child in self.children() {
                    child.collect_imports(found);
                }
            }
        }
    }
}
