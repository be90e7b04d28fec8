//! Tokenizer for Jsonnet source text
//!
//! Only the lexical structure needed to find imports reliably is modelled:
//! comments, every string form (so that an `import` inside a string is never
//! mistaken for a real one), brackets, identifiers and numbers. Everything else
//! comes out as single-character operator tokens.

use crate::models::ast::{GroupKind, Span};

/// A lexed token
#[derive(Debug, Clone, PartialEq)]
pub enum Tok {
    Open(GroupKind),
    Close(char),
    Ident(String),
    Number(String),
    /// Decoded string literal; `block` is set for `|||` text blocks
    Str { value: String, block: bool },
    Op(char),
}

/// A token with its source span
#[derive(Debug, Clone, PartialEq)]
pub struct Lexed {
    pub tok: Tok,
    pub span: Span,
}

/// Lexical error at a byte offset
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub offset: usize,
    pub message: String,
}

impl LexError {
    fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

/// Streaming tokenizer over a source string
pub struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
        }
    }

    /// Next token, or `None` at end of input
    pub fn next_token(&mut self) -> Result<Option<Lexed>, LexError> {
        self.skip_trivia()?;

        let start = self.pos;
        let Some(&b) = self.bytes.get(start) else {
            return Ok(None);
        };

        let tok = match b {
            b'{' => self.single(Tok::Open(GroupKind::Object)),
            b'[' => self.single(Tok::Open(GroupKind::Array)),
            b'(' => self.single(Tok::Open(GroupKind::Parens)),
            b'}' | b']' | b')' => self.single(Tok::Close(b as char)),
            b'"' | b'\'' => self.quoted(b)?,
            b'@' => match self.bytes.get(start + 1) {
                Some(&q @ (b'"' | b'\'')) => {
                    self.pos += 1;
                    self.verbatim(q)?
                }
                _ => return Err(LexError::new(start, "expected quote after '@'")),
            },
            b'|' if self.src[start..].starts_with("|||") => self.text_block()?,
            b if b.is_ascii_alphabetic() || b == b'_' => {
                let end = self.scan_while(start, |c| c.is_ascii_alphanumeric() || c == b'_');
                self.pos = end;
                Tok::Ident(self.src[start..end].to_string())
            }
            b if b.is_ascii_digit() => self.number(),
            _ => {
                // Operators and anything unexpected; advance by a whole character
                let ch = self.src[start..].chars().next().unwrap_or('\u{fffd}');
                self.pos += ch.len_utf8().max(1);
                Tok::Op(ch)
            }
        };

        Ok(Some(Lexed {
            tok,
            span: Span::new(start, self.pos),
        }))
    }

    fn single(&mut self, tok: Tok) -> Tok {
        self.pos += 1;
        tok
    }

    fn scan_while(&self, from: usize, pred: impl Fn(u8) -> bool) -> usize {
        let mut end = from;
        while end < self.bytes.len() && pred(self.bytes[end]) {
            end += 1;
        }
        end
    }

    fn skip_trivia(&mut self) -> Result<(), LexError> {
        loop {
            self.pos = self.scan_while(self.pos, |c| matches!(c, b' ' | b'\t' | b'\n' | b'\r'));
            let rest = &self.src[self.pos..];
            if rest.starts_with('#') || rest.starts_with("//") {
                self.pos = self.scan_while(self.pos, |c| c != b'\n');
            } else if rest.starts_with("/*") {
                match rest[2..].find("*/") {
                    Some(idx) => self.pos += 2 + idx + 2,
                    None => return Err(LexError::new(self.pos, "unterminated comment")),
                }
            } else {
                return Ok(());
            }
        }
    }

    fn number(&mut self) -> Tok {
        let start = self.pos;
        let mut end = self.scan_while(start, |c| c.is_ascii_digit() || c == b'.');
        if matches!(self.bytes.get(end), Some(b'e' | b'E')) {
            end += 1;
            if matches!(self.bytes.get(end), Some(b'+' | b'-')) {
                end += 1;
            }
            end = self.scan_while(end, |c| c.is_ascii_digit());
        }
        self.pos = end;
        Tok::Number(self.src[start..end].to_string())
    }

    /// `"..."` or `'...'` with backslash escapes
    fn quoted(&mut self, quote: u8) -> Result<Tok, LexError> {
        let start = self.pos;
        let mut value = String::new();
        let mut i = start + 1;

        loop {
            let Some(&c) = self.bytes.get(i) else {
                return Err(LexError::new(start, "unterminated string"));
            };
            if c == quote {
                self.pos = i + 1;
                return Ok(Tok::Str {
                    value,
                    block: false,
                });
            }
            if c == b'\\' {
                i = self.escape(i, &mut value)?;
                continue;
            }
            let ch = self.src[i..].chars().next().unwrap_or('\u{fffd}');
            value.push(ch);
            i += ch.len_utf8();
        }
    }

    /// Decode the escape sequence starting at `at` (the backslash); returns the next offset
    fn escape(&self, at: usize, value: &mut String) -> Result<usize, LexError> {
        let Some(&c) = self.bytes.get(at + 1) else {
            return Err(LexError::new(at, "unterminated string"));
        };
        let simple = match c {
            b'"' => Some('"'),
            b'\'' => Some('\''),
            b'\\' => Some('\\'),
            b'/' => Some('/'),
            b'b' => Some('\u{8}'),
            b'f' => Some('\u{c}'),
            b'n' => Some('\n'),
            b'r' => Some('\r'),
            b't' => Some('\t'),
            _ => None,
        };
        if let Some(ch) = simple {
            value.push(ch);
            return Ok(at + 2);
        }
        if c != b'u' {
            return Err(LexError::new(at, "unknown escape sequence in string literal"));
        }

        let high = self.hex4(at + 2)?;
        let mut next = at + 6;
        let code = if (0xD800..0xDC00).contains(&high) && self.src[next..].starts_with("\\u") {
            let low = self.hex4(next + 2)?;
            if !(0xDC00..0xE000).contains(&low) {
                return Err(LexError::new(next, "invalid unicode surrogate pair"));
            }
            next += 6;
            0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
        } else {
            high
        };

        let ch = char::from_u32(code).ok_or_else(|| LexError::new(at, "invalid unicode escape"))?;
        value.push(ch);
        Ok(next)
    }

    fn hex4(&self, at: usize) -> Result<u32, LexError> {
        self.src
            .get(at..at + 4)
            .and_then(|digits| u32::from_str_radix(digits, 16).ok())
            .ok_or_else(|| LexError::new(at, "truncated unicode escape"))
    }

    /// `@"..."` or `@'...'`: no escapes except a doubled quote
    fn verbatim(&mut self, quote: u8) -> Result<Tok, LexError> {
        let start = self.pos - 1;
        let mut value = String::new();
        let mut i = self.pos + 1;

        loop {
            let Some(&c) = self.bytes.get(i) else {
                return Err(LexError::new(start, "unterminated string"));
            };
            if c == quote {
                if self.bytes.get(i + 1) == Some(&quote) {
                    value.push(quote as char);
                    i += 2;
                    continue;
                }
                self.pos = i + 1;
                return Ok(Tok::Str {
                    value,
                    block: false,
                });
            }
            let ch = self.src[i..].chars().next().unwrap_or('\u{fffd}');
            value.push(ch);
            i += ch.len_utf8();
        }
    }

    /// `|||` text block.
    ///
    /// The first non-empty line sets the block's indentation. Content lines must
    /// carry that prefix (or be empty); the first line that does not ends the
    /// block and must hold the closing `|||`.
    fn text_block(&mut self) -> Result<Tok, LexError> {
        let start = self.pos;
        let mut i = start + 3;
        let chomp = self.bytes.get(i) == Some(&b'-');
        if chomp {
            i += 1;
        }
        i = self.scan_while(i, |c| matches!(c, b' ' | b'\t' | b'\r'));
        if self.bytes.get(i) != Some(&b'\n') {
            return Err(LexError::new(start, "text block requires a new line after |||"));
        }
        i += 1;

        let mut value = String::new();
        while self.bytes.get(i) == Some(&b'\n') {
            value.push('\n');
            i += 1;
        }
        let indent_end = self.scan_while(i, |c| matches!(c, b' ' | b'\t'));
        if indent_end == i && i < self.bytes.len() {
            return Err(LexError::new(i, "text block's first line must start with whitespace"));
        }
        let indent = &self.src[i..indent_end];

        while i < self.bytes.len() {
            if self.bytes[i] == b'\n' {
                value.push('\n');
                i += 1;
                continue;
            }
            let line_end = self.scan_while(i, |c| c != b'\n');
            let line = &self.src[i..line_end];
            if let Some(content) = line.strip_prefix(indent) {
                value.push_str(content);
                value.push('\n');
                i = line_end + 1;
                continue;
            }

            let trimmed = line.trim_start_matches([' ', '\t']);
            if !trimmed.starts_with("|||") {
                return Err(LexError::new(i, "text block not terminated with |||"));
            }
            if chomp && value.ends_with('\n') {
                value.pop();
            }
            self.pos = i + (line.len() - trimmed.len()) + 3;
            return Ok(Tok::Str { value, block: true });
        }

        Err(LexError::new(start, "unterminated text block"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<Tok> {
        let mut lexer = Lexer::new(src);
        let mut out = Vec::new();
        while let Some(lexed) = lexer.next_token().unwrap() {
            out.push(lexed.tok);
        }
        out
    }

    fn str_tok(value: &str) -> Tok {
        Tok::Str {
            value: value.to_string(),
            block: false,
        }
    }

    #[test]
    fn test_comments_are_skipped() {
        let toks = tokens("# hash\n// slashes\n/* block\n import 'x' */ a");
        assert_eq!(toks, vec![Tok::Ident("a".to_string())]);
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(tokens(r#""a\"b\\c\u0041""#), vec![str_tok("a\"b\\cA")]);
        assert_eq!(tokens(r"'it\'s'"), vec![str_tok("it's")]);
        assert_eq!(tokens(r#""\ud83d\ude00""#), vec![str_tok("\u{1F600}")]);
    }

    #[test]
    fn test_verbatim_string() {
        assert_eq!(tokens(r#"@"C:\dir\""x""#), vec![str_tok(r#"C:\dir\"x"#)]);
    }

    #[test]
    fn test_text_block() {
        let toks = tokens("x: |||\n  import 'nope'\n  second\n|||, y");
        assert_eq!(
            toks,
            vec![
                Tok::Ident("x".to_string()),
                Tok::Op(':'),
                Tok::Str {
                    value: "import 'nope'\nsecond\n".to_string(),
                    block: true
                },
                Tok::Op(','),
                Tok::Ident("y".to_string()),
            ]
        );
    }

    #[test]
    fn test_text_block_ends_at_lesser_indentation() {
        let toks = tokens("|||\n    a\n    ||| still text\n\n      deeper\n  |||");
        assert_eq!(
            toks,
            vec![Tok::Str {
                value: "a\n||| still text\n\n  deeper\n".to_string(),
                block: true
            }]
        );
    }

    #[test]
    fn test_text_block_chomp() {
        let toks = tokens("|||-\n  line\n|||");
        assert_eq!(
            toks,
            vec![Tok::Str {
                value: "line".to_string(),
                block: true
            }]
        );
    }

    #[test]
    fn test_numbers_and_brackets() {
        let toks = tokens("[1.5e+3, (2)]");
        assert_eq!(
            toks,
            vec![
                Tok::Open(GroupKind::Array),
                Tok::Number("1.5e+3".to_string()),
                Tok::Op(','),
                Tok::Open(GroupKind::Parens),
                Tok::Number("2".to_string()),
                Tok::Close(')'),
                Tok::Close(']'),
            ]
        );
    }

    #[test]
    fn test_errors() {
        let err = Lexer::new("  \"open").next_token().unwrap_err();
        assert_eq!(err.offset, 2);
        assert_eq!(err.message, "unterminated string");

        let err = Lexer::new("/* never closed").next_token().unwrap_err();
        assert_eq!(err.message, "unterminated comment");

        let err = Lexer::new("|||\n  no end").next_token().unwrap_err();
        assert_eq!(err.message, "unterminated text block");

        let err = Lexer::new("|||\nno indent\n|||").next_token().unwrap_err();
        assert_eq!(err.message, "text block's first line must start with whitespace");

        let err = Lexer::new("|||\n  a\n b\n|||").next_token().unwrap_err();
        assert_eq!(err.message, "text block not terminated with |||");

        let err = Lexer::new(r#""\q""#).next_token().unwrap_err();
        assert!(err.message.contains("unknown escape"));
    }
}
