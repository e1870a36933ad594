// SPDX-License-Identifier: Apache-2.0
//! Tokenizer for the SDP schema IDL (§4.2 of the wire format spec).
//!
//! Whitespace is insignificant except as a token separator; line comments
//! (`// ...`) are preserved as [`TokenKind::Comment`] tokens rather than
//! discarded here, so the parser can attach a contiguous run of comment
//! lines immediately preceding a declaration as its doc comment. Newlines
//! may be LF or CRLF; a lone `\r` is treated as insignificant whitespace.

#![deny(missing_docs)]

mod error;
mod token;

pub use error::LexError;
pub use token::{Token, TokenKind};

use sdp_ir::SourcePos;

/// Tokenize schema source text, stopping at the first lexical error.
///
/// The returned vector always ends with a single [`TokenKind::Eof`] token.
pub fn lex(src: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(src).run()
}

struct Lexer {
    chars: Vec<char>,
    idx: usize,
    pos: SourcePos,
}

impl Lexer {
    fn new(src: &str) -> Self {
        Self {
            chars: src.chars().collect(),
            idx: 0,
            pos: SourcePos::START,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.idx).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.idx + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.idx += 1;
        self.pos = if c == '\n' {
            self.pos.next_line()
        } else {
            self.pos.next_col()
        };
        Some(c)
    }

    fn run(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_insignificant_whitespace();
            let start = self.pos;
            let Some(c) = self.peek() else {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    pos: start,
                });
                return Ok(tokens);
            };

            let kind = if c == '/' && self.peek_at(1) == Some('/') {
                self.lex_comment()
            } else if is_ident_start(c) {
                self.lex_ident()
            } else if c.is_ascii_digit() || c == '_' {
                return Err(LexError::UnterminatedIdentifier { pos: start });
            } else {
                self.advance();
                match c {
                    '{' => TokenKind::LBrace,
                    '}' => TokenKind::RBrace,
                    ':' => TokenKind::Colon,
                    ',' => TokenKind::Comma,
                    '[' => TokenKind::LBracket,
                    ']' => TokenKind::RBracket,
                    '?' => TokenKind::Question,
                    other => return Err(LexError::UnrecognizedChar { pos: start, ch: other }),
                }
            };
            tokens.push(Token { kind, pos: start });
        }
    }

    /// Skips spaces, tabs, and newlines. Does not skip comments (those
    /// become tokens) and does not skip a `\r` that is not part of a CRLF
    /// pair any differently than other whitespace.
    fn skip_insignificant_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c == ' ' || c == '\t' || c == '\n' || c == '\r' {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn lex_comment(&mut self) -> TokenKind {
        self.advance(); // '/'
        self.advance(); // '/'
        if self.peek() == Some(' ') {
            self.advance();
        }
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c == '\n' || c == '\r' {
                break;
            }
            text.push(c);
            self.advance();
        }
        TokenKind::Comment(text)
    }

    fn lex_ident(&mut self) -> TokenKind {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }
        classify_ident(text)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn classify_ident(text: String) -> TokenKind {
    match text.as_str() {
        "struct" => TokenKind::Struct,
        "message" => TokenKind::Message,
        _ => {
            if let Some(p) = sdp_ir::PrimitiveKind::from_keyword(&text) {
                TokenKind::Primitive(p)
            } else if text.chars().next().is_some_and(char::is_uppercase) {
                TokenKind::UpperIdent(text)
            } else {
                TokenKind::LowerIdent(text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        lex(src).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_struct_keyword_and_punctuation() {
        let k = kinds("struct Foo { id: u32 }");
        assert_eq!(
            k,
            vec![
                TokenKind::Struct,
                TokenKind::UpperIdent("Foo".to_string()),
                TokenKind::LBrace,
                TokenKind::LowerIdent("id".to_string()),
                TokenKind::Colon,
                TokenKind::Primitive(sdp_ir::PrimitiveKind::U32),
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lexes_message_array_and_optional() {
        let k = kinds("message M { xs: []u8, meta: ?Meta }");
        assert_eq!(
            k,
            vec![
                TokenKind::Message,
                TokenKind::UpperIdent("M".to_string()),
                TokenKind::LBrace,
                TokenKind::LowerIdent("xs".to_string()),
                TokenKind::Colon,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::Primitive(sdp_ir::PrimitiveKind::U8),
                TokenKind::Comma,
                TokenKind::LowerIdent("meta".to_string()),
                TokenKind::Colon,
                TokenKind::Question,
                TokenKind::UpperIdent("Meta".to_string()),
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comments_are_preserved_as_tokens() {
        let k = kinds("// a doc comment\nstruct Foo {}");
        assert_eq!(
            k,
            vec![
                TokenKind::Comment("a doc comment".to_string()),
                TokenKind::Struct,
                TokenKind::UpperIdent("Foo".to_string()),
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn crlf_and_lf_both_advance_lines() {
        let toks = lex("struct A {}\r\nstruct B {}\n").unwrap();
        let b_pos = toks
            .iter()
            .find_map(|t| match &t.kind {
                TokenKind::UpperIdent(name) if name == "B" => Some(t.pos),
                _ => None,
            })
            .unwrap();
        assert_eq!(b_pos.line, 2);
    }

    #[test]
    fn unrecognized_char_errors() {
        let err = lex("struct A { f: u8 @ }").unwrap_err();
        assert!(matches!(err, LexError::UnrecognizedChar { ch: '@', .. }));
    }

    #[test]
    fn leading_underscore_is_unterminated_identifier() {
        let err = lex("struct A { _f: u8 }").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedIdentifier { .. }));
    }

    #[test]
    fn leading_digit_is_unterminated_identifier() {
        // A bare leading digit cannot start a valid identifier; grouped
        // with the leading-underscore case rather than as an unrecognized
        // character, since digits are themselves valid identifier *body*
        // characters and the run looks identifier-shaped.
        let err = lex("9Foo").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedIdentifier { .. }));
    }

    #[test]
    fn positions_track_columns() {
        let toks = lex("struct Foo {}").unwrap();
        assert_eq!(toks[0].pos, SourcePos::new(1, 1));
        assert_eq!(toks[1].pos, SourcePos::new(1, 8));
    }
}
