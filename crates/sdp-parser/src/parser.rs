// SPDX-License-Identifier: Apache-2.0
//! Recursive-descent parser implementing the grammar in §4.3:
//!
//! ```text
//! Schema       := Decl+
//! Decl         := ("struct" | "message") Ident "{" Field* "}"
//! Field        := Ident ":" TypeExpr ","?
//! TypeExpr     := Optional | Array | Primitive | Named
//! Optional     := "?" Ident
//! Array        := "[" "]" TypeExpr
//! Primitive    := u8|u16|u32|u64|i8|i16|i32|i64|f32|f64|bool|str|bytes
//! Named        := Ident
//! ```

use crate::ast::{RawDecl, RawDeclKind, RawField, RawSchema, RawTypeExpr};
use crate::error::ParseError;
use sdp_ir::SourcePos;
use sdp_lexer::{Token, TokenKind};

/// Parse schema source text directly (lexing internally).
pub fn parse(src: &str) -> Result<RawSchema, ParseError> {
    let tokens = sdp_lexer::lex(src)?;
    parse_tokens(tokens)
}

/// Parse an already-lexed token stream.
pub fn parse_tokens(tokens: Vec<Token>) -> Result<RawSchema, ParseError> {
    Parser::new(tokens).parse_schema()
}

struct Parser {
    tokens: Vec<Token>,
    idx: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, idx: 0 }
    }

    fn peek(&self) -> &Token {
        // `lex` always appends a trailing Eof token, so this never runs
        // past the end of `tokens`.
        &self.tokens[self.idx]
    }

    fn pos(&self) -> SourcePos {
        self.peek().pos
    }

    fn advance(&mut self) -> Token {
        let t = self.tokens[self.idx].clone();
        if self.idx + 1 < self.tokens.len() {
            self.idx += 1;
        }
        t
    }

    /// Skips any comment tokens, returning their joined text if any were
    /// present (used to gather a declaration's doc comment).
    fn skip_comments_collecting(&mut self) -> Option<String> {
        let mut lines = Vec::new();
        while let TokenKind::Comment(text) = &self.peek().kind {
            lines.push(text.clone());
            self.advance();
        }
        if lines.is_empty() {
            None
        } else {
            Some(lines.join("\n"))
        }
    }

    /// Skips any comment tokens without collecting them (used between
    /// fields and at other positions where comments are not doc-bearing).
    fn skip_comments(&mut self) {
        while matches!(self.peek().kind, TokenKind::Comment(_)) {
            self.advance();
        }
    }

    fn parse_schema(&mut self) -> Result<RawSchema, ParseError> {
        let mut decls = Vec::new();
        loop {
            let doc = self.skip_comments_collecting();
            if matches!(self.peek().kind, TokenKind::Eof) {
                break;
            }
            decls.push(self.parse_decl(doc)?);
        }
        Ok(RawSchema { decls })
    }

    fn parse_decl(&mut self, doc: Option<String>) -> Result<RawDecl, ParseError> {
        let kind_tok = self.advance();
        let kind = match kind_tok.kind {
            TokenKind::Struct => RawDeclKind::Struct,
            TokenKind::Message => RawDeclKind::Message,
            _ => {
                return Err(ParseError::syntax(
                    kind_tok.pos,
                    "expected 'struct' or 'message'",
                ))
            }
        };

        let (name, name_pos) = self.expect_any_ident("declaration name")?;

        self.expect(&TokenKind::LBrace, "'{'")?;
        let mut fields = Vec::new();
        loop {
            self.skip_comments();
            if matches!(self.peek().kind, TokenKind::RBrace) {
                break;
            }
            if matches!(self.peek().kind, TokenKind::Eof) {
                return Err(ParseError::syntax(
                    self.pos(),
                    "unterminated declaration: expected '}' before end of input",
                ));
            }
            fields.push(self.parse_field()?);
        }
        self.expect(&TokenKind::RBrace, "'}'")?;

        Ok(RawDecl {
            kind,
            name,
            name_pos,
            doc,
            fields,
        })
    }

    fn parse_field(&mut self) -> Result<RawField, ParseError> {
        let (name, name_pos) = self.expect_any_ident("field name")?;
        self.expect(&TokenKind::Colon, "':'")?;
        let ty = self.parse_type_expr()?;
        if matches!(self.peek().kind, TokenKind::Comma) {
            self.advance();
        }
        Ok(RawField { name, name_pos, ty })
    }

    fn parse_type_expr(&mut self) -> Result<RawTypeExpr, ParseError> {
        let tok = self.peek().clone();
        match tok.kind {
            TokenKind::Question => {
                self.advance();
                // Accept any identifier here; whether it's an uppercase
                // reference to a declared struct is a shape invariant
                // enforced by the validator (§4.4 check 4), not the
                // grammar.
                let (name, _) = self.expect_any_ident("optional inner type")?;
                Ok(RawTypeExpr::Optional(name, tok.pos))
            }
            TokenKind::LBracket => {
                self.advance();
                self.expect(&TokenKind::RBracket, "']'")?;
                let elem = self.parse_type_expr()?;
                Ok(RawTypeExpr::Array(Box::new(elem), tok.pos))
            }
            TokenKind::Primitive(p) => {
                self.advance();
                Ok(RawTypeExpr::Primitive(p))
            }
            TokenKind::UpperIdent(name) | TokenKind::LowerIdent(name) => {
                self.advance();
                Ok(RawTypeExpr::Named(name, tok.pos))
            }
            _ => Err(ParseError::syntax(tok.pos, "expected a type expression")),
        }
    }

    fn expect(&mut self, kind: &TokenKind, what: &str) -> Result<(), ParseError> {
        if &self.peek().kind == kind {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::syntax(
                self.pos(),
                format!("expected {what}"),
            ))
        }
    }

    fn expect_any_ident(&mut self, what: &str) -> Result<(String, SourcePos), ParseError> {
        let tok = self.peek().clone();
        match tok.kind {
            TokenKind::UpperIdent(name) | TokenKind::LowerIdent(name) => {
                self.advance();
                Ok((name, tok.pos))
            }
            _ => Err(ParseError::syntax(tok.pos, format!("expected {what}"))),
        }
    }

}
