// SPDX-License-Identifier: Apache-2.0
//! Token kinds produced by the lexer.

use sdp_ir::{PrimitiveKind, SourcePos};

/// A single lexical token plus the position of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// Position of the token's first character.
    pub pos: SourcePos,
}

/// The kind of a lexical token.
///
/// Identifiers are distinguished by the case of their first character at
/// lex time ([`TokenKind::UpperIdent`] vs. [`TokenKind::LowerIdent`]) so the
/// parser never has to re-inspect a string's first byte to tell a type
/// reference from a field name. Primitive-type keywords are recognized
/// eagerly as their own variant rather than left as lower-case identifiers,
/// matching the grammar's treatment of them as reserved words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// The `struct` keyword.
    Struct,
    /// The `message` keyword.
    Message,
    /// A primitive-type keyword (`u8`, `str`, `bool`, ...).
    Primitive(PrimitiveKind),
    /// An identifier beginning with an uppercase ASCII letter (a type name).
    UpperIdent(String),
    /// An identifier beginning with a lowercase ASCII letter (a field name).
    LowerIdent(String),
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `?`
    Question,
    /// A line comment's text, with the leading `//` and any single
    /// following space stripped.
    Comment(String),
    /// End of input.
    Eof,
}
