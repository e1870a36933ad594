// SPDX-License-Identifier: Apache-2.0
//! The raw (pre-resolution) IR produced by the parser.
//!
//! `Named` and `Optional` type expressions carry the referenced name as a
//! plain `String` plus the position it appeared at; resolving that name to
//! a declaration (and checking the "optional wraps only a Named struct"
//! and "array element is not itself Array/Optional" shape rules) is the
//! validator's job, not the parser's.

use sdp_ir::{PrimitiveKind, SourcePos};

/// A raw type expression, as written in source, before name resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawTypeExpr {
    /// A primitive keyword type.
    Primitive(PrimitiveKind),
    /// A reference to another declaration by name (not yet resolved).
    Named(String, SourcePos),
    /// `[]T` — element type, recursively raw.
    Array(Box<RawTypeExpr>, SourcePos),
    /// `?Name` — the inner name, not yet resolved or shape-checked.
    Optional(String, SourcePos),
}

/// A raw field: a name and a raw type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    /// Field name as written (case not yet validated).
    pub name: String,
    /// Position of the field name.
    pub name_pos: SourcePos,
    /// The field's raw type expression.
    pub ty: RawTypeExpr,
}

/// Whether a raw declaration was introduced with `struct` or `message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawDeclKind {
    /// Introduced with the `struct` keyword.
    Struct,
    /// Introduced with the `message` keyword.
    Message,
}

/// A raw struct or message declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDecl {
    /// Struct vs. message, as written.
    pub kind: RawDeclKind,
    /// Declaration name as written (case not yet validated).
    pub name: String,
    /// Position of the declaration name.
    pub name_pos: SourcePos,
    /// Doc comment gathered from contiguous `//` lines immediately
    /// preceding the declaration keyword, if any.
    pub doc: Option<String>,
    /// Fields in source order.
    pub fields: Vec<RawField>,
}

/// A raw schema: an ordered sequence of raw declarations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawSchema {
    /// Declarations in source order.
    pub decls: Vec<RawDecl>,
}
