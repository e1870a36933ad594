// SPDX-License-Identifier: Apache-2.0
//! Validation errors (§7, schema-time).

use sdp_ir::SourcePos;
use thiserror::Error;

/// A single semantic validation failure. The validator always returns
/// every error it finds in one pass, never just the first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The schema contained no declarations at all (check 7).
    #[error("schema must contain at least one declaration")]
    EmptySchema,

    /// Two declarations share a name (check 1).
    #[error("{pos}: duplicate declaration name {name:?}")]
    DuplicateDecl {
        /// Position of the second (duplicate) declaration.
        pos: SourcePos,
        /// The repeated name.
        name: String,
    },

    /// Two fields of the same declaration share a name (check 1).
    #[error("{pos}: duplicate field {name:?} in {decl:?}")]
    DuplicateField {
        /// Position of the second (duplicate) field.
        pos: SourcePos,
        /// Enclosing declaration name.
        decl: String,
        /// The repeated field name.
        name: String,
    },

    /// A declaration or field name does not follow the required case
    /// convention (check 2): declarations start uppercase, fields start
    /// lowercase.
    #[error("{pos}: {reason}: {name:?}")]
    InvalidIdentifier {
        /// Position of the offending name.
        pos: SourcePos,
        /// The offending name.
        name: String,
        /// Human-readable reason (which rule was violated).
        reason: &'static str,
    },

    /// A `Named`/`Optional` reference does not match any declaration in
    /// the schema (check 3).
    #[error("{pos}: unresolved type {name:?}")]
    UnresolvedType {
        /// Position of the reference.
        pos: SourcePos,
        /// The unresolved name.
        name: String,
    },

    /// `?name` where `name` is not a Pascal-case reference to a
    /// declaration (check 4) — e.g. a lower-case identifier, which can
    /// never denote a declared struct/message since declaration names are
    /// themselves required to start uppercase.
    #[error("{pos}: optional must wrap a Pascal-case struct reference, found {name:?}")]
    InvalidOptional {
        /// Position of the optional's inner reference.
        pos: SourcePos,
        /// The offending inner name.
        name: String,
    },

    /// An array's element type is itself an array or optional (check 5).
    #[error("{pos}: array element type cannot itself be an array or optional")]
    InvalidArrayElement {
        /// Position of the offending array.
        pos: SourcePos,
    },

    /// A declaration's value-containment depth exceeds the recursion
    /// ceiling (check 6). Also the mechanism by which cycles are caught —
    /// see `sdp-validator`'s crate docs for why a ceiling is used instead
    /// of explicit cycle detection.
    #[error("{decl:?}: value-containment depth exceeds the recursion ceiling of {limit}")]
    DepthExceeded {
        /// The declaration whose containment chain tripped the ceiling.
        decl: String,
        /// The ceiling that was exceeded.
        limit: u32,
    },

    /// The schema has more declarations than a 16-bit type-id space can
    /// address.
    #[error("schema has {count} declarations, which exceeds the {max} a 16-bit type id can address")]
    TooManyDeclarations {
        /// The declaration count found.
        count: usize,
        /// The largest count a 16-bit id space can address.
        max: usize,
    },
}
