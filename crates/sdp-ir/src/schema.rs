// SPDX-License-Identifier: Apache-2.0
//! The validated schema IR. Constructed exclusively by `sdp-validator`;
//! every generator backend takes a `&Schema` and never mutates it.

use crate::primitive::PrimitiveKind;
use std::collections::HashMap;

/// A stable index into [`Schema::decls`], assigned in declaration order.
///
/// Distinct from the 16-bit wire type id ([`crate::type_id`]): a `DeclId`
/// is an in-process array index (`usize`-sized, zero-based) used to resolve
/// `Named`/`Optional` references without re-hashing a name on every lookup;
/// the type id is the 1-based wire-visible identifier used only by
/// message-mode framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(pub usize);

/// Whether a declaration is a plain struct or a message (struct shape plus
/// a type id and message-mode framing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    /// A `struct` declaration: byte-mode only, no type id embedded in output.
    Struct,
    /// A `message` declaration: byte-mode plus message-mode framing and a
    /// dispatch-table entry.
    Message,
}

/// A type expression appearing in a field, fully resolved against the
/// schema's declarations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// A fixed-width or length-prefixed scalar.
    Primitive(PrimitiveKind),
    /// A reference to another declaration in the same schema.
    Named(DeclId),
    /// A homogeneous, variable-length sequence. The element type is never
    /// itself `Array` or `Optional` (enforced by the validator).
    Array(Box<TypeExpr>),
    /// A presence-tagged reference to a struct declaration. The inner type
    /// is always `Named` and always resolves to a `DeclKind::Struct` or
    /// `DeclKind::Message` (both have struct shape).
    Optional(DeclId),
}

impl TypeExpr {
    /// The declaration this type expression's `Named`/`Optional` target
    /// resolves to, if any.
    #[must_use]
    pub const fn named_target(&self) -> Option<DeclId> {
        match self {
            Self::Named(id) | Self::Optional(id) => Some(*id),
            Self::Primitive(_) | Self::Array(_) => None,
        }
    }
}

/// A single field of a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    /// Field name, lower-case-initial per the identifier rules in §3.
    pub name: String,
    /// The field's resolved type.
    pub ty: TypeExpr,
}

/// A struct or message declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decl {
    /// Index of this declaration within [`Schema::decls`].
    pub id: DeclId,
    /// Struct vs. message.
    pub kind: DeclKind,
    /// Pascal-case name, unique within the schema.
    pub name: String,
    /// Documentation comment gathered from contiguous `//` lines
    /// immediately preceding the declaration, if any.
    pub doc: Option<String>,
    /// Fields in declared order. Wire encoding visits fields in this order.
    pub fields: Vec<Field>,
    /// Deterministic 16-bit id assigned in declaration order (§4.5). Always
    /// present post-validation; only message-kind declarations actually
    /// embed it in generated output.
    pub type_id: u16,
}

/// A fully validated, immutable schema: an ordered sequence of
/// declarations plus a name index for resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    decls: Vec<Decl>,
    by_name: HashMap<String, DeclId>,
}

impl Schema {
    /// Construct a schema from already-validated, already-type-id-assigned
    /// declarations. Callers outside `sdp-validator` should not normally
    /// call this directly; it performs no validation of its own.
    #[must_use]
    pub fn new(decls: Vec<Decl>) -> Self {
        let by_name = decls
            .iter()
            .map(|d| (d.name.clone(), d.id))
            .collect::<HashMap<_, _>>();
        Self { decls, by_name }
    }

    /// All declarations, in source order.
    #[must_use]
    pub fn decls(&self) -> &[Decl] {
        &self.decls
    }

    /// Look up a declaration by its [`DeclId`].
    #[must_use]
    pub fn decl(&self, id: DeclId) -> &Decl {
        &self.decls[id.0]
    }

    /// Look up a declaration by name.
    #[must_use]
    pub fn decl_by_name(&self, name: &str) -> Option<&Decl> {
        self.by_name.get(name).map(|id| self.decl(*id))
    }

    /// Number of declarations in the schema.
    #[must_use]
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// Whether the schema has no declarations (invariant 6 forbids this
    /// post-validation; kept for symmetry with `len`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Declarations that are message-kind, in source order.
    pub fn messages(&self) -> impl Iterator<Item = &Decl> {
        self.decls.iter().filter(|d| d.kind == DeclKind::Message)
    }
}
