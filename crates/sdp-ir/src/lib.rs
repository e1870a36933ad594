// SPDX-License-Identifier: Apache-2.0
//! Validated schema IR shared by every SDP front-end and backend crate.
//!
//! This crate is intentionally inert: it holds data, not behavior. The
//! lexer and parser build positions and raw declarations against the types
//! here; the validator is the only place a [`Schema`] gets constructed; every
//! generator backend takes a `&Schema` and never mutates it.
//!
//! # Modules
//!
//! - [`pos`]: source position carried by every schema-time diagnostic.
//! - [`primitive`]: the twelve wire primitive kinds.
//! - [`limits`]: the decode-time resource bounds from the wire format spec.
//! - [`schema`]: the validated IR itself ([`schema::Schema`], [`schema::Decl`], ...).
//! - [`type_id`]: deterministic 16-bit type-id assignment.

#![deny(missing_docs)]

pub mod limits;
pub mod pos;
pub mod primitive;
pub mod schema;
pub mod type_id;

pub use limits::Limits;
pub use pos::SourcePos;
pub use primitive::PrimitiveKind;
pub use schema::{Decl, DeclId, DeclKind, Field, Schema, TypeExpr};
