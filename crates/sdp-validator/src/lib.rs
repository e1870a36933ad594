// SPDX-License-Identifier: Apache-2.0
//! Semantic validation of a parsed SDP schema (§4.4).
//!
//! Takes the [`sdp_parser::RawSchema`] produced by `sdp-parser` — names
//! still unresolved, shapes still unchecked — and either freezes it into a
//! [`sdp_ir::Schema`] with every `Named`/`Optional` reference resolved to a
//! [`sdp_ir::DeclId`] and every declaration assigned its type id, or
//! reports every problem found in one pass.
//!
//! Cycles are not detected explicitly. A declaration whose
//! value-containment chain (through `Named`/`Optional`/`Array` nesting)
//! exceeds [`sdp_ir::Limits::DEFAULT`]'s nesting-depth ceiling is rejected
//! outright, and a genuine cycle always trips that ceiling before it could
//! cause unbounded recursion elsewhere in the toolchain.

#![deny(missing_docs)]

mod error;
mod validate;

pub use error::ValidationError;
pub use validate::validate;
