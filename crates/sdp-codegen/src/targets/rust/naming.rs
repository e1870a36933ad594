// SPDX-License-Identifier: Apache-2.0
//! Deterministic name derivation shared by every emitter in this backend:
//! the same schema always yields the same identifiers (generator
//! determinism, spec.md §8 invariant 6).

use proc_macro2::Ident;
use quote::format_ident;
use sdp_ir::PrimitiveKind;

/// `PascalCase` -> `snake_case`. Declaration names are validated
/// Pascal-case identifiers, so this only ever needs to lower-case and
/// insert underscores before interior capitals.
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i != 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// `PascalCase` -> `SCREAMING_SNAKE_CASE`.
pub fn to_shouty_snake_case(name: &str) -> String {
    to_snake_case(name).to_ascii_uppercase()
}

pub fn size_fn_ident(decl_name: &str) -> Ident {
    format_ident!("size_{}", to_snake_case(decl_name))
}

pub fn encode_fn_ident(decl_name: &str) -> Ident {
    format_ident!("encode_{}", to_snake_case(decl_name))
}

pub fn encode_to_vec_fn_ident(decl_name: &str) -> Ident {
    format_ident!("encode_{}_to_vec", to_snake_case(decl_name))
}

pub fn decode_fn_ident(decl_name: &str) -> Ident {
    format_ident!("decode_{}", to_snake_case(decl_name))
}

pub fn decode_from_slice_fn_ident(decl_name: &str) -> Ident {
    format_ident!("decode_{}_from_slice", to_snake_case(decl_name))
}

pub fn message_encode_fn_ident(decl_name: &str) -> Ident {
    format_ident!("encode_message_{}", to_snake_case(decl_name))
}

pub fn message_decode_fn_ident(decl_name: &str) -> Ident {
    format_ident!("decode_message_{}", to_snake_case(decl_name))
}

pub fn type_id_const_ident(decl_name: &str) -> Ident {
    format_ident!("{}_TYPE_ID", to_shouty_snake_case(decl_name))
}

/// The runtime's `write_*` helper for a fixed-width primitive. Panics if
/// asked for `str`/`bytes`, which use dedicated helpers with different
/// signatures (`write_str`/`write_bytes`); callers branch on
/// [`sdp_ir::PrimitiveKind::is_fixed_width`] before calling this.
pub fn fixed_width_write_fn_ident(p: PrimitiveKind) -> Ident {
    format_ident!("write_{}", p.keyword())
}

/// The runtime's `read_*` helper for a fixed-width primitive. See
/// [`fixed_width_write_fn_ident`] for the `str`/`bytes` caveat.
pub fn fixed_width_read_fn_ident(p: PrimitiveKind) -> Ident {
    format_ident!("read_{}", p.keyword())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_conversion() {
        assert_eq!(to_snake_case("Point"), "point");
        assert_eq!(to_snake_case("AllPrimitives"), "all_primitives");
        assert_eq!(to_snake_case("HTTPRequest"), "h_t_t_p_request");
    }

    #[test]
    fn shouty_snake_case_conversion() {
        assert_eq!(to_shouty_snake_case("Point"), "POINT");
        assert_eq!(to_shouty_snake_case("Rectangle"), "RECTANGLE");
    }
}
