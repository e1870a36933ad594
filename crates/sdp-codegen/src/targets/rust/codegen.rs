// SPDX-License-Identifier: Apache-2.0
//! Per-declaration token-stream construction for the `rust` target: type
//! definitions, size functions, byte-mode encode/decode, and message-mode
//! encode/decode (§4.6, §4.7).
//!
//! Array element types can only be `Primitive` or `Named` — the validator
//! forbids arrays of arrays and arrays of optionals (invariant 5) — so the
//! array helpers below never need to handle those shapes and simply treat
//! anything else as unreachable.

use super::naming::{
    decode_fn_ident, decode_from_slice_fn_ident, encode_fn_ident, encode_to_vec_fn_ident,
    fixed_width_read_fn_ident, fixed_width_write_fn_ident, message_decode_fn_ident,
    message_encode_fn_ident, size_fn_ident, type_id_const_ident,
};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use sdp_ir::{Decl, PrimitiveKind, Schema, TypeExpr};

/// The Rust type a resolved type expression maps to.
pub fn rust_type(ty: &TypeExpr, schema: &Schema) -> TokenStream {
    match ty {
        TypeExpr::Primitive(p) => primitive_rust_type(*p),
        TypeExpr::Named(id) => {
            let ident = format_ident!("{}", schema.decl(*id).name);
            quote!(#ident)
        }
        TypeExpr::Array(elem) => {
            let inner = rust_type(elem, schema);
            quote!(Vec<#inner>)
        }
        TypeExpr::Optional(id) => {
            let ident = format_ident!("{}", schema.decl(*id).name);
            quote!(Option<#ident>)
        }
    }
}

fn primitive_rust_type(p: PrimitiveKind) -> TokenStream {
    match p {
        PrimitiveKind::U8 => quote!(u8),
        PrimitiveKind::U16 => quote!(u16),
        PrimitiveKind::U32 => quote!(u32),
        PrimitiveKind::U64 => quote!(u64),
        PrimitiveKind::I8 => quote!(i8),
        PrimitiveKind::I16 => quote!(i16),
        PrimitiveKind::I32 => quote!(i32),
        PrimitiveKind::I64 => quote!(i64),
        PrimitiveKind::F32 => quote!(f32),
        PrimitiveKind::F64 => quote!(f64),
        PrimitiveKind::Bool => quote!(bool),
        PrimitiveKind::Str => quote!(String),
        PrimitiveKind::Bytes => quote!(Vec<u8>),
    }
}

/// One `pub struct` item per declaration (struct and message kinds share
/// the same shape; only the kind determines whether a type id/framing is
/// emitted elsewhere).
pub fn type_decl_item(decl: &Decl, schema: &Schema) -> TokenStream {
    let name = format_ident!("{}", decl.name);
    let fields = decl.fields.iter().map(|f| {
        let fname = format_ident!("{}", f.name);
        let fty = rust_type(&f.ty, schema);
        quote!(pub #fname: #fty)
    });
    let doc_attr = decl.doc.as_deref().map(|d| quote!(#[doc = #d]));
    quote! {
        #doc_attr
        #[derive(Debug, Clone, PartialEq)]
        pub struct #name {
            #(#fields),*
        }
    }
}

/// `size_<decl>(value: &Decl) -> usize`.
pub fn size_fn_item(decl: &Decl, schema: &Schema) -> TokenStream {
    let fn_name = size_fn_ident(&decl.name);
    let ty_name = format_ident!("{}", decl.name);
    let terms = decl.fields.iter().map(|f| {
        let accessor = {
            let fname = format_ident!("{}", f.name);
            quote!(value.#fname)
        };
        field_size_expr(&f.ty, &accessor, schema)
    });
    quote! {
        /// Exact encoded wire size of a value, without encoding it.
        pub fn #fn_name(value: &#ty_name) -> usize {
            0usize #(+ (#terms))*
        }
    }
}

fn field_size_expr(ty: &TypeExpr, accessor: &TokenStream, schema: &Schema) -> TokenStream {
    match ty {
        TypeExpr::Primitive(p) => match p.fixed_width() {
            #[allow(clippy::cast_possible_truncation)]
            Some(w) => {
                let w = w as usize;
                quote!(#w)
            }
            None => quote!(4 + #accessor.len()),
        },
        TypeExpr::Named(id) => {
            let f = size_fn_ident(&schema.decl(*id).name);
            quote!(#f(&#accessor))
        }
        TypeExpr::Array(elem) => array_size_expr(elem, accessor, schema),
        TypeExpr::Optional(id) => {
            let f = size_fn_ident(&schema.decl(*id).name);
            quote!(1 + #accessor.as_ref().map_or(0, |inner| #f(inner)))
        }
    }
}

fn array_size_expr(elem: &TypeExpr, accessor: &TokenStream, schema: &Schema) -> TokenStream {
    match elem {
        TypeExpr::Primitive(p) => match p.fixed_width() {
            #[allow(clippy::cast_possible_truncation)]
            Some(w) => {
                let w = w as usize;
                quote!(4 + #accessor.len() * #w)
            }
            None => quote!(4 + #accessor.iter().map(|elem| 4 + elem.len()).sum::<usize>()),
        },
        TypeExpr::Named(id) => {
            let f = size_fn_ident(&schema.decl(*id).name);
            quote!(4 + #accessor.iter().map(|elem| #f(elem)).sum::<usize>())
        }
        TypeExpr::Array(_) | TypeExpr::Optional(_) => {
            unreachable!("validator forbids array elements that are themselves array/optional")
        }
    }
}

/// `encode_<decl>(value: &Decl, buf: &mut Vec<u8>)` plus an
/// allocate-once `encode_<decl>_to_vec(value: &Decl) -> Vec<u8>` entry
/// point.
pub fn encode_fn_item(decl: &Decl, schema: &Schema) -> TokenStream {
    let fn_name = encode_fn_ident(&decl.name);
    let to_vec_name = encode_to_vec_fn_ident(&decl.name);
    let size_name = size_fn_ident(&decl.name);
    let ty_name = format_ident!("{}", decl.name);
    let stmts = decl.fields.iter().map(|f| {
        let fname = format_ident!("{}", f.name);
        let accessor = quote!(value.#fname);
        field_encode_stmt(&f.ty, &accessor, schema)
    });
    quote! {
        /// Append `value`'s byte-mode encoding to `buf`. Never allocates.
        pub fn #fn_name(value: &#ty_name, buf: &mut Vec<u8>) {
            #(#stmts)*
        }

        /// Encode `value` into a freshly allocated, exactly sized buffer.
        pub fn #to_vec_name(value: &#ty_name) -> Vec<u8> {
            let mut buf = Vec::with_capacity(#size_name(value));
            #fn_name(value, &mut buf);
            buf
        }
    }
}

fn field_encode_stmt(ty: &TypeExpr, accessor: &TokenStream, schema: &Schema) -> TokenStream {
    match ty {
        TypeExpr::Primitive(p) => primitive_encode_stmt(*p, accessor),
        TypeExpr::Named(id) => {
            let f = encode_fn_ident(&schema.decl(*id).name);
            quote!(#f(&#accessor, buf);)
        }
        TypeExpr::Array(elem) => array_encode_stmt(elem, accessor, schema),
        TypeExpr::Optional(id) => {
            let f = encode_fn_ident(&schema.decl(*id).name);
            quote! {
                write_presence(buf, #accessor.is_some());
                if let Some(inner) = #accessor.as_ref() {
                    #f(inner, buf);
                }
            }
        }
    }
}

fn primitive_encode_stmt(p: PrimitiveKind, accessor: &TokenStream) -> TokenStream {
    let write_fn = fixed_width_write_fn_ident(p);
    match p {
        PrimitiveKind::Str => quote!(#write_fn(buf, #accessor.as_str());),
        PrimitiveKind::Bytes => quote!(#write_fn(buf, #accessor.as_slice());),
        _ => quote!(#write_fn(buf, #accessor);),
    }
}

fn array_encode_stmt(elem: &TypeExpr, accessor: &TokenStream, schema: &Schema) -> TokenStream {
    let len_expr = quote!(#accessor.len() as u32);
    let body = match elem {
        TypeExpr::Primitive(p) => {
            let write_fn = fixed_width_write_fn_ident(*p);
            match p {
                PrimitiveKind::Str => quote!(#write_fn(buf, elem.as_str());),
                PrimitiveKind::Bytes => quote!(#write_fn(buf, elem.as_slice());),
                PrimitiveKind::Bool => quote!(#write_fn(buf, *elem);),
                _ => quote!(#write_fn(buf, *elem);),
            }
        }
        TypeExpr::Named(id) => {
            let f = encode_fn_ident(&schema.decl(*id).name);
            quote!(#f(elem, buf);)
        }
        TypeExpr::Array(_) | TypeExpr::Optional(_) => {
            unreachable!("validator forbids array elements that are themselves array/optional")
        }
    };
    quote! {
        write_array_len(buf, #len_expr);
        for elem in #accessor.iter() {
            #body
        }
    }
}

/// `decode_<decl>(bytes: &[u8], ctx: &mut DecodeContext) -> Result<Decl, DecodeError>`
/// plus a top-level `decode_<decl>_from_slice(bytes: &[u8]) -> Result<Decl, DecodeError>`
/// that performs the one-time input-size check and owns a fresh context.
pub fn decode_fn_item(decl: &Decl, schema: &Schema) -> TokenStream {
    let fn_name = decode_fn_ident(&decl.name);
    let from_slice_name = decode_from_slice_fn_ident(&decl.name);
    let ty_name = format_ident!("{}", decl.name);
    let stmts = decl.fields.iter().map(|f| {
        let fname = format_ident!("{}", f.name);
        field_decode_stmt(&f.ty, &fname, schema)
    });
    let field_names = decl
        .fields
        .iter()
        .map(|f| format_ident!("{}", f.name))
        .collect::<Vec<_>>();
    quote! {
        /// Decode a value starting at `ctx.offset`, advancing `ctx` past it.
        pub fn #fn_name(bytes: &[u8], ctx: &mut DecodeContext) -> Result<#ty_name, DecodeError> {
            #(#stmts)*
            Ok(#ty_name { #(#field_names),* })
        }

        /// Decode a value from a complete, standalone buffer, bounds-checking
        /// the input length and starting from a fresh decode context.
        pub fn #from_slice_name(bytes: &[u8]) -> Result<#ty_name, DecodeError> {
            check_input_size(bytes)?;
            let mut ctx = DecodeContext::new();
            #fn_name(bytes, &mut ctx)
        }
    }
}

fn field_decode_stmt(ty: &TypeExpr, fname: &proc_macro2::Ident, schema: &Schema) -> TokenStream {
    match ty {
        TypeExpr::Primitive(p) => {
            let read_fn = fixed_width_read_fn_ident(*p);
            quote!(let #fname = #read_fn(bytes, ctx)?;)
        }
        TypeExpr::Named(id) => {
            let f = decode_fn_ident(&schema.decl(*id).name);
            quote! {
                ctx.enter_nesting()?;
                let #fname = #f(bytes, ctx)?;
                ctx.exit_nesting();
            }
        }
        TypeExpr::Array(elem) => array_decode_stmt(elem, fname, schema),
        TypeExpr::Optional(id) => {
            let f = decode_fn_ident(&schema.decl(*id).name);
            quote! {
                let #fname = if read_presence(bytes, ctx)? {
                    ctx.enter_nesting()?;
                    let inner = #f(bytes, ctx)?;
                    ctx.exit_nesting();
                    Some(inner)
                } else {
                    None
                };
            }
        }
    }
}

fn array_decode_stmt(elem: &TypeExpr, fname: &proc_macro2::Ident, schema: &Schema) -> TokenStream {
    let elem_read = match elem {
        TypeExpr::Primitive(p) => {
            let read_fn = fixed_width_read_fn_ident(*p);
            quote!(#read_fn(bytes, ctx)?)
        }
        TypeExpr::Named(id) => {
            let f = decode_fn_ident(&schema.decl(*id).name);
            quote!(#f(bytes, ctx)?)
        }
        TypeExpr::Array(_) | TypeExpr::Optional(_) => {
            unreachable!("validator forbids array elements that are themselves array/optional")
        }
    };
    let nests = matches!(elem, TypeExpr::Named(_));
    let len_var = format_ident!("{}_len", fname);
    if nests {
        quote! {
            let #len_var = read_array_len(bytes, ctx)?;
            ctx.enter_nesting()?;
            let mut #fname = Vec::with_capacity(#len_var as usize);
            for _ in 0..#len_var {
                #fname.push(#elem_read);
            }
            ctx.exit_nesting();
        }
    } else {
        quote! {
            let #len_var = read_array_len(bytes, ctx)?;
            let mut #fname = Vec::with_capacity(#len_var as usize);
            for _ in 0..#len_var {
                #fname.push(#elem_read);
            }
        }
    }
}

/// `pub const <NAME>_TYPE_ID: u16 = id;` for a message-kind declaration.
pub fn type_id_const_item(decl: &Decl) -> TokenStream {
    let const_name = type_id_const_ident(&decl.name);
    let id = decl.type_id;
    quote! {
        /// Deterministic wire type id for this message, assigned in
        /// declaration order starting from 1.
        pub const #const_name: u16 = #id;
    }
}

/// `encode_message_<decl>(value: &Decl) -> Vec<u8>`.
pub fn message_encode_fn_item(decl: &Decl) -> TokenStream {
    let fn_name = message_encode_fn_ident(&decl.name);
    let encode_fn = encode_fn_ident(&decl.name);
    let size_fn = size_fn_ident(&decl.name);
    let type_id_const = type_id_const_ident(&decl.name);
    let ty_name = format_ident!("{}", decl.name);
    quote! {
        /// Frame `value` with the 10-byte message header and its byte-mode encoding.
        pub fn #fn_name(value: &#ty_name) -> Vec<u8> {
            #[allow(clippy::cast_possible_truncation)]
            let payload_len = #size_fn(value) as u32;
            let mut buf = Vec::with_capacity(MESSAGE_HEADER_SIZE + payload_len as usize);
            write_message_header(&mut buf, #type_id_const, payload_len);
            #encode_fn(value, &mut buf);
            buf
        }
    }
}

/// `decode_message_<decl>(bytes: &[u8]) -> Result<Decl, MessageError>`.
pub fn message_decode_fn_item(decl: &Decl) -> TokenStream {
    let fn_name = message_decode_fn_ident(&decl.name);
    let decode_fn = decode_fn_ident(&decl.name);
    let type_id_const = type_id_const_ident(&decl.name);
    let ty_name = format_ident!("{}", decl.name);
    quote! {
        /// Validate the message header and decode its payload.
        pub fn #fn_name(bytes: &[u8]) -> Result<#ty_name, MessageError> {
            check_input_size(bytes)?;
            let header = read_message_header(bytes)?;
            if header.type_id != #type_id_const {
                return Err(MessageError::UnknownMessageType { id: header.type_id });
            }
            let payload = &bytes[MESSAGE_HEADER_SIZE..];
            let mut ctx = DecodeContext::new();
            let value = #decode_fn(payload, &mut ctx)?;
            Ok(value)
        }
    }
}

/// The schema-scope dispatched decoder: validates the common header, then
/// routes by type id to the matching message decoder, returning a tagged
/// variant over every message-kind declaration.
pub fn dispatched_decoder_items(schema: &Schema) -> TokenStream {
    let messages: Vec<&Decl> = schema.messages().collect();
    let variants = messages.iter().map(|d| {
        let variant = format_ident!("{}", d.name);
        let ty = format_ident!("{}", d.name);
        quote!(#variant(#ty))
    });
    let arms = messages.iter().map(|d| {
        let const_name = type_id_const_ident(&d.name);
        let variant = format_ident!("{}", d.name);
        let decode_fn = message_decode_fn_ident(&d.name);
        quote!(#const_name => #decode_fn(bytes).map(SchemaMessage::#variant),)
    });
    let enum_name = format_ident!("SchemaMessage");
    quote! {
        /// A decoded message, tagged by which schema declaration it is.
        #[derive(Debug, Clone, PartialEq)]
        pub enum #enum_name {
            #(#variants),*
        }

        /// Validate the common header and dispatch to the matching
        /// per-type message decoder.
        pub fn decode_message(bytes: &[u8]) -> Result<#enum_name, MessageError> {
            check_input_size(bytes)?;
            let header = read_message_header(bytes)?;
            match header.type_id {
                #(#arms)*
                other => Err(MessageError::UnknownMessageType { id: other }),
            }
        }
    }
}
