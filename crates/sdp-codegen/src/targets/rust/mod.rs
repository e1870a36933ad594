// SPDX-License-Identifier: Apache-2.0
//! The `rust` target backend (§4.6): full fidelity, built with
//! `proc_macro2` + `quote` + `syn` + `prettyplease`, the reference target
//! other backends are diffed against.

mod codegen;
mod naming;
pub mod runtime_source;
mod runtime_template;

use crate::backend::{Backend, GeneratedFile};
use crate::error::CodegenError;
use proc_macro2::TokenStream;
use quote::quote;
use sdp_ir::Schema;

/// The `rust` target backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct RustBackend;

impl Backend for RustBackend {
    fn target_name(&self) -> &'static str {
        "rust"
    }

    fn emit_types(&self, schema: &Schema) -> Result<GeneratedFile, CodegenError> {
        let items = schema
            .decls()
            .iter()
            .map(|d| codegen::type_decl_item(d, schema));
        render("types.rs", quote!(#(#items)*))
    }

    fn emit_encode(&self, schema: &Schema) -> Result<GeneratedFile, CodegenError> {
        let use_stmt = quote!(use crate::runtime::*;);
        let types_use = use_types_stmt(schema);
        let mut items = TokenStream::new();
        for decl in schema.decls() {
            items.extend(codegen::size_fn_item(decl, schema));
            items.extend(codegen::encode_fn_item(decl, schema));
        }
        render(
            "encode.rs",
            quote! {
                #use_stmt
                #types_use
                #items
            },
        )
    }

    fn emit_decode(&self, schema: &Schema) -> Result<GeneratedFile, CodegenError> {
        let use_stmt = quote!(use crate::runtime::*;);
        let types_use = use_types_stmt(schema);
        let mut items = TokenStream::new();
        for decl in schema.decls() {
            items.extend(codegen::decode_fn_item(decl, schema));
        }
        render(
            "decode.rs",
            quote! {
                #use_stmt
                #types_use
                #items
            },
        )
    }

    fn emit_message_encode(&self, schema: &Schema) -> Result<GeneratedFile, CodegenError> {
        let use_stmt = quote!(use crate::runtime::*;);
        let encode_use = quote!(use crate::encode::*;);
        let types_use = use_types_stmt(schema);
        let mut items = TokenStream::new();
        for decl in schema.messages() {
            items.extend(codegen::type_id_const_item(decl));
            items.extend(codegen::message_encode_fn_item(decl));
        }
        render(
            "message_encode.rs",
            quote! {
                #use_stmt
                #encode_use
                #types_use
                #items
            },
        )
    }

    fn emit_message_decode(&self, schema: &Schema) -> Result<GeneratedFile, CodegenError> {
        let use_stmt = quote!(use crate::runtime::*;);
        let decode_use = quote!(use crate::decode::*;);
        let message_encode_use = quote!(use crate::message_encode::*;);
        let types_use = use_types_stmt(schema);
        let mut items = TokenStream::new();
        for decl in schema.messages() {
            items.extend(codegen::message_decode_fn_item(decl));
        }
        items.extend(codegen::dispatched_decoder_items(schema));
        render(
            "message_decode.rs",
            quote! {
                #use_stmt
                #decode_use
                #message_encode_use
                #types_use
                #items
            },
        )
    }

    fn emit_runtime(&self, _schema: &Schema) -> Result<GeneratedFile, CodegenError> {
        Ok(GeneratedFile::new(
            "runtime.rs",
            runtime_template::RUST_RUNTIME_TEMPLATE,
        ))
    }
}

fn use_types_stmt(schema: &Schema) -> TokenStream {
    let names = schema
        .decls()
        .iter()
        .map(|d| proc_macro2::Ident::new(&d.name, proc_macro2::Span::call_site()));
    quote!(use crate::types::{#(#names),*};)
}

/// Pretty-print a token stream into a generated file, verifying it parses
/// as valid Rust first (the `assert_valid_rust` pattern this workspace's
/// own integration tests also use).
fn render(file_name: &'static str, tokens: TokenStream) -> Result<GeneratedFile, CodegenError> {
    let file = syn::parse2::<syn::File>(tokens).map_err(|source| CodegenError::InvalidRustSyntax {
        target: "rust",
        source,
    })?;
    let mut contents = String::from("// Generated by sdp-codegen. Do not edit by hand.\n");
    contents.push_str(&prettyplease::unparse(&file));
    Ok(GeneratedFile::new(file_name, contents))
}
