// SPDX-License-Identifier: Apache-2.0
//! The `go` target backend (§4.8): a thinner, string-template generator
//! that proves the [`crate::Backend`] trait is backend-neutral rather than
//! serving as a reference target. No `syn`-equivalent exists to validate
//! the output parses as Go before it's written out.

mod codegen;
mod naming;
mod runtime_template;

use crate::backend::{Backend, GeneratedFile};
use crate::error::CodegenError;
use sdp_ir::Schema;

/// The `go` target backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct GoBackend;

const PACKAGE_HEADER: &str = "// Generated by sdp-codegen. Do not edit by hand.\npackage sdpgen\n\n";

impl Backend for GoBackend {
    fn target_name(&self) -> &'static str {
        "go"
    }

    fn emit_types(&self, schema: &Schema) -> Result<GeneratedFile, CodegenError> {
        let mut contents = String::from(PACKAGE_HEADER);
        for decl in schema.decls() {
            contents.push_str(&codegen::type_decl(decl, schema));
        }
        Ok(GeneratedFile::new("types.go", contents))
    }

    fn emit_encode(&self, schema: &Schema) -> Result<GeneratedFile, CodegenError> {
        let mut contents = String::from(PACKAGE_HEADER);
        for decl in schema.decls() {
            contents.push_str(&codegen::size_fn(decl, schema));
            contents.push_str(&codegen::encode_fn(decl, schema));
        }
        Ok(GeneratedFile::new("encode.go", contents))
    }

    fn emit_decode(&self, schema: &Schema) -> Result<GeneratedFile, CodegenError> {
        let mut contents = String::from(PACKAGE_HEADER);
        for decl in schema.decls() {
            contents.push_str(&codegen::decode_fn(decl, schema));
        }
        Ok(GeneratedFile::new("decode.go", contents))
    }

    fn emit_message_encode(&self, schema: &Schema) -> Result<GeneratedFile, CodegenError> {
        let mut contents = String::from(PACKAGE_HEADER);
        for decl in schema.messages() {
            contents.push_str(&codegen::type_id_const(decl));
            contents.push_str(&codegen::message_encode_fn(decl));
        }
        Ok(GeneratedFile::new("message_encode.go", contents))
    }

    fn emit_message_decode(&self, schema: &Schema) -> Result<GeneratedFile, CodegenError> {
        let mut contents = String::from(PACKAGE_HEADER);
        for decl in schema.messages() {
            contents.push_str(&codegen::message_decode_fn(decl));
        }
        contents.push_str(&codegen::dispatched_decoder(schema));
        Ok(GeneratedFile::new("message_decode.go", contents))
    }

    fn emit_runtime(&self, _schema: &Schema) -> Result<GeneratedFile, CodegenError> {
        Ok(GeneratedFile::new(
            "runtime.go",
            runtime_template::GO_RUNTIME_TEMPLATE,
        ))
    }
}
