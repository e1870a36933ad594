// SPDX-License-Identifier: Apache-2.0
//! Serial Data Protocol: a schema-driven binary serialization toolchain.
//!
//! [`generate_from_source`] ties the whole pipeline together: lex the
//! schema text ([`sdp_lexer`]), parse it into a raw IR ([`sdp_parser`]),
//! validate and freeze it into a [`sdp_ir::Schema`] ([`sdp_validator`]), and
//! emit one target's source files ([`sdp_codegen`]).

#![deny(missing_docs)]

mod error;

pub use error::SdpError;
pub use sdp_codegen::{GeneratedFile, GeneratedPackage};
pub use sdp_ir::Schema;
pub use sdp_validator::ValidationError;

/// Validate schema source and freeze it into a [`Schema`], without
/// generating any target source. Exposed separately from
/// [`generate_from_source`] for callers (editor tooling, lint commands)
/// that only need the front half of the pipeline.
pub fn compile_schema(src: &str) -> Result<Schema, SdpError> {
    let raw = sdp_parser::parse(src)?;
    sdp_validator::validate(&raw).map_err(SdpError::Validate)
}

/// Run the full pipeline: lex, parse, validate, and generate source for
/// `target` (`"rust"` or `"go"`).
pub fn generate_from_source(src: &str, target: &str) -> Result<GeneratedPackage, SdpError> {
    let schema = compile_schema(src)?;
    generate_for_target(&schema, target)
}

/// Generate source for an already-validated schema against `target`
/// (`"rust"` or `"go"`).
pub fn generate_for_target(schema: &Schema, target: &str) -> Result<GeneratedPackage, SdpError> {
    match target {
        "rust" => Ok(sdp_codegen::generate(
            schema,
            &sdp_codegen::targets::rust::RustBackend,
        )?),
        "go" => Ok(sdp_codegen::generate(
            schema,
            &sdp_codegen::targets::go::GoBackend,
        )?),
        other => Err(SdpError::UnknownTarget(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POINT_SCHEMA: &str = "struct Point {\n    x: f32,\n    y: f32,\n}\n";

    #[test]
    fn compiles_a_minimal_schema() {
        let schema = compile_schema(POINT_SCHEMA).unwrap();
        assert_eq!(schema.len(), 1);
        assert_eq!(schema.decl_by_name("Point").unwrap().fields.len(), 2);
    }

    #[test]
    fn generates_rust_and_go_packages() {
        let schema = compile_schema(POINT_SCHEMA).unwrap();
        let rust_pkg = generate_for_target(&schema, "rust").unwrap();
        assert_eq!(rust_pkg.target, "rust");
        assert_eq!(rust_pkg.files.len(), 6);

        let go_pkg = generate_for_target(&schema, "go").unwrap();
        assert_eq!(go_pkg.target, "go");
        assert_eq!(go_pkg.files.len(), 6);
    }

    #[test]
    fn unknown_target_is_rejected() {
        let schema = compile_schema(POINT_SCHEMA).unwrap();
        let err = generate_for_target(&schema, "python").unwrap_err();
        assert!(matches!(err, SdpError::UnknownTarget(t) if t == "python"));
    }

    #[test]
    fn invalid_schema_reports_every_validation_error() {
        let err = compile_schema("struct A { x: Missing }").unwrap_err();
        match err {
            SdpError::Validate(errors) => assert!(!errors.is_empty()),
            other => panic!("expected Validate, got {other:?}"),
        }
    }
}
