// SPDX-License-Identifier: Apache-2.0
//! The aggregate error type spanning every pipeline stage.

use sdp_validator::ValidationError;
use thiserror::Error;

/// A failure anywhere in the lex -> parse -> validate -> generate pipeline.
#[derive(Debug, Error)]
pub enum SdpError {
    /// Tokenizing or parsing the schema source failed (parse errors wrap
    /// the lex error that triggered them, if any).
    #[error("parse error: {0}")]
    Parse(#[from] sdp_parser::ParseError),

    /// The parsed schema failed semantic validation. Every problem found is
    /// reported together rather than stopping at the first one.
    #[error("schema validation failed with {} error(s)", .0.len())]
    Validate(Vec<ValidationError>),

    /// Emitting source for the validated schema failed.
    #[error("code generation error: {0}")]
    Codegen(#[from] sdp_codegen::CodegenError),

    /// The requested target tag does not match a known backend.
    #[error("unknown target {0:?}; expected one of: rust, go")]
    UnknownTarget(String),
}
