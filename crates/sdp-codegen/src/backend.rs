// SPDX-License-Identifier: Apache-2.0
//! The backend-neutral generator framework (§4.6): a fixed six-call
//! contract every target implements, and the driver that walks it.

use crate::error::CodegenError;
use sdp_ir::Schema;

/// One emitted source file, named per the target's own convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// File name relative to the schema's output subdirectory, e.g.
    /// `types.rs` or `message_decode.go`.
    pub file_name: String,
    /// The file's full contents.
    pub contents: String,
}

impl GeneratedFile {
    /// Construct a generated file from a name and contents.
    #[must_use]
    pub fn new(file_name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            contents: contents.into(),
        }
    }
}

/// The complete output of one `generate` call: every file for one schema,
/// for one target, in the fixed emission order (types, encode, decode,
/// message encode, message decode, runtime) required by invariant 6 in
/// spec.md §8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPackage {
    /// Target this package was generated for (`"rust"`, `"go"`, ...).
    pub target: &'static str,
    /// Files in emission order.
    pub files: Vec<GeneratedFile>,
}

/// A single target-language emitter.
///
/// Implementations must be pure functions of `schema`: the same schema
/// passed twice must produce byte-identical files, in the same order,
/// every time (generator-determinism invariant, spec.md §8 invariant 6).
pub trait Backend {
    /// The target tag this backend answers to (`"rust"`, `"go"`, ...),
    /// matching the target-language tag in spec.md §6.
    fn target_name(&self) -> &'static str;

    /// Emit the per-declaration type definitions.
    fn emit_types(&self, schema: &Schema) -> Result<GeneratedFile, CodegenError>;

    /// Emit byte-mode size functions and encoders for every declaration.
    fn emit_encode(&self, schema: &Schema) -> Result<GeneratedFile, CodegenError>;

    /// Emit byte-mode decoders for every declaration.
    fn emit_decode(&self, schema: &Schema) -> Result<GeneratedFile, CodegenError>;

    /// Emit message-mode encoders for every message-kind declaration.
    fn emit_message_encode(&self, schema: &Schema) -> Result<GeneratedFile, CodegenError>;

    /// Emit message-mode decoders plus the schema-scope dispatched decoder.
    fn emit_message_decode(&self, schema: &Schema) -> Result<GeneratedFile, CodegenError>;

    /// Emit the self-contained runtime support file (§4.8): primitive
    /// codec helpers, the decode-context type, the error type, and the
    /// `Limits`-derived constants.
    fn emit_runtime(&self, schema: &Schema) -> Result<GeneratedFile, CodegenError>;
}

/// Drive a backend's six emission calls in the fixed order spec.md §8's
/// generator-determinism invariant requires, and collect the result into
/// one [`GeneratedPackage`].
pub fn generate(schema: &Schema, backend: &dyn Backend) -> Result<GeneratedPackage, CodegenError> {
    let files = vec![
        backend.emit_types(schema)?,
        backend.emit_encode(schema)?,
        backend.emit_decode(schema)?,
        backend.emit_message_encode(schema)?,
        backend.emit_message_decode(schema)?,
        backend.emit_runtime(schema)?,
    ];
    Ok(GeneratedPackage {
        target: backend.target_name(),
        files,
    })
}
