// SPDX-License-Identifier: Apache-2.0
//! Errors a backend can raise while emitting a schema.

use thiserror::Error;

/// A failure while generating source for a validated schema.
///
/// Spec.md's "encode-time: none" infallibility only covers *generated*
/// encoders at runtime; emitting the generator's own source text can still
/// fail, e.g. if `syn`/`prettyplease` reject a token stream the `rust`
/// backend assembled incorrectly. This should never happen for a
/// successfully validated schema and indicates a backend bug rather than a
/// bad input schema.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// The `rust` backend assembled a token stream that does not parse as
    /// a Rust source file.
    #[error("generated output for {target} is not syntactically valid Rust: {source}")]
    InvalidRustSyntax {
        /// The target backend that produced the bad output.
        target: &'static str,
        /// The underlying `syn` parse error.
        #[source]
        source: syn::Error,
    },

    /// A declaration's recursion depth is unsupported by a specific
    /// backend's emitter (reserved for non-`rust` targets whose emitter
    /// takes a shortcut the `rust` backend doesn't need; unused today but
    /// kept so adding a constrained backend later doesn't require widening
    /// this enum's callers).
    #[error("{target} backend cannot emit {decl}: {reason}")]
    Unsupported {
        /// The target backend that rejected the declaration.
        target: &'static str,
        /// The declaration that could not be emitted.
        decl: String,
        /// Human-readable reason.
        reason: String,
    },
}
