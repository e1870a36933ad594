// SPDX-License-Identifier: Apache-2.0
//! The `rust` target's embedded runtime template (§4.8).
//!
//! Stamped verbatim into every generated package as `runtime.rs`. The
//! template is `include_str!`'d straight out of [`super::runtime_source`],
//! the real, compiled module this crate's own `tests/wire.rs` exercises
//! directly — so the source verified by execution and the source shipped
//! to generated packages can never drift apart. Generated output never
//! needs an external SDP runtime crate on the consumer's side, which is
//! why `runtime_source` hand-rolls `Display`/`std::error::Error` instead
//! of reaching for `thiserror` like the rest of this workspace.

/// The `rust` backend's runtime support file, one per generated package.
///
/// Field widths, the decode-context counters, and the message header
/// layout all read back against spec.md §3/§4.1/§6/§7; none of the
/// numbers here are backend-specific.
pub const RUST_RUNTIME_TEMPLATE: &str = concat!(
    "// Generated by sdp-codegen. Do not edit by hand.\n",
    include_str!("runtime_source.rs")
);

#[cfg(test)]
mod tests {
    use super::RUST_RUNTIME_TEMPLATE;

    #[test]
    fn template_is_the_real_runtime_source_module() {
        assert!(RUST_RUNTIME_TEMPLATE.contains("pub struct DecodeContext"));
        assert!(RUST_RUNTIME_TEMPLATE.contains("pub fn read_message_header"));
    }
}
