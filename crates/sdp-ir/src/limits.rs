// SPDX-License-Identifier: Apache-2.0
//! Decode-time resource bounds, centralized so every backend's embedded
//! runtime template and the validator's recursion ceiling read one table
//! instead of repeating these constants per emitter (spec.md §9 redesign
//! flag: "Decode-context limits are repeated as constants in each emitter").

/// Hard resource bounds enforced on every decode.
///
/// These are compiled into generated code as constants; they are not
/// configurable per-schema or per-call. A single global [`Limits::DEFAULT`]
/// is the only instance this workspace ever constructs, but the type is
/// kept distinct from bare constants so a future per-schema override (an
/// open question not exercised here) has somewhere to live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum total encoded size accepted by a single decode call, in bytes.
    pub max_serialized_size: u64,
    /// Maximum element count for any single array.
    pub max_array_elements: u32,
    /// Maximum cumulative element count across all arrays nested within one decode.
    pub max_total_elements: u32,
    /// Maximum struct/optional/array nesting depth during decode.
    pub max_nesting_depth: u32,
}

impl Limits {
    /// The limits mandated by the wire format specification (§3).
    pub const DEFAULT: Self = Self {
        max_serialized_size: 128 * 1024 * 1024,
        max_array_elements: 1_000_000,
        max_total_elements: 10_000_000,
        max_nesting_depth: 20,
    };
}

impl Default for Limits {
    fn default() -> Self {
        Self::DEFAULT
    }
}
