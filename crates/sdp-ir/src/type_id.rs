// SPDX-License-Identifier: Apache-2.0
//! Deterministic 16-bit type-id assignment (§4.5).
//!
//! Ids are assigned in declaration order starting at 1; id 0 is reserved
//! and never assigned. This applies to every declaration, struct or
//! message, even though only message-kind declarations go on to embed
//! their id in generated output — keeping assignment order uniform across
//! both kinds means inserting a struct before an existing message still
//! predictably shifts the message's id, which is the documented,
//! intentional tradeoff spec.md §9 notes in favor of a hash-based scheme.

/// Reserved id meaning "no type", never assigned to a declaration.
pub const RESERVED_ID: u16 = 0;

/// Assign ids `1..=count` to `count` declarations in order.
///
/// Returns `None` if `count` exceeds `u16::MAX` (more declarations than a
/// 16-bit id space can address) — in practice this is already excluded by
/// the depth/size limits elsewhere in the schema, but the function itself
/// makes no assumption about an upper bound on schema size.
#[must_use]
pub fn assign(count: usize) -> Option<Vec<u16>> {
    (1..=count)
        .map(u16::try_from)
        .collect::<Result<Vec<_>, _>>()
        .ok()
}
