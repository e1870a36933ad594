// SPDX-License-Identifier: Apache-2.0
//! The wire primitive kinds (`u8` through `bytes`).

/// One of the twelve scalar wire primitives plus `bytes`.
///
/// Variant order matches the lexer's keyword table and is otherwise
/// insignificant (unlike field/declaration order, which is load-bearing for
/// the wire format).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// `u8` — one byte, unsigned.
    U8,
    /// `u16` — two bytes little-endian, unsigned.
    U16,
    /// `u32` — four bytes little-endian, unsigned.
    U32,
    /// `u64` — eight bytes little-endian, unsigned.
    U64,
    /// `i8` — one byte, two's complement.
    I8,
    /// `i16` — two bytes little-endian, two's complement.
    I16,
    /// `i32` — four bytes little-endian, two's complement.
    I32,
    /// `i64` — eight bytes little-endian, two's complement.
    I64,
    /// `f32` — four bytes, IEEE-754 single precision, raw bit pattern.
    F32,
    /// `f64` — eight bytes, IEEE-754 double precision, raw bit pattern.
    F64,
    /// `bool` — one byte, 0 or 1.
    Bool,
    /// `str` — `u32` length prefix + UTF-8 bytes.
    Str,
    /// `bytes` — `u32` length prefix + opaque bytes.
    Bytes,
}

impl PrimitiveKind {
    /// The schema-source keyword spelling for this primitive.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Bool => "bool",
            Self::Str => "str",
            Self::Bytes => "bytes",
        }
    }

    /// Look up a primitive by its schema-source keyword spelling.
    #[must_use]
    pub fn from_keyword(kw: &str) -> Option<Self> {
        Some(match kw {
            "u8" => Self::U8,
            "u16" => Self::U16,
            "u32" => Self::U32,
            "u64" => Self::U64,
            "i8" => Self::I8,
            "i16" => Self::I16,
            "i32" => Self::I32,
            "i64" => Self::I64,
            "f32" => Self::F32,
            "f64" => Self::F64,
            "bool" => Self::Bool,
            "str" => Self::Str,
            "bytes" => Self::Bytes,
            _ => return None,
        })
    }

    /// Fixed wire width in bytes, or `None` for the variable-length
    /// primitives (`str`, `bytes`).
    #[must_use]
    pub const fn fixed_width(self) -> Option<u32> {
        match self {
            Self::U8 | Self::I8 | Self::Bool => Some(1),
            Self::U16 | Self::I16 => Some(2),
            Self::U32 | Self::I32 | Self::F32 => Some(4),
            Self::U64 | Self::I64 | Self::F64 => Some(8),
            Self::Str | Self::Bytes => None,
        }
    }

    /// Whether this primitive has a compile-time-constant wire size.
    #[must_use]
    pub const fn is_fixed_width(self) -> bool {
        self.fixed_width().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_round_trips() {
        for kw in [
            "u8", "u16", "u32", "u64", "i8", "i16", "i32", "i64", "f32", "f64", "bool", "str",
            "bytes",
        ] {
            let p = PrimitiveKind::from_keyword(kw).expect("known keyword");
            assert_eq!(p.keyword(), kw);
        }
    }

    #[test]
    fn unknown_keyword_is_none() {
        assert!(PrimitiveKind::from_keyword("u128").is_none());
    }

    #[test]
    fn fixed_widths_match_wire_table() {
        assert_eq!(PrimitiveKind::U8.fixed_width(), Some(1));
        assert_eq!(PrimitiveKind::Bool.fixed_width(), Some(1));
        assert_eq!(PrimitiveKind::U16.fixed_width(), Some(2));
        assert_eq!(PrimitiveKind::U32.fixed_width(), Some(4));
        assert_eq!(PrimitiveKind::F32.fixed_width(), Some(4));
        assert_eq!(PrimitiveKind::U64.fixed_width(), Some(8));
        assert_eq!(PrimitiveKind::F64.fixed_width(), Some(8));
        assert_eq!(PrimitiveKind::Str.fixed_width(), None);
        assert_eq!(PrimitiveKind::Bytes.fixed_width(), None);
    }
}
