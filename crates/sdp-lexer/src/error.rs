// SPDX-License-Identifier: Apache-2.0
//! Lexical errors.

use sdp_ir::SourcePos;
use thiserror::Error;

/// An error produced while tokenizing schema source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A character that cannot start any token and is not whitespace.
    #[error("{pos}: unrecognized character {ch:?}")]
    UnrecognizedChar {
        /// Position of the offending character.
        pos: SourcePos,
        /// The offending character.
        ch: char,
    },
    /// A run of identifier-like characters that does not begin with an
    /// ASCII letter, as required by the identifier regex in the spec
    /// (`[A-Za-z][A-Za-z0-9_]*`) — for example a leading underscore.
    #[error("{pos}: identifier must start with an ASCII letter")]
    UnterminatedIdentifier {
        /// Position of the invalid leading character.
        pos: SourcePos,
    },
}

impl LexError {
    /// The position this error occurred at.
    #[must_use]
    pub const fn pos(&self) -> SourcePos {
        match self {
            Self::UnrecognizedChar { pos, .. } | Self::UnterminatedIdentifier { pos } => *pos,
        }
    }
}
