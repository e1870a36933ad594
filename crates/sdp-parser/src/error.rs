// SPDX-License-Identifier: Apache-2.0
//! Parse-time errors.

use sdp_ir::SourcePos;
use sdp_lexer::LexError;
use thiserror::Error;

/// An error produced while parsing a token stream into a [`crate::RawSchema`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Tokenizing the source text failed before parsing could begin.
    #[error("{}: {0}", .0.pos())]
    Lex(#[from] LexError),

    /// The token stream does not match the grammar at this position —
    /// covers an unexpected token, an unterminated declaration (end of
    /// input reached before a closing brace), and a malformed type
    /// expression, all of which are detected at the same recursive-descent
    /// call sites and share one carrier with a descriptive message.
    #[error("{pos}: {msg}")]
    Syntax {
        /// Position of the unexpected token.
        pos: SourcePos,
        /// Human-readable description of what was expected.
        msg: String,
    },
}

impl ParseError {
    /// The position this error occurred at.
    #[must_use]
    pub fn pos(&self) -> SourcePos {
        match self {
            Self::Lex(e) => e.pos(),
            Self::Syntax { pos, .. } => *pos,
        }
    }

    pub(crate) fn syntax(pos: SourcePos, msg: impl Into<String>) -> Self {
        Self::Syntax {
            pos,
            msg: msg.into(),
        }
    }
}
