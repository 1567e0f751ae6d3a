//! Parse errors
//!
//! A soft failure is not an error: rules report it as `Ok(None)` and the
//! caller tries its next alternative. Everything here is fatal and unwinds
//! the whole parse.

use super::memo::Mark;
use crate::kiwi::ast::{NodeError, Position};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A committed alternative could not continue
    #[error("{position}: expected {expected}")]
    Forced {
        expected: String,
        position: Position,
        mark: Mark,
    },
    /// The start rule failed, or stopped short of the end of input
    #[error("{position}: invalid syntax")]
    InvalidSyntax { position: Position },
    #[error(transparent)]
    Node(#[from] NodeError),
    /// The engine broke one of its own invariants
    #[error("internal parser error: {0}")]
    Internal(String),
}

impl ParseError {
    /// Source position the error points at, if it has one
    pub fn position(&self) -> Option<Position> {
        match self {
            ParseError::Forced { position, .. } | ParseError::InvalidSyntax { position } => {
                Some(*position)
            }
            ParseError::Node(_) | ParseError::Internal(_) => None,
        }
    }
}

/// Success, soft failure (`Ok(None)`) or fatal failure
pub type ParseResult<T> = Result<Option<T>, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kiwi::ast::Boundary;

    #[test]
    fn test_only_syntax_errors_carry_a_position() {
        let here = Position::new(2, 5);
        let invalid = ParseError::InvalidSyntax { position: here };
        let structural = ParseError::from(NodeError::Unlocatable {
            node: "File".to_string(),
            boundary: Boundary::End,
        });

        assert_eq!(invalid.position(), Some(here));
        assert_eq!(invalid.to_string(), "2:5: invalid syntax");
        assert_eq!(structural.position(), None);
        assert_eq!(ParseError::Internal("x".to_string()).position(), None);
    }
}
