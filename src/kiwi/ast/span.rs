//! Position and span tracking for source code locations
//!
//! Rows and columns are 1-indexed. A span's end points one column past the
//! last character it covers. Content that cannot be located (an empty
//! sequence) carries the `UNLOCATED` sentinel instead of a real position.

use serde::Serialize;
use std::fmt;

/// Represents a position in source code (row and column, both 1-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub row: i32,
    pub column: i32,
}

impl Position {
    /// Sentinel for "no content, not locatable"
    pub const UNLOCATED: Position = Position {
        row: -1,
        column: -1,
    };

    pub fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    pub fn is_located(&self) -> bool {
        *self != Self::UNLOCATED
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// Represents a span in source code (start and end positions)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub const UNLOCATED: Span = Span {
        start: Position::UNLOCATED,
        end: Position::UNLOCATED,
    };

    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    pub fn is_located(&self) -> bool {
        self.start.is_located() && self.end.is_located()
    }

    /// Check if a position is contained within this span (end exclusive)
    pub fn contains(&self, pos: Position) -> bool {
        self.is_located() && self.start <= pos && pos < self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
