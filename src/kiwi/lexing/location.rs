//! Conversion from byte offsets to 1-indexed row/column positions

use crate::kiwi::ast::{Position, Span};
use std::ops::Range;

/// Provides fast conversion from byte offsets to row/column positions.
/// Columns count characters, not bytes.
pub struct SourceLocation<'s> {
    source: &'s str,
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl<'s> SourceLocation<'s> {
    pub fn new(source: &'s str) -> Self {
        let mut line_starts = vec![0];

        for (byte_pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Self {
            source,
            line_starts,
        }
    }

    /// Convert a byte offset to a position
    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let byte_offset = byte_offset.min(self.source.len());
        let line = self
            .line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i - 1);

        let line_start = self.line_starts[line];
        let column = self.source[line_start..byte_offset].chars().count();

        Position::new(line as i32 + 1, column as i32 + 1)
    }

    /// Convert a byte range to a span
    pub fn range_to_span(&self, range: &Range<usize>) -> Span {
        Span::new(
            self.byte_to_position(range.start),
            self.byte_to_position(range.end),
        )
    }

    /// Get the total number of lines in the source
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
