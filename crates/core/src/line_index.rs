//! Offset to line mapping backed by a rope

use crate::syntax::ContractError;
use ropey::Rope;

/// Anything that can answer "which line holds this byte offset"
pub trait LineLookup {
    /// Zero-based line number of a byte offset
    fn line_of(&self, offset: usize) -> Result<usize, ContractError>;
}

/// Line index over a source buffer
#[derive(Debug, Clone)]
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        Self {
            rope: Rope::from_str(source),
        }
    }

    /// Convert a cursor position (1-indexed line, 0-indexed column in
    /// characters) into a byte offset. Positions past the end of a line clamp
    /// to the line end; lines past the end of the buffer clamp to its length.
    pub fn offset_of(&self, line: usize, column: usize) -> usize {
        let line_idx = line.saturating_sub(1);
        if line_idx >= self.rope.len_lines() {
            return self.rope.len_bytes();
        }

        let line_start = self.rope.line_to_char(line_idx);
        let slice = self.rope.line(line_idx);
        let mut line_len = slice.len_chars();
        if line_len > 0 && slice.char(line_len - 1) == '\n' {
            line_len -= 1;
        }

        self.rope.char_to_byte(line_start + column.min(line_len))
    }
}

impl LineLookup for LineIndex {
    fn line_of(&self, offset: usize) -> Result<usize, ContractError> {
        self.rope
            .try_byte_to_line(offset)
            .map_err(|_| ContractError::OffsetOutOfRange {
                offset,
                source_len: self.rope.len_bytes(),
            })
    }
}
