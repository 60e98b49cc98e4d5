//! Conversion between byte offsets and line/character positions.
//!
//! Characters are counted as Unicode scalar values, the same unit the
//! language server uses when it talks to editors.

use text_size::TextSize;

/// A zero-based line/character position in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    /// Zero-based line number.
    pub line: u32,
    /// Zero-based character offset within the line.
    pub character: u32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Precomputed line starts for a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    /// Builds the index for `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        for (idx, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(TextSize::from((idx + 1) as u32));
            }
        }
        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// Number of lines; an empty document has one line.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset where `line` starts.
    #[must_use]
    pub fn line_start(&self, line: u32) -> Option<TextSize> {
        self.line_starts.get(line as usize).copied()
    }

    /// Byte offset of the end of `line`, excluding the line break.
    #[must_use]
    pub fn line_end(&self, line: u32, text: &str) -> Option<TextSize> {
        let start = self.line_start(line)?;
        let next = self
            .line_starts
            .get(line as usize + 1)
            .copied()
            .unwrap_or(self.len);
        let raw = &text[usize::from(start)..usize::from(next)];
        let trimmed = raw.trim_end_matches(['\n', '\r']);
        Some(start + TextSize::of(trimmed))
    }

    /// Converts a position to a byte offset.
    ///
    /// Returns `None` when the line does not exist. A character past the end
    /// of the line is clamped to the line end.
    #[must_use]
    pub fn offset(&self, position: Position, text: &str) -> Option<TextSize> {
        let start = self.line_start(position.line)?;
        let end = self.line_end(position.line, text)?;
        let line = &text[usize::from(start)..usize::from(end)];

        let mut remaining = position.character as usize;
        for (idx, _) in line.char_indices() {
            if remaining == 0 {
                return Some(start + TextSize::from(idx as u32));
            }
            remaining -= 1;
        }
        Some(end)
    }

    /// Converts a byte offset to a position, clamping to the document end.
    #[must_use]
    pub fn position(&self, offset: TextSize, text: &str) -> Position {
        let offset = offset.min(self.len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let start = self.line_starts[line];
        let character = text[usize::from(start)..usize::from(offset)].chars().count();
        Position::new(line as u32, character as u32)
    }
}
