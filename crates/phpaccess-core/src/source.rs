//! Line-oriented view of a source document
//!
//! Mirrors what an editor exposes: per-line text, blank-line queries and
//! conversion between (line, column) positions and byte offsets. Lines and
//! columns are 0-based; columns count characters, not bytes.

/// A (line, column) position in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TextPosition {
    pub line: usize,
    pub column: usize,
}

impl TextPosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A half-open range between two positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextRange {
    pub start: TextPosition,
    pub end: TextPosition,
}

impl TextRange {
    pub fn new(start: TextPosition, end: TextPosition) -> Self {
        Self { start, end }
    }

    /// A zero-width range at `position`
    pub fn empty(position: TextPosition) -> Self {
        Self::new(position, position)
    }
}

/// A document split into lines
#[derive(Debug, Clone)]
pub struct SourceText<'s> {
    text: &'s str,
    /// Byte offset where each line starts
    line_starts: Vec<usize>,
}

impl<'s> SourceText<'s> {
    pub fn new(text: &'s str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { text, line_starts }
    }

    /// The full document text
    pub fn text(&self) -> &'s str {
        self.text
    }

    /// Line terminator used by the document, taken from its first line break
    ///
    /// Text with no line break at all uses `\n`.
    pub fn line_ending(&self) -> &'static str {
        match self.line_starts.get(1) {
            Some(&next) if next >= 2 && self.text.as_bytes()[next - 2] == b'\r' => "\r\n",
            _ => "\n",
        }
    }

    /// Text of a line without its line terminator
    pub fn line(&self, line: usize) -> Option<&'s str> {
        let start = *self.line_starts.get(line)?;
        let end = match self.line_starts.get(line + 1) {
            Some(next) => next - 1,
            None => self.text.len(),
        };
        let raw = &self.text[start..end];
        Some(raw.strip_suffix('\r').unwrap_or(raw))
    }

    /// Whether a line is empty or whitespace only; lines past the end count as blank
    pub fn is_blank(&self, line: usize) -> bool {
        self.line(line).map_or(true, |text| text.trim().is_empty())
    }

    /// Number of characters on a line
    pub fn line_len(&self, line: usize) -> usize {
        self.line(line).map_or(0, |text| text.chars().count())
    }

    /// Byte offset of a position, clamped to the document the way editors clamp
    ///
    /// A line past the end resolves to the end of the document and a column
    /// past the end of its line resolves to the end of that line.
    pub fn offset_at(&self, position: TextPosition) -> usize {
        let Some(&start) = self.line_starts.get(position.line) else {
            return self.text.len();
        };
        let line = self.line(position.line).unwrap_or_default();
        let column_bytes = line
            .char_indices()
            .nth(position.column)
            .map_or(line.len(), |(i, _)| i);
        start + column_bytes
    }

    /// Position of a byte offset
    pub fn position_at(&self, offset: usize) -> TextPosition {
        let offset = offset.min(self.text.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let start = self.line_starts[line];
        let column = self.text[start..offset].chars().count();
        TextPosition::new(line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines() {
        let source = SourceText::new("<?php\r\nclass A {\n    \n}");

        assert_eq!(source.line(0), Some("<?php"));
        assert_eq!(source.line(1), Some("class A {"));
        assert_eq!(source.line(2), Some("    "));
        assert_eq!(source.line(3), Some("}"));
        assert_eq!(source.line(4), None);
    }

    #[test]
    fn test_blank_lines() {
        let source = SourceText::new("a\n\n \t \nb\n");

        assert!(!source.is_blank(0));
        assert!(source.is_blank(1));
        assert!(source.is_blank(2));
        assert!(!source.is_blank(3));
        // trailing newline opens an empty final line
        assert!(source.is_blank(4));
    }

    #[test]
    fn test_offset_at_clamps_column() {
        let source = SourceText::new("ab\n\ncd");

        assert_eq!(source.offset_at(TextPosition::new(0, 1)), 1);
        assert_eq!(source.offset_at(TextPosition::new(0, 10)), 2);
        assert_eq!(source.offset_at(TextPosition::new(1, 4)), 3);
        assert_eq!(source.offset_at(TextPosition::new(2, 0)), 4);
        assert_eq!(source.offset_at(TextPosition::new(9, 0)), 6);
    }

    #[test]
    fn test_offset_at_multibyte() {
        let source = SourceText::new("é = 1;\nx");

        assert_eq!(source.offset_at(TextPosition::new(0, 1)), 2);
        assert_eq!(source.line_len(0), 6);
    }

    #[test]
    fn test_position_at() {
        let source = SourceText::new("line1\nline2\nline3");

        assert_eq!(source.position_at(0), TextPosition::new(0, 0));
        assert_eq!(source.position_at(5), TextPosition::new(0, 5));
        assert_eq!(source.position_at(6), TextPosition::new(1, 0));
        assert_eq!(source.position_at(14), TextPosition::new(2, 2));
    }

    #[test]
    fn test_line_ending() {
        assert_eq!(SourceText::new("<?php\r\nclass A {}\r\n").line_ending(), "\r\n");
        assert_eq!(SourceText::new("<?php\nclass A {}\r\n").line_ending(), "\n");
        assert_eq!(SourceText::new("\r\n").line_ending(), "\r\n");
        assert_eq!(SourceText::new("\n").line_ending(), "\n");
        assert_eq!(SourceText::new("<?php").line_ending(), "\n");
    }
}
