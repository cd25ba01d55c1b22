//! Span-based source code editing
//!
//! Edits are collected first and applied as one batch. The batch is validated
//! up front, so either every edit lands or the source is left untouched.

use mago_database::file::FileId;
use mago_span::{Position, Span};
use thiserror::Error;

/// Errors that can occur during edit application
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EditError {
    #[error("Overlapping edits detected at offset {0}")]
    OverlappingEdits(usize),

    #[error("Edit span {start}..{end} out of bounds for source length {len}")]
    SpanOutOfBounds { start: usize, end: usize, len: usize },

    #[error("Edit span {start}..{end} does not fall on a character boundary")]
    NotCharBoundary { start: usize, end: usize },
}

/// Represents a single code edit operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// The source span to replace (empty for a pure insertion)
    pub span: Span,
    /// The replacement text
    pub replacement: String,
    /// Human-readable description of the edit
    pub message: String,
}

impl Edit {
    /// Create a new edit
    pub fn new(span: Span, replacement: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            span,
            replacement: replacement.into(),
            message: message.into(),
        }
    }

    /// Create an edit replacing the byte range `start..end`
    pub fn replace(
        file_id: FileId,
        start: usize,
        end: usize,
        replacement: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let span = Span::new(file_id, Position::new(start as u32), Position::new(end as u32));
        Self::new(span, replacement, message)
    }

    /// Get the byte offset where this edit starts
    pub fn start_offset(&self) -> usize {
        self.span.start.offset as usize
    }

    /// Get the byte offset where this edit ends
    pub fn end_offset(&self) -> usize {
        self.span.end.offset as usize
    }

    /// Whether this edit only inserts text
    pub fn is_insertion(&self) -> bool {
        self.start_offset() == self.end_offset()
    }
}

/// Apply edits to source code
///
/// Edits are applied in reverse order (from end to start) to maintain
/// valid offsets throughout the process. Replacement text is inserted
/// verbatim.
///
/// # Arguments
/// * `source` - The original source code
/// * `edits` - Slice of edits to apply
///
/// # Returns
/// * `Ok(String)` - The modified source code
/// * `Err(EditError)` - If edits overlap or are out of bounds; nothing is applied
pub fn apply_edits(source: &str, edits: &[Edit]) -> Result<String, EditError> {
    if edits.is_empty() {
        return Ok(source.to_string());
    }

    // Sort edits by start position (descending) for safe replacement
    let mut sorted_edits: Vec<&Edit> = edits.iter().collect();
    sorted_edits.sort_by(|a, b| {
        b.start_offset()
            .cmp(&a.start_offset())
            .then_with(|| b.end_offset().cmp(&a.end_offset()))
    });

    // Validate the whole batch before touching anything
    let source_len = source.len();
    let mut prev_start: Option<usize> = None;

    for edit in &sorted_edits {
        let start = edit.start_offset();
        let end = edit.end_offset();

        if start > end || end > source_len {
            return Err(EditError::SpanOutOfBounds {
                start,
                end,
                len: source_len,
            });
        }

        if !source.is_char_boundary(start) || !source.is_char_boundary(end) {
            return Err(EditError::NotCharBoundary { start, end });
        }

        // Two insertions at the same point are ambiguous too
        if let Some(prev) = prev_start {
            if end > prev || (start == prev && edit.is_insertion()) {
                return Err(EditError::OverlappingEdits(start));
            }
        }

        prev_start = Some(start);
    }

    let mut result = source.to_string();

    for edit in sorted_edits {
        result.replace_range(edit.start_offset()..edit.end_offset(), &edit.replacement);
    }

    Ok(result)
}
