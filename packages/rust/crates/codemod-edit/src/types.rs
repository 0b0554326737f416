//! Core types for source rewriting.

use serde::Serialize;

/// A replacement of the bytes `start..end` with `replacement`.
///
/// An insertion is an edit with `start == end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Start byte (inclusive).
    pub start: usize,
    /// End byte (exclusive).
    pub end: usize,
    /// Text written in place of the range.
    pub replacement: String,
}

impl TextEdit {
    /// Replace `start..end` with `replacement`.
    pub fn replace(start: usize, end: usize, replacement: impl Into<String>) -> Self {
        Self {
            start,
            end,
            replacement: replacement.into(),
        }
    }

    /// Insert `text` at byte `at`.
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::replace(at, at, text)
    }
}

/// Result of a structural replace operation.
#[derive(Debug, Clone, Serialize)]
pub struct EditResult {
    /// Original content before modification.
    pub original: String,
    /// Modified content after replacement.
    pub modified: String,
    /// Individual edit locations, in source order.
    pub edits: Vec<EditLocation>,
}

impl EditResult {
    /// Number of replacements made.
    #[must_use]
    pub fn count(&self) -> usize {
        self.edits.len()
    }
}

/// Location of an individual edit within a file.
#[derive(Debug, Clone, Serialize)]
pub struct EditLocation {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Original text that was replaced.
    pub original_text: String,
    /// New text after replacement.
    pub new_text: String,
}
