//! Error types for source rewriting.

use codemod_ast::AstError;
use thiserror::Error;

/// Error types for edit operations.
#[derive(Error, Debug)]
pub enum EditError {
    /// Invalid ast-grep pattern syntax.
    #[error("Pattern error: {0}")]
    Pattern(#[from] AstError),

    /// An edit range falls outside the source or off a character boundary.
    #[error("Edit range {start}..{end} is invalid for a source of {len} bytes")]
    OutOfBounds {
        /// Start byte of the offending edit.
        start: usize,
        /// End byte of the offending edit.
        end: usize,
        /// Length of the source in bytes.
        len: usize,
    },

    /// Two edits touch the same bytes.
    #[error("Overlapping edits at bytes {0} and {1}")]
    Overlap(usize, usize),
}
